//! Export request routing and batch export of saved chat pages

use crate::dom::parse_document;
use crate::error::ExportError;
use crate::extractor::export_chat;
use crate::models::ExportedChat;
use crate::utils::{markdown_filename, sanitize_filename};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub const SUPPORTED_HOST: &str = "chat.deepseek.com";

/// The subset of a browser tab the export request needs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: Option<i64>,
    pub url: Option<String>,
}

/// Pick the tab that should receive the export request.
///
/// Returns the tab id, or the error to answer the requester with.
pub fn resolve_export_tab(tab: Option<&TabInfo>) -> Result<i64, ExportError> {
    let tab = tab.ok_or(ExportError::NoActiveTab)?;
    let id = tab.id.filter(|id| *id > 0).ok_or(ExportError::NoActiveTab)?;

    match tab.url.as_deref() {
        Some(url) if url.contains(SUPPORTED_HOST) => Ok(id),
        _ => Err(ExportError::UnsupportedHost),
    }
}

/// Download name offered for an exported chat
pub fn export_filename(title: &str) -> String {
    markdown_filename(&sanitize_filename(title))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub source: PathBuf,
    pub output: PathBuf,
    pub title: String,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub exported: Vec<ExportedFile>,
    /// Pages without a conversation
    pub skipped: Vec<PathBuf>,
}

/// Extract the conversation from one saved page; `None` when it has none
pub fn export_page(path: &Path) -> Result<Option<ExportedChat>> {
    let html = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document = parse_document(&html);

    match export_chat(&document) {
        Ok(chat) => Ok(Some(chat)),
        Err(ExportError::NoConversation) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to export {}", path.display())),
    }
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
        .unwrap_or(false)
}

/// A single page, or every `.html`/`.htm` file under a directory
pub fn find_pages(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        bail!("Input path does not exist: {}", input.display());
    }

    let mut pages: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_html(e.path()))
        .map(|e| e.into_path())
        .collect();
    pages.sort();

    debug!(count = pages.len(), dir = %input.display(), "found saved pages");
    Ok(pages)
}

/// Pick `<stem>.md`, or `<stem>-2.md`, `<stem>-3.md`... when already taken
fn unique_output(output_dir: &Path, title: &str, taken: &mut HashSet<PathBuf>) -> PathBuf {
    let stem = sanitize_filename(title);
    let mut candidate = output_dir.join(markdown_filename(&stem));
    let mut n = 2;
    while taken.contains(&candidate) {
        candidate = output_dir.join(markdown_filename(&format!("{}-{}", stem, n)));
        n += 1;
    }
    taken.insert(candidate.clone());
    candidate
}

/// Export every saved page under `input` into `output_dir`
pub fn export_batch(input: &Path, output_dir: &Path) -> Result<BatchReport> {
    let pages = find_pages(input)?;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut report = BatchReport::default();
    let mut taken = HashSet::new();

    for page in pages {
        let Some(chat) = export_page(&page)? else {
            warn!(page = %page.display(), "no conversation found");
            report.skipped.push(page);
            continue;
        };

        let output = unique_output(output_dir, &chat.title, &mut taken);
        fs::write(&output, &chat.markdown)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        info!(page = %page.display(), output = %output.display(), "exported chat");

        report.exported.push(ExportedFile {
            source: page,
            output,
            title: chat.title,
        });
    }

    Ok(report)
}
