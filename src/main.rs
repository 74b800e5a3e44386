//! DeepSeek toolkit CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use deepseek_toolkit::export::export_batch;
use deepseek_toolkit::settings::{is_curated_language, FileStore, Settings, SettingsCache, CURATED_LANGUAGES};
use deepseek_toolkit::transformer::{DirectiveInjector, ShorthandExpander};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "deepseek-toolkit")]
#[command(about = "Quick prompts, directive injection and chat export for DeepSeek", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (JSON or JSON5)
    #[arg(short, long, global = true, default_value = "deepseek-toolkit.json")]
    settings: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export saved chat pages to Markdown
    Export {
        /// Saved page (.html/.htm) or a directory of them
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for the Markdown files
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Expand quick prompt codes in a message (reads stdin without TEXT)
    Expand { text: Option<String> },

    /// Add the rules and language directives to a message (reads stdin without TEXT)
    Inject { text: Option<String> },

    /// List the curated response languages
    Languages,

    /// Inspect or edit the stored settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

impl Toggle {
    fn enabled(self) -> bool {
        matches!(self, Toggle::On)
    }
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Print the current settings
    Show,
    /// Install the default quick prompts and rules where none are stored
    Init,
    SetLanguage { language: String },
    LanguageEnforce { state: Toggle },
    RulesEnforce { state: Toggle },
    /// Add a rule, or replace rule N's text with --edit N
    AddRule {
        text: String,
        #[arg(long)]
        edit: Option<usize>,
    },
    /// Enable or disable rule N (1-based)
    ToggleRule { number: usize },
    RemoveRule { number: usize },
    /// Add a quick prompt, or replace an existing one with --edit CODE
    AddPrompt {
        code: String,
        prompt: String,
        #[arg(long)]
        edit: Option<String>,
    },
    RemovePrompt { code: String },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn fail(message: &str, detail: impl std::fmt::Display) -> ! {
    eprintln!("{}", format!("❌ {}", message).red().bold());
    eprintln!("{}", format!("Error: {}", detail).red());
    std::process::exit(1);
}

fn read_message(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read message from stdin")?;
            Ok(buffer)
        }
    }
}

/// Rule numbers on the command line start at 1
fn rule_index(number: usize) -> usize {
    match number.checked_sub(1) {
        Some(index) => index,
        None => fail("Unable to update rule.", "rule numbers start at 1"),
    }
}

fn load_cache(settings: &Settings<FileStore>) -> SettingsCache {
    match SettingsCache::load(settings) {
        Ok(cache) => cache,
        Err(e) => fail("Unable to load settings.", e),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut settings = Settings::new(FileStore::new(&cli.settings));

    match cli.command {
        Commands::Export { input, output } => {
            println!("{}", "DeepSeek Chat Export".bold().blue());
            println!("{}", "=".repeat(50).blue());
            println!();

            match export_batch(&input, &output) {
                Ok(report) => {
                    for file in &report.exported {
                        println!("  {} {} → {}", "✓".green(), file.title, file.output.display());
                    }
                    for page in &report.skipped {
                        println!(
                            "  {} {} ({})",
                            "-".yellow(),
                            page.display(),
                            "No conversation found on this page.".dimmed()
                        );
                    }
                    println!();
                    if report.exported.is_empty() {
                        println!("{}", "Nothing to export.".yellow().bold());
                    } else {
                        println!(
                            "{}",
                            format!("✅ Exported {} chat(s)", report.exported.len()).green().bold()
                        );
                    }
                }
                Err(e) => fail("Export failed!", e),
            }
        }

        Commands::Expand { text } => {
            let message = read_message(text).unwrap_or_else(|e| fail("Could not read message.", e));
            let cache = load_cache(&settings);
            let expanded = ShorthandExpander::new(cache.prompts()).expand_text(&message);
            print!("{}", expanded.unwrap_or(message));
        }

        Commands::Inject { text } => {
            let message = read_message(text).unwrap_or_else(|e| fail("Could not read message.", e));
            let cache = load_cache(&settings);
            let injected = DirectiveInjector::from_settings(&cache).apply(&message);
            print!("{}", injected.unwrap_or(message));
        }

        Commands::Languages => {
            let selected = settings.get_selected_language().unwrap_or_default();
            for language in CURATED_LANGUAGES {
                if *language == selected {
                    println!("{} {}", "*".green(), language.green().bold());
                } else {
                    println!("  {}", language);
                }
            }
        }

        Commands::Settings { action } => run_settings(&mut settings, action),
    }
}

fn run_settings(settings: &mut Settings<FileStore>, action: SettingsCommand) {
    match action {
        SettingsCommand::Show => {
            let cache = load_cache(settings);
            let has_language = settings.has_selected_language().unwrap_or(false);
            let theme = settings.get_theme().map(|t| t.as_str()).unwrap_or("dark");
            let prompts = settings.get_quick_prompts().unwrap_or_default();

            println!("{}", "📋 Settings".bold().blue());
            println!("{}", "=".repeat(50).blue());
            println!("File: {}", settings.store().path().display());
            if has_language {
                println!("Saved language: {}", cache.selected_language());
            } else {
                println!("Language: {} {}", cache.selected_language(), "(default)".dimmed());
            }
            println!("Language enforcement: {}", on_off(cache.language_enforce()));
            println!("Rules enforcement: {}", on_off(cache.rules_enforce()));
            println!("Theme: {}", theme);
            println!();

            println!("{}", format!("Quick prompts ({})", prompts.len()).bold());
            for prompt in &prompts {
                let first_line = prompt.prompt.lines().next().unwrap_or("");
                println!("  {}  {}", prompt.code.cyan(), first_line.dimmed());
            }
            println!();

            println!("{}", format!("Rules ({})", cache.rules().len()).bold());
            for (i, rule) in cache.rules().iter().enumerate() {
                let marker = if rule.enabled { "✓".green() } else { "✗".red() };
                println!("  {} #{} {}", marker, i + 1, rule.text);
            }
        }

        SettingsCommand::Init => match settings.seed_defaults() {
            Ok(true) => println!("{}", "Default quick prompts and rules installed.".green()),
            Ok(false) => println!("{}", "Quick prompts and rules already present.".dimmed()),
            Err(e) => fail("Unable to install defaults.", e),
        },

        SettingsCommand::SetLanguage { language } => {
            if language.trim().is_empty() {
                fail("Please choose a language.", "empty language name");
            }
            if !is_curated_language(&language) {
                println!("{}", format!("⚠️  '{}' is not in the curated list", language.trim()).yellow());
            }
            match settings.set_selected_language(&language) {
                Ok(saved) => println!("{} {}", "Language saved.".green(), saved),
                Err(e) => fail("Unable to save language.", e),
            }
        }

        SettingsCommand::LanguageEnforce { state } => {
            match settings.set_active_language_enforce(state.enabled()) {
                Ok(true) => println!("{}", "Language enforcement enabled.".green()),
                Ok(false) => println!("{}", "Language enforcement disabled.".green()),
                Err(e) => fail("Unable to update enforcement.", e),
            }
        }

        SettingsCommand::RulesEnforce { state } => {
            match settings.set_active_rules_enforce(state.enabled()) {
                Ok(true) => println!("{}", "Rules enforcement enabled.".green()),
                Ok(false) => println!("{}", "Rules enforcement disabled.".green()),
                Err(e) => fail("Unable to update rules enforcement.", e),
            }
        }

        SettingsCommand::AddRule { text, edit } => {
            let editing = edit.map(rule_index);
            match settings.save_rule(&text, editing) {
                Ok(_) => println!("{}", "Rule saved.".green()),
                Err(e) => fail("Unable to save rule.", e),
            }
        }

        SettingsCommand::ToggleRule { number } => {
            let index = rule_index(number);
            match settings.toggle_rule(index) {
                Ok(rules) => {
                    let state = rules
                        .get(index)
                        .map(|r| on_off(r.enabled))
                        .unwrap_or_default();
                    println!("{} #{} {}", "Rule".green(), number, state);
                }
                Err(e) => fail("Unable to update rule.", e),
            }
        }

        SettingsCommand::RemoveRule { number } => {
            match settings.remove_rule(rule_index(number)) {
                Ok(_) => println!("{}", "Rule deleted.".green()),
                Err(e) => fail("Unable to delete rule.", e),
            }
        }

        SettingsCommand::AddPrompt { code, prompt, edit } => {
            match settings.save_quick_prompt(&code, &prompt, edit.as_deref()) {
                Ok(_) => println!("{}", "Prompt saved.".green()),
                Err(e) => fail("Unable to save prompt.", e),
            }
        }

        SettingsCommand::RemovePrompt { code } => match settings.remove_quick_prompt(&code) {
            Ok(_) => println!("{} {}", "Deleted".green(), code.trim()),
            Err(e) => fail("Unable to delete prompt.", e),
        },
    }
}

fn on_off(enabled: bool) -> ColoredString {
    if enabled {
        "on".green()
    } else {
        "off".red()
    }
}
