//! Conversation export from saved DeepSeek pages

use deepseek_toolkit::dom::{parse_document, Document, Element};
use deepseek_toolkit::error::ExportError;
use deepseek_toolkit::export::{export_batch, export_filename};
use deepseek_toolkit::extractor::{export_chat, ConversationExtractor};
use deepseek_toolkit::models::{ExportResponse, Role};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

const SAVED_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Sorting in Rust – DeepSeek</title><style>.ds-markdown { color: red }</style></head>
<body>
  <div class="sidebar"><div class="chat-title">Sidebar title</div></div>
  <div class="conversation">
    <div class="_9663006 ds-message">
      <div class="fbb737a4">How do I sort a <code>Vec</code>?</div>
    </div>
    <div class="_4f9bf79 ds-message">
      <div class="ds-think-content">
        <div class="ds-markdown"><p>The user wants sorting...</p></div>
      </div>
      <div class="ds-markdown ds-markdown--block">
        <h3>Sorting</h3>
        <p>Call <code>sort</code> on the vector:</p>
        <pre><code class="language-rust">let mut v = vec![3, 1, 2];
v.sort();
</code></pre>
        <ul>
          <li><strong>sort</strong> is stable</li>
          <li><em>sort_unstable</em> is faster</li>
        </ul>
        <p>See <a href="https://doc.rust-lang.org/std/vec/struct.Vec.html">the docs</a>.</p>
      </div>
    </div>
    <div class="_9663006 ds-message">
      <div class="fbb737a4">Thanks!<br>And descending?</div>
    </div>
    <div class="_4f9bf79 ds-message">
      <div class="ds-markdown"><table>
        <tr><th>Method</th><th>Order</th></tr>
        <tr><td><code>sort_by(|a, b| b.cmp(a))</code></td><td>descending</td></tr>
      </table></div>
    </div>
  </div>
  <script>window.__state = {};</script>
</body>
</html>"#;

const EXPECTED_MARKDOWN: &str = "# Sorting in Rust

---

## User

How do I sort a Vec?

---

## Assistant

### Sorting

Call `sort` on the vector:

```rust
let mut v = vec![3, 1, 2];
v.sort();
```

- **sort** is stable
- *sort_unstable* is faster

See [the docs](https://doc.rust-lang.org/std/vec/struct.Vec.html).

---

## User

Thanks!
And descending?

---

## Assistant

| Method | Order |
| --- | --- |
| `sort_by(\\|a, b\\| b.cmp(a))` | descending |

";

#[test]
fn test_saved_page_exports_to_markdown() {
    let document = parse_document(SAVED_PAGE);
    let chat = export_chat(&document).unwrap();

    assert_eq!(chat.title, "Sorting in Rust");
    assert_eq!(chat.markdown, EXPECTED_MARKDOWN);
    assert_eq!(export_filename(&chat.title), "sorting-in-rust.md");
}

#[test]
fn test_roles_alternate_in_document_order() {
    let document = parse_document(SAVED_PAGE);
    let roles: Vec<Role> = ConversationExtractor::default()
        .discover(&document)
        .iter()
        .map(|turn| turn.role)
        .collect();

    assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User, Role::Assistant]);
}

#[test]
fn test_minimal_exchange() {
    let body = Element::new("body")
        .with_child(Element::new("div").with_class("ds-message").with_text("Hi"))
        .with_child(
            Element::new("div").with_class("ds-message").with_child(
                Element::new("div").with_class("ds-markdown").with_child(
                    Element::new("pre").with_child(
                        Element::new("code")
                            .with_class("language-python")
                            .with_text("print(1)"),
                    ),
                ),
            ),
        );
    let chat = export_chat(&Document::new("", body)).unwrap();

    assert_eq!(
        chat.markdown,
        "# Hi\n\n---\n\n## User\n\nHi\n\n---\n\n## Assistant\n\n```python\nprint(1)\n```\n\n"
    );
}

#[test]
fn test_export_response_json() {
    let ok = ExportResponse::from(export_chat(&parse_document(SAVED_PAGE)));
    let value = serde_json::to_value(&ok).unwrap();
    assert_eq!(value["title"], "Sorting in Rust");
    assert!(value.get("error").is_none());

    let empty = ExportResponse::from(export_chat(&parse_document("<main></main>")));
    assert_eq!(
        serde_json::to_value(&empty).unwrap(),
        serde_json::json!({ "error": "No conversation found on this page." })
    );
    assert_eq!(
        export_chat(&parse_document("<main></main>")),
        Err(ExportError::NoConversation)
    );
}

#[test]
fn test_batch_export_single_file() {
    let dir = TempDir::new().unwrap();
    let page = dir.path().join("saved.html");
    fs::write(&page, SAVED_PAGE).unwrap();

    let out = dir.path().join("out");
    let report = export_batch(&page, &out).unwrap();

    assert_eq!(report.exported.len(), 1);
    assert_eq!(report.exported[0].output, out.join("sorting-in-rust.md"));
    assert_eq!(fs::read_to_string(out.join("sorting-in-rust.md")).unwrap(), EXPECTED_MARKDOWN);
}
