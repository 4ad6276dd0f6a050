//! Word document import
//!
//! A converter outside this crate turns a `.docx` upload into raw HTML. This
//! module picks a title out of that HTML, cleans up the word-processor
//! markup and derives the slug and excerpt the same way a hand-typed post
//! would get them.

use crate::derived::derive_excerpt;
use crate::error::ContentError;
use crate::utils::{decode_entities, generate_slug, strip_tags, take_chars};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Title used when the document yields none
pub const DEFAULT_TITLE: &str = "Imported Document";

/// Slug used when the title yields none
pub const DEFAULT_SLUG: &str = "imported-document";

/// Longest title taken from a leading paragraph
pub const PARAGRAPH_TITLE_LENGTH: usize = 100;

static HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<h[1-3](?:\s[^>]*)?>(.*?)</h[1-3]\s*>").expect("valid heading pattern")
});
static PARAGRAPH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<p(?:\s[^>]*)?>(.*?)</p\s*>").expect("valid paragraph pattern")
});
static BOLD_PARAGRAPH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<p><strong>(.*?)</strong></p>").expect("valid bold paragraph pattern")
});
static BOLD_STYLED_PARAGRAPH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<p style="font-weight: bold">(.*?)</p>"#).expect("valid styled paragraph pattern")
});
static STYLE_ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"style="[^"]*""#).expect("valid style attribute pattern"));
static SPAN_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<span[^>]*>").expect("valid span pattern"));
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Result of importing a converted document, ready to pre-fill a blog form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedDocument {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
}

/// Reject uploads that are not `.docx` files
pub fn ensure_docx(file_name: &str) -> Result<(), ContentError> {
    if file_name.ends_with(".docx") {
        Ok(())
    } else {
        Err(ContentError::UnsupportedFormat(format!(
            "Please upload a .docx file (got '{}')",
            file_name
        )))
    }
}

/// Build an [`ImportedDocument`] from converter HTML
///
/// # Example
///
/// ```rust
/// use content::import_document;
///
/// let doc = import_document("<h1>My Trip</h1><p>Day <span>one</span>.</p>");
/// assert_eq!(doc.title, "My Trip");
/// assert_eq!(doc.slug, "my-trip");
/// assert_eq!(doc.content, "<p>Day one.</p>");
/// ```
pub fn import_document(html: &str) -> ImportedDocument {
    let (title, body) = extract_title(html);
    let content = clean_word_markup(&body);
    let slug = generate_slug(&title);
    let excerpt = derive_excerpt(&content, None);

    debug!(
        "Imported document '{}' ({} bytes of cleaned content)",
        title,
        content.len()
    );

    ImportedDocument {
        title: if title.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            title
        },
        slug: if slug.is_empty() {
            DEFAULT_SLUG.to_string()
        } else {
            slug
        },
        content,
        excerpt,
    }
}

/// Pick the document title and return the remaining body
///
/// The first `h1`-`h3` heading becomes the title and is removed from the
/// body. Without one, the first paragraph supplies a title of at most 100
/// characters and stays in the body. A blank first paragraph gives no title;
/// later paragraphs are not consulted.
pub fn extract_title(html: &str) -> (String, String) {
    if let Some(captures) = HEADING.captures(html) {
        let whole = captures.get(0).map_or(0..0, |m| m.range());
        let title = element_text(captures.get(1).map_or("", |m| m.as_str()));
        let body = format!("{}{}", &html[..whole.start], &html[whole.end..]);
        return (title, body);
    }

    let title = PARAGRAPH
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|inner| take_chars(&element_text(inner.as_str()), PARAGRAPH_TITLE_LENGTH).to_string())
        .unwrap_or_default();

    (title, html.to_string())
}

/// Rewrite word-processor markup into plain semantic HTML
///
/// Bold-only paragraphs become `h3` headings, inline styles and `span`
/// wrappers are dropped, and whitespace is collapsed.
pub fn clean_word_markup(html: &str) -> String {
    let html = BOLD_PARAGRAPH.replace_all(html, "<h3>${1}</h3>");
    let html = BOLD_STYLED_PARAGRAPH.replace_all(&html, "<h3>${1}</h3>");
    let html = STYLE_ATTRIBUTE.replace_all(&html, "");
    let html = SPAN_OPEN.replace_all(&html, "");
    let html = html.replace("</span>", "");
    let html = WHITESPACE_RUN.replace_all(&html, " ");

    html.trim().to_string()
}

fn element_text(inner_html: &str) -> String {
    decode_entities(&strip_tags(inner_html)).trim().to_string()
}
