//! Derived fields: read time and excerpts
//!
//! Both the admin write path and the public read path call these, so a value
//! computed at save time always matches one re-derived at render time.

use crate::utils::{strip_tags, take_chars};

/// Reading speed used for read-time estimates
pub const WORDS_PER_MINUTE: usize = 200;

/// Length of a derived excerpt, before the ellipsis
pub const EXCERPT_LENGTH: usize = 200;

const ELLIPSIS: &str = "...";

/// Count the words of rich content after stripping markup
///
/// Empty or whitespace-only content has zero words.
pub fn count_words(content: &str) -> usize {
    strip_tags(content).split_whitespace().count()
}

/// Estimate how many minutes it takes to read `content`
///
/// Returns `ceil(words / 200)`, floored at 1 so that an empty post still
/// reports "1 min read".
///
/// # Example
///
/// ```rust
/// use content::estimate_read_minutes;
///
/// let body = format!("<p>{}</p>", "word ".repeat(400));
/// assert_eq!(estimate_read_minutes(&body), 2);
/// assert_eq!(estimate_read_minutes(""), 1);
/// ```
pub fn estimate_read_minutes(content: &str) -> u32 {
    let minutes = count_words(content).div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Strip markup and cut the text to `max_chars`, always appending `...`
pub fn summarize(content: &str, max_chars: usize) -> String {
    let text = strip_tags(content);
    format!("{}{}", take_chars(&text, max_chars), ELLIPSIS)
}

/// Derive the excerpt shown for a record
///
/// An explicit, non-empty excerpt wins and is returned verbatim. Otherwise
/// the first 200 characters of the stripped content are used, followed by
/// `...` even when the content is shorter than that.
///
/// # Arguments
///
/// * `content` - Rich content of the record
/// * `explicit_excerpt` - Excerpt typed by the editor, if any
///
/// # Returns
///
/// The excerpt to store or display
pub fn derive_excerpt(content: &str, explicit_excerpt: Option<&str>) -> String {
    match explicit_excerpt {
        Some(excerpt) if !excerpt.is_empty() => excerpt.to_string(),
        _ => summarize(content, EXCERPT_LENGTH),
    }
}
