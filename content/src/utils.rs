//! Utility functions for content processing

use crate::error::ContentError;
use once_cell::sync::Lazy;
use regex::Regex;

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").expect("valid slug character pattern"));
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));
static HYPHEN_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("valid hyphen pattern"));
static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

/// Generate a URL slug from a title string
///
/// This function converts a title into a slug by:
/// 1. Converting to lowercase
/// 2. Removing everything except `a-z`, `0-9`, whitespace and hyphens
/// 3. Replacing whitespace runs with a single hyphen
/// 4. Collapsing hyphen runs
/// 5. Stripping hyphens from both ends
///
/// The result is idempotent: feeding a slug back in returns it unchanged.
///
/// # Example
///
/// ```rust
/// use content::generate_slug;
///
/// assert_eq!(generate_slug("Hello, World!  Foo--Bar"), "hello-world-foo-bar");
/// assert_eq!(generate_slug("Foo!!!"), "foo");
/// ```
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let filtered = NON_SLUG_CHARS.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&filtered, "-");
    let collapsed = HYPHEN_RUN.replace_all(&hyphenated, "-");

    collapsed.trim_matches('-').to_string()
}

/// Parse a comma-separated display string into a normalized list
///
/// Pieces are trimmed and empty pieces dropped. Order is preserved and
/// duplicates are kept.
///
/// # Example
///
/// ```rust
/// use content::parse_list;
///
/// assert_eq!(
///     parse_list("react, Next.js ,, Tailwind CSS"),
///     vec!["react", "Next.js", "Tailwind CSS"]
/// );
/// ```
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render a normalized list back into its comma-separated display form
pub fn join_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Strip markup tags from content
///
/// Removes every `<...>` span. An unterminated tag has no closing `>` to
/// match, so it is left in the output as-is. Whitespace is not touched.
///
/// # Arguments
///
/// * `markup` - HTML or Markdown content to strip
///
/// # Returns
///
/// Text with tags removed
pub fn strip_tags(markup: &str) -> String {
    MARKUP_TAG.replace_all(markup, "").into_owned()
}

/// Take at most `max_chars` characters from the start of `text`
///
/// Counts Unicode scalar values, so a multi-byte character is never split.
pub fn take_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Decode the handful of HTML entities produced by rich-text tooling
pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Validate that a string is a valid slug format
///
/// Valid slugs contain only lowercase letters, numbers, and hyphens.
///
/// # Arguments
///
/// * `slug` - The slug string to validate
///
/// # Returns
///
/// `Ok(())` if valid, `Err` with description if invalid
pub fn validate_slug_format(slug: &str) -> Result<(), ContentError> {
    if slug.is_empty() {
        return Err(ContentError::Validation("Slug cannot be empty".to_string()));
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ContentError::Validation(
            "Slug can only contain lowercase letters, numbers, and hyphens".to_string(),
        ));
    }

    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(ContentError::Validation(
            "Slug cannot start or end with hyphen".to_string(),
        ));
    }

    if slug.contains("--") {
        return Err(ContentError::Validation(
            "Slug cannot contain consecutive hyphens".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Hello World", "hello-world")]
    #[case("Hello, World!  Foo--Bar", "hello-world-foo-bar")]
    #[case("Test: With Punctuation!", "test-with-punctuation")]
    #[case("Multiple   Spaces", "multiple-spaces")]
    #[case("Numbers 123 Test", "numbers-123-test")]
    #[case("Foo!!!", "foo")]
    #[case("--Leading and trailing--", "leading-and-trailing")]
    #[case("  padded title  ", "padded-title")]
    #[case("Café Déjà Vu", "caf-dj-vu")]
    #[case("Tabs\tand\nnewlines", "tabs-and-newlines")]
    #[case("!!!", "")]
    #[case("", "")]
    fn test_generate_slug(#[case] title: &str, #[case] expected: &str) {
        assert_eq!(generate_slug(title), expected);
    }

    #[test]
    fn test_generate_slug_output_alphabet() {
        let titles = [
            "Rust & WebAssembly: A Primer",
            "-- 100% Pure --",
            "Ünïcödé everywhere",
            "a - - b",
            "Why I ❤️ Rust",
            " - ",
        ];

        for title in titles {
            let slug = generate_slug(title);
            assert!(
                slug.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "unexpected character in {slug:?}"
            );
            assert!(!slug.starts_with('-') && !slug.ends_with('-'), "{slug:?}");
            assert!(!slug.contains("--"), "{slug:?}");
        }
    }

    #[test]
    fn test_generate_slug_is_idempotent() {
        for title in ["Hello, World!  Foo--Bar", "Foo!!!", "", "  x  y  ", "A-B_C d"] {
            let once = generate_slug(title);
            assert_eq!(generate_slug(&once), once);
        }
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_list("react, Next.js ,, Tailwind CSS"),
            vec!["react", "Next.js", "Tailwind CSS"]
        );
        assert!(parse_list("").is_empty());
        assert!(parse_list(" , ,, ").is_empty());
        assert_eq!(parse_list("rust,rust, Rust"), vec!["rust", "rust", "Rust"]);
    }

    #[test]
    fn test_parse_list_matches_split_order() {
        let raw = "  b ,a,, c ,b ";
        let expected: Vec<String> = raw
            .split(',')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        assert_eq!(parse_list(raw), expected);
    }

    #[test]
    fn test_join_list_round_trip() {
        let raw = " tokio ,serde,, axum ";
        let parsed = parse_list(raw);
        assert_eq!(join_list(&parsed), "tokio, serde, axum");
        assert_eq!(parse_list(&join_list(&parsed)), parsed);
        assert_eq!(join_list::<String>(&[]), "");
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<p>Hello <b>World</b></p>"), "Hello World");
        assert_eq!(strip_tags("No tags here"), "No tags here");
        assert_eq!(strip_tags("<div>  two  spaces  </div>"), "  two  spaces  ");
        assert_eq!(strip_tags("<img src=\"a.png\"/>caption"), "caption");
    }

    #[test]
    fn test_strip_tags_leaves_unterminated_tag() {
        assert_eq!(strip_tags("<p>text</p><unterminated"), "text<unterminated");
    }

    #[test]
    fn test_take_chars() {
        assert_eq!(take_chars("hello", 3), "hel");
        assert_eq!(take_chars("hi", 10), "hi");
        assert_eq!(take_chars("héllo", 2), "hé");
        assert_eq!(take_chars("", 5), "");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("Q&amp;A &lt;3"), "Q&A <3");
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_validate_slug_format() {
        assert!(validate_slug_format("valid-slug-123").is_ok());
        assert!(validate_slug_format("").is_err());
        assert!(validate_slug_format("-starts-with-hyphen").is_err());
        assert!(validate_slug_format("ends-with-hyphen-").is_err());
        assert!(validate_slug_format("has--double--hyphen").is_err());
        assert!(validate_slug_format("has_underscore").is_err());
        assert!(validate_slug_format("UPPERCASE").is_err());
    }

    #[test]
    fn test_generated_slugs_pass_validation() {
        for title in ["Hello World", "Foo!!!", "Rust 2024: What's New?"] {
            assert!(validate_slug_format(&generate_slug(title)).is_ok());
        }
    }
}
