//! # Content Crate
//!
//! Content normalization shared by every admin editing form and by the public
//! pages that render stored records:
//!
//! - **Slug generation**: derive a URL-safe identifier from a title
//! - **List fields**: convert comma-separated tags, keywords and tech stacks
//!   to and from normalized lists
//! - **Read time**: estimate minutes to read from rich content
//! - **Excerpts**: derive a bounded preview when no excerpt was typed
//! - **Document import**: turn converted Word HTML into a pre-filled post
//!
//! Everything except the import validation is a pure, total function.
//!
//! ## Usage
//!
//! ```rust
//! use content::{derive_excerpt, estimate_read_minutes, generate_slug, parse_list};
//!
//! let slug = generate_slug("My First Post!");
//! let tags = parse_list("rust, web ,, cms");
//! let minutes = estimate_read_minutes("<p>Short post</p>");
//! let excerpt = derive_excerpt("<p>Short post</p>", None);
//!
//! assert_eq!(slug, "my-first-post");
//! assert_eq!(tags, vec!["rust", "web", "cms"]);
//! assert_eq!(minutes, 1);
//! assert_eq!(excerpt, "Short post...");
//! ```

pub mod derived;
pub mod error;
pub mod import;
pub mod utils;

// Re-export commonly used functions at the crate root
pub use derived::{
    count_words, derive_excerpt, estimate_read_minutes, summarize, EXCERPT_LENGTH,
    WORDS_PER_MINUTE,
};
pub use error::ContentError;
pub use import::{ensure_docx, import_document, ImportedDocument};
pub use utils::{generate_slug, join_list, parse_list, strip_tags, validate_slug_format};

/// Result type for content operations
pub type Result<T> = std::result::Result<T, ContentError>;
