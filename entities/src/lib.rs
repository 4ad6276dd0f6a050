//! Typed records of the portfolio site and the admin forms that produce them.
//!
//! Each collection has an explicit record struct. Admin screens edit a
//! display-form draft ([`forms`]) inside an [`EditorState`]; converting the
//! draft runs the shared content normalization from the `content` crate.

pub mod editor;
pub mod error;
pub mod forms;
pub mod record;

pub use editor::EditorState;
pub use error::{EntitiesError, Result};
pub use forms::{
    validate_email, BlogCategoryForm, BlogPostForm, CategoryForm, CategoryRecord,
    CertificateForm, ContactForm, ProjectCategoryForm, ProjectForm, RecordForm,
};
pub use record::{
    BlogCategory, BlogPost, Category, Certificate, Collection, ContactMessage, PostStatus,
    Project, ProjectCategory, Record,
};
