//! Admin form drafts
//!
//! A form holds what the editor typed, in display form: list fields are
//! comma-separated strings and optional fields are possibly-blank text.
//! Converting a form runs the content normalization that every record gets
//! before it is persisted.

use crate::record::{
    BlogCategory, BlogPost, Category, Certificate, ContactMessage, PostStatus, Project,
    ProjectCategory, Record,
};
use crate::{EntitiesError, Result};
use content::{
    estimate_read_minutes, generate_slug, join_list, parse_list, validate_slug_format,
    ImportedDocument,
};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Conversion between an editable form and the record it produces
pub trait RecordForm: Clone + Default {
    type Record: Record;

    /// Validate the form and build the normalized record
    fn to_record(&self) -> Result<Self::Record>;

    /// Fill a form from a stored record for editing
    fn from_record(record: &Self::Record) -> Self;
}

fn required(value: &str, field: &'static str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EntitiesError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn normalized_slug(slug: &str, fallback: &str) -> Result<String> {
    let slug = if slug.trim().is_empty() {
        generate_slug(fallback)
    } else {
        generate_slug(slug)
    };
    validate_slug_format(&slug)?;
    Ok(slug)
}

/// Validate the shape of an email address
///
/// Accepts `local@domain.tld`: a non-empty local part, a dotted domain and
/// no whitespace.
pub fn validate_email(email: &str) -> Result<()> {
    let invalid = || EntitiesError::Validation(format!("Invalid email address: '{}'", email));

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(invalid());
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogPostForm {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    pub tags: String,
    pub keywords: String,
    pub featured_image: String,
    pub status: PostStatus,
    pub is_featured: bool,
}

impl BlogPostForm {
    /// Pre-fill a form from an imported document
    ///
    /// The excerpt stays blank so it keeps following the content; the
    /// document's derived excerpt is only a preview.
    pub fn from_import(document: ImportedDocument) -> Self {
        Self {
            title: document.title,
            slug: document.slug,
            content: document.content,
            ..Self::default()
        }
    }
}

impl RecordForm for BlogPostForm {
    type Record = BlogPost;

    fn to_record(&self) -> Result<BlogPost> {
        let title = required(&self.title, "title")?;
        if self.content.trim().is_empty() {
            return Err(EntitiesError::MissingField("content"));
        }
        let slug = normalized_slug(&self.slug, &title)?;

        Ok(BlogPost {
            slug,
            // Only a typed excerpt is stored; readers derive one from the content
            excerpt: optional(&self.excerpt),
            read_time: Some(estimate_read_minutes(&self.content)),
            content: self.content.clone(),
            category: optional(&self.category),
            tags: parse_list(&self.tags),
            keywords: parse_list(&self.keywords),
            featured_image: optional(&self.featured_image),
            status: self.status,
            is_featured: self.is_featured,
            title,
        })
    }

    fn from_record(record: &BlogPost) -> Self {
        Self {
            title: record.title.clone(),
            slug: record.slug.clone(),
            content: record.content.clone(),
            excerpt: record.excerpt.clone().unwrap_or_default(),
            category: record.category.clone().unwrap_or_default(),
            tags: join_list(&record.tags),
            keywords: join_list(&record.keywords),
            featured_image: record.featured_image.clone().unwrap_or_default(),
            status: record.status,
            is_featured: record.is_featured,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub tech_stack: String,
    pub link: String,
    pub image: String,
    pub category: String,
    pub live_url: String,
    pub github_url: String,
    pub is_live: bool,
    pub is_code_available: bool,
}

impl RecordForm for ProjectForm {
    type Record = Project;

    fn to_record(&self) -> Result<Project> {
        Ok(Project {
            title: required(&self.title, "title")?,
            description: required(&self.description, "description")?,
            tech_stack: parse_list(&self.tech_stack),
            link: optional(&self.link),
            image: optional(&self.image),
            category: optional(&self.category),
            live_url: optional(&self.live_url),
            github_url: optional(&self.github_url),
            is_live: self.is_live,
            is_code_available: self.is_code_available,
        })
    }

    fn from_record(record: &Project) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            tech_stack: join_list(&record.tech_stack),
            link: record.link.clone().unwrap_or_default(),
            image: record.image.clone().unwrap_or_default(),
            category: record.category.clone().unwrap_or_default(),
            live_url: record.live_url.clone().unwrap_or_default(),
            github_url: record.github_url.clone().unwrap_or_default(),
            is_live: record.is_live,
            is_code_available: record.is_code_available,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateForm {
    pub title: String,
    pub issuer: String,
    pub image: String,
}

impl RecordForm for CertificateForm {
    type Record = Certificate;

    fn to_record(&self) -> Result<Certificate> {
        Ok(Certificate {
            title: required(&self.title, "title")?,
            issuer: required(&self.issuer, "issuer")?,
            image: optional(&self.image),
        })
    }

    fn from_record(record: &Certificate) -> Self {
        Self {
            title: record.title.clone(),
            issuer: record.issuer.clone(),
            image: record.image.clone().unwrap_or_default(),
        }
    }
}

/// The public contact form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl RecordForm for ContactForm {
    type Record = ContactMessage;

    fn to_record(&self) -> Result<ContactMessage> {
        let name = required(&self.name, "name")?;
        let email = required(&self.email, "email")?;
        validate_email(&email)?;
        if self.message.trim().is_empty() {
            return Err(EntitiesError::MissingField("message"));
        }

        Ok(ContactMessage {
            name,
            email,
            message: self.message.clone(),
        })
    }

    fn from_record(record: &ContactMessage) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            message: record.message.clone(),
        }
    }
}

/// Record types that wrap a plain [`Category`]
pub trait CategoryRecord: Record {
    fn from_category(category: Category) -> Self;
    fn category(&self) -> &Category;
}

impl CategoryRecord for BlogCategory {
    fn from_category(category: Category) -> Self {
        BlogCategory(category)
    }

    fn category(&self) -> &Category {
        &self.0
    }
}

impl CategoryRecord for ProjectCategory {
    fn from_category(category: Category) -> Self {
        ProjectCategory(category)
    }

    fn category(&self) -> &Category {
        &self.0
    }
}

/// Form for a blog or project category; the slug follows the name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryForm<C> {
    pub name: String,
    kind: PhantomData<C>,
}

pub type BlogCategoryForm = CategoryForm<BlogCategory>;
pub type ProjectCategoryForm = CategoryForm<ProjectCategory>;

impl<C> CategoryForm<C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PhantomData,
        }
    }
}

impl<C> Default for CategoryForm<C> {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl<C: CategoryRecord> RecordForm for CategoryForm<C> {
    type Record = C;

    fn to_record(&self) -> Result<C> {
        let name = required(&self.name, "name")?;
        let slug = normalized_slug("", &name)?;
        Ok(C::from_category(Category { name, slug }))
    }

    fn from_record(record: &C) -> Self {
        Self::new(record.category().name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use content::import_document;

    fn blog_form() -> BlogPostForm {
        BlogPostForm {
            title: "  Hello, World!  ".to_string(),
            content: format!("<p>{}</p>", "word ".repeat(450)),
            tags: "rust, web ,, cms".to_string(),
            keywords: "ssr".to_string(),
            ..BlogPostForm::default()
        }
    }

    #[test]
    fn test_blog_form_derives_fields() {
        let post = blog_form().to_record().unwrap();

        assert_eq!(post.title, "Hello, World!");
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.tags, vec!["rust", "web", "cms"]);
        assert_eq!(post.keywords, vec!["ssr"]);
        assert_eq!(post.read_time, Some(3));
        assert_eq!(post.excerpt, None);
        assert_eq!(post.category, None);
        assert_eq!(post.featured_image, None);
    }

    #[test]
    fn test_blog_form_keeps_explicit_excerpt_and_slug() {
        let form = BlogPostForm {
            slug: "Custom Slug".to_string(),
            excerpt: "Hand written".to_string(),
            ..blog_form()
        };
        let post = form.to_record().unwrap();

        assert_eq!(post.slug, "custom-slug");
        assert_eq!(post.excerpt.as_deref(), Some("Hand written"));
    }

    #[test]
    fn test_blog_form_required_fields() {
        let missing_title = BlogPostForm {
            title: "   ".to_string(),
            ..blog_form()
        };
        assert!(matches!(
            missing_title.to_record(),
            Err(EntitiesError::MissingField("title"))
        ));

        let missing_content = BlogPostForm {
            content: String::new(),
            ..blog_form()
        };
        assert!(matches!(
            missing_content.to_record(),
            Err(EntitiesError::MissingField("content"))
        ));
    }

    #[test]
    fn test_blog_form_rejects_title_without_slug_characters() {
        let form = BlogPostForm {
            title: "???".to_string(),
            ..blog_form()
        };
        assert!(matches!(form.to_record(), Err(EntitiesError::Content(_))));
    }

    #[test]
    fn test_blog_form_round_trips_through_record() {
        let post = blog_form().to_record().unwrap();
        let form = BlogPostForm::from_record(&post);

        assert_eq!(form.tags, "rust, web, cms");
        assert_eq!(form.to_record().unwrap(), post);
    }

    #[test]
    fn test_blog_form_from_import() {
        let form = BlogPostForm::from_import(import_document("<h1>Trip Report</h1><p>Day one</p>"));
        assert_eq!(form.title, "Trip Report");
        assert_eq!(form.slug, "trip-report");
        assert_eq!(form.content, "<p>Day one</p>");
        assert_eq!(form.excerpt, "");

        let post = form.to_record().unwrap();
        assert_eq!(post.excerpt, None);
    }

    #[test]
    fn test_edited_content_does_not_keep_old_excerpt() {
        let first = BlogPostForm {
            content: "<p>Old body</p>".to_string(),
            ..blog_form()
        }
        .to_record()
        .unwrap();

        let mut form = BlogPostForm::from_record(&first);
        assert_eq!(form.excerpt, "");
        form.content = "<p>New body</p>".to_string();

        let second = form.to_record().unwrap();
        assert_eq!(second.excerpt, None);
        assert_eq!(
            content::derive_excerpt(&second.content, second.excerpt.as_deref()),
            "New body..."
        );
    }

    #[test]
    fn test_blank_excerpt_is_not_stored() {
        let form = BlogPostForm {
            excerpt: "   ".to_string(),
            ..blog_form()
        };
        assert_eq!(form.to_record().unwrap().excerpt, None);
    }

    #[test]
    fn test_project_form() {
        let form = ProjectForm {
            title: "Portfolio".to_string(),
            description: "My site".to_string(),
            tech_stack: "react, Next.js ,, Tailwind CSS".to_string(),
            link: " ".to_string(),
            github_url: "https://github.com/me/site".to_string(),
            is_code_available: true,
            ..ProjectForm::default()
        };
        let project = form.to_record().unwrap();

        assert_eq!(project.tech_stack, vec!["react", "Next.js", "Tailwind CSS"]);
        assert_eq!(project.link, None);
        assert_eq!(project.github_url.as_deref(), Some("https://github.com/me/site"));
        assert_eq!(
            ProjectForm::from_record(&project).tech_stack,
            "react, Next.js, Tailwind CSS"
        );

        let missing = ProjectForm {
            description: String::new(),
            ..form
        };
        assert!(matches!(
            missing.to_record(),
            Err(EntitiesError::MissingField("description"))
        ));
    }

    #[test]
    fn test_certificate_form() {
        let form = CertificateForm {
            title: "Rust Fundamentals".to_string(),
            issuer: String::new(),
            image: String::new(),
        };
        assert!(matches!(
            form.to_record(),
            Err(EntitiesError::MissingField("issuer"))
        ));

        let form = CertificateForm {
            issuer: "Ferrous Academy".to_string(),
            ..form
        };
        let certificate = form.to_record().unwrap();
        assert_eq!(certificate.issuer, "Ferrous Academy");
        assert_eq!(certificate.image, None);
    }

    #[test]
    fn test_contact_form() {
        let form = ContactForm {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            message: "Hello there".to_string(),
        };
        assert_eq!(form.to_record().unwrap().email, "sam@example.com");

        let bad_email = ContactForm {
            email: "sam@localhost".to_string(),
            ..form.clone()
        };
        assert!(matches!(
            bad_email.to_record(),
            Err(EntitiesError::Validation(_))
        ));

        let no_message = ContactForm {
            message: "  ".to_string(),
            ..form
        };
        assert!(matches!(
            no_message.to_record(),
            Err(EntitiesError::MissingField("message"))
        ));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("first.last@mail.example.org").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("@b.co").is_err());
        assert!(validate_email("a@.co").is_err());
        assert!(validate_email("a@b.").is_err());
        assert!(validate_email("a@b@c.co").is_err());
        assert!(validate_email("a b@c.co").is_err());
    }

    #[test]
    fn test_category_forms() {
        let category = BlogCategoryForm::new("Systems Programming").to_record().unwrap();
        assert_eq!(category.0.slug, "systems-programming");
        assert_eq!(BlogCategoryForm::from_record(&category).name, "Systems Programming");

        let project_category = ProjectCategoryForm::new("Web Apps").to_record().unwrap();
        assert_eq!(project_category.category().slug, "web-apps");

        assert!(matches!(
            ProjectCategoryForm::default().to_record(),
            Err(EntitiesError::MissingField("name"))
        ));
    }
}
