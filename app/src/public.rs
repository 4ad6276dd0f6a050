//! Read path of the public site.
//!
//! Derived blog fields are re-computed here with the same content functions
//! the admin forms use, so records written without them still render.

use crate::{Result, SiteConfig};
use chrono::{DateTime, Datelike, Utc};
use content::{derive_excerpt, estimate_read_minutes, summarize};
use database::{ListQuery, RecordStore, Records, Stored};
use entities::{
    BlogPost, Certificate, ContactForm, ContactMessage, PostStatus, Project, RecordForm,
};
use serde::Serialize;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// Characters of content shown as a featured post preview
pub const FEATURED_PREVIEW_LENGTH: usize = 150;

/// Characters of content used as a post page description
pub const DESCRIPTION_LENGTH: usize = 160;

/// Tags shown on a featured post card before the overflow count
pub const FEATURED_TAG_LIMIT: usize = 3;

/// A post as listed on the blog index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogCard {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub featured_image: Option<String>,
    pub read_time: u32,
    pub created_at: DateTime<Utc>,
}

impl From<Stored<BlogPost>> for BlogCard {
    fn from(stored: Stored<BlogPost>) -> Self {
        let post = stored.record;
        Self {
            excerpt: derive_excerpt(&post.content, post.excerpt.as_deref()),
            read_time: read_time(&post),
            id: stored.id,
            title: post.title,
            slug: post.slug,
            category: post.category,
            tags: post.tags,
            featured_image: post.featured_image,
            created_at: stored.created_at,
        }
    }
}

/// A post as shown in the home page featured section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturedPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub preview: String,
    pub tags: Vec<String>,
    /// Tags not shown on the card
    pub hidden_tags: usize,
    pub featured_image: Option<String>,
    pub read_time: u32,
    pub created_at: DateTime<Utc>,
}

impl From<Stored<BlogPost>> for FeaturedPost {
    fn from(stored: Stored<BlogPost>) -> Self {
        let mut post = stored.record;
        let preview = match post.excerpt.as_deref() {
            Some(excerpt) if !excerpt.is_empty() => excerpt.to_string(),
            _ => summarize(&post.content, FEATURED_PREVIEW_LENGTH),
        };
        let hidden_tags = post.tags.len().saturating_sub(FEATURED_TAG_LIMIT);
        post.tags.truncate(FEATURED_TAG_LIMIT);

        Self {
            read_time: read_time(&post),
            id: stored.id,
            title: post.title,
            slug: post.slug,
            preview,
            tags: post.tags,
            hidden_tags,
            featured_image: post.featured_image,
            created_at: stored.created_at,
        }
    }
}

/// Title and description of a rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: Option<String>,
}

impl PageMetadata {
    pub fn not_found() -> Self {
        Self {
            title: "Blog Post Not Found".to_string(),
            description: None,
        }
    }
}

/// A single post page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogArticle {
    pub post: Stored<BlogPost>,
    pub read_time: u32,
    pub metadata: PageMetadata,
}

/// Figures shown above the certificate gallery
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CertificateStats {
    pub total: usize,
    /// Distinct issuers
    pub organizations: usize,
    /// Calendar years from the earliest certificate to now, inclusive; 0
    /// without certificates
    pub years_learning: i32,
}

impl CertificateStats {
    pub fn from_certificates(certificates: &[Stored<Certificate>], now: DateTime<Utc>) -> Self {
        let organizations = certificates
            .iter()
            .map(|c| c.record.issuer.as_str())
            .collect::<HashSet<_>>()
            .len();
        let years_learning = certificates
            .iter()
            .map(|c| c.created_at.year())
            .min()
            .map_or(0, |first| now.year() - first + 1);

        Self {
            total: certificates.len(),
            organizations,
            years_learning,
        }
    }
}

fn read_time(post: &BlogPost) -> u32 {
    post.read_time
        .unwrap_or_else(|| estimate_read_minutes(&post.content))
}

pub struct PublicSite {
    store: Arc<dyn RecordStore>,
    config: SiteConfig,
}

impl PublicSite {
    pub fn new(store: Arc<dyn RecordStore>, config: SiteConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    fn records<T: database::Record>(&self) -> Records<'_, T> {
        Records::new(self.store.as_ref())
    }

    /// Every post, newest first, regardless of status
    pub async fn blog_list(&self) -> Result<Vec<BlogCard>> {
        let posts = self.records::<BlogPost>().all().await?;
        Ok(posts.into_iter().map(BlogCard::from).collect())
    }

    /// Published featured posts, newest first
    pub async fn featured_posts(&self) -> Result<Vec<FeaturedPost>> {
        let query = ListQuery::new()
            .filter("status", PostStatus::Published.as_str())
            .filter("is_featured", true)
            .limit(self.config.featured_post_limit);

        let posts = self.records::<BlogPost>().list(&query).await?;
        Ok(posts.into_iter().map(FeaturedPost::from).collect())
    }

    pub async fn post_by_slug(&self, slug: &str) -> Result<Option<BlogArticle>> {
        let Some(post) = self.records::<BlogPost>().find_by("slug", json!(slug)).await? else {
            return Ok(None);
        };

        let metadata = PageMetadata {
            title: format!("{} | {}", post.record.title, self.config.site_name),
            description: Some(summarize(&post.record.content, DESCRIPTION_LENGTH)),
        };

        Ok(Some(BlogArticle {
            read_time: read_time(&post.record),
            post,
            metadata,
        }))
    }

    /// Page metadata for a post slug, falling back to a not-found title
    pub async fn post_metadata(&self, slug: &str) -> Result<PageMetadata> {
        Ok(self
            .post_by_slug(slug)
            .await?
            .map(|article| article.metadata)
            .unwrap_or_else(PageMetadata::not_found))
    }

    pub async fn projects(&self) -> Result<Vec<Stored<Project>>> {
        Ok(self.records::<Project>().all().await?)
    }

    pub async fn certificates(&self) -> Result<Vec<Stored<Certificate>>> {
        Ok(self.records::<Certificate>().all().await?)
    }

    /// The newest certificates, as many as the home page shows
    pub async fn home_certificates(&self) -> Result<Vec<Stored<Certificate>>> {
        let query = ListQuery::new().limit(self.config.home_certificate_limit);
        Ok(self.records::<Certificate>().list(&query).await?)
    }

    pub async fn certificate_stats(&self, now: DateTime<Utc>) -> Result<CertificateStats> {
        let certificates = self.certificates().await?;
        Ok(CertificateStats::from_certificates(&certificates, now))
    }

    pub async fn submit_contact(&self, form: &ContactForm) -> Result<Stored<ContactMessage>> {
        let message = form.to_record()?;
        let stored = self.records::<ContactMessage>().create(&message).await?;
        info!("Received contact message {} from {}", stored.id, stored.record.email);
        Ok(stored)
    }
}
