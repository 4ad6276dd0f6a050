use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The record collections kept by the persistence backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    BlogPosts,
    Projects,
    Certificates,
    Contacts,
    BlogCategories,
    ProjectCategories,
}

impl Collection {
    /// Every collection, in dashboard order
    pub const ALL: [Collection; 6] = [
        Collection::BlogPosts,
        Collection::Projects,
        Collection::Certificates,
        Collection::Contacts,
        Collection::BlogCategories,
        Collection::ProjectCategories,
    ];

    /// Get the table name backing this collection
    pub fn table_name(&self) -> &'static str {
        match self {
            Collection::BlogPosts => "blogs",
            Collection::Projects => "projects",
            Collection::Certificates => "certificates",
            Collection::Contacts => "contacts",
            Collection::BlogCategories => "blog_categories",
            Collection::ProjectCategories => "project_categories",
        }
    }

    /// Check if this is a lookup collection rather than content
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            Collection::BlogCategories | Collection::ProjectCategories
        )
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// A record type stored in exactly one collection
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Get the collection this record type lives in
    fn collection() -> Collection;
}

/// Publication state of a blog post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    #[default]
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    /// Minutes to read; re-derived from the content when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<u32>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub is_featured: bool,
}

impl Record for BlogPost {
    fn collection() -> Collection {
        Collection::BlogPosts
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default)]
    pub is_live: bool,
    #[serde(default)]
    pub is_code_available: bool,
}

impl Record for Project {
    fn collection() -> Collection {
        Collection::Projects
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub title: String,
    pub issuer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Record for Certificate {
    fn collection() -> Collection {
        Collection::Certificates
    }
}

/// A message submitted through the public contact form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Record for ContactMessage {
    fn collection() -> Collection {
        Collection::Contacts
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub slug: String,
}

/// Category used to group blog posts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlogCategory(pub Category);

impl Record for BlogCategory {
    fn collection() -> Collection {
        Collection::BlogCategories
    }
}

/// Category used to group projects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectCategory(pub Category);

impl Record for ProjectCategory {
    fn collection() -> Collection {
        Collection::ProjectCategories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_table_names() {
        assert_eq!(Collection::BlogPosts.table_name(), "blogs");
        assert_eq!(Collection::Contacts.to_string(), "contacts");
        assert_eq!(BlogCategory::collection(), Collection::BlogCategories);
        assert!(Collection::ProjectCategories.is_lookup());
        assert!(!Collection::Projects.is_lookup());
    }

    #[test]
    fn test_blog_post_defaults_for_sparse_rows() {
        let post: BlogPost = serde_json::from_value(json!({
            "title": "Hello",
            "slug": "hello",
            "content": "<p>Hi</p>"
        }))
        .unwrap();

        assert!(post.tags.is_empty());
        assert_eq!(post.read_time, None);
        assert_eq!(post.status, PostStatus::Published);
        assert!(!post.is_featured);
    }

    #[test]
    fn test_category_wrappers_serialize_flat() {
        let category = ProjectCategory(Category {
            name: "Web".to_string(),
            slug: "web".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&category).unwrap(),
            json!({ "name": "Web", "slug": "web" })
        );
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_value(PostStatus::Draft).unwrap(), json!("draft"));
        assert_eq!(PostStatus::Published.as_str(), "published");
    }
}
