//! Services behind the portfolio site: the admin screens and the public
//! pages, wired to configuration, logging and the record store.

pub mod admin;
pub mod config;
pub mod error;
pub mod logging;
pub mod public;

pub use admin::{
    bulk_mail_link, contacts_csv, reply_link, AdminService, ContactStats, DashboardStats,
};
pub use config::{get_environment, EnvPaths, SiteConfig};
pub use error::{AppError, Result};
pub use logging::{init_logging, log_shutdown};
pub use public::{
    BlogArticle, BlogCard, CertificateStats, FeaturedPost, PageMetadata, PublicSite,
};

use database::{initialize_database, Database, DatabaseConfig};
use std::sync::Arc;
use tracing::info;

/// Open the configured database, creating it and its tables if needed
pub async fn open_database(env_paths: &EnvPaths) -> Result<Arc<Database>> {
    let database_path = env_paths.database_path();
    info!("Opening portfolio database at {:?}", database_path);

    let db = initialize_database(DatabaseConfig::new_with_path(database_path)).await?;
    Ok(db)
}

/// The admin and public services over one shared store
pub struct Portfolio {
    pub admin: AdminService,
    pub site: PublicSite,
}

impl Portfolio {
    pub fn new(db: Arc<Database>, config: SiteConfig) -> Self {
        Self {
            admin: AdminService::new(db.clone()),
            site: PublicSite::new(db, config),
        }
    }

    /// Load configuration and open the database under `env_paths`
    pub async fn open(env_paths: &EnvPaths) -> Result<Self> {
        let config = SiteConfig::load(&env_paths.configuration_path)?;
        let db = open_database(env_paths).await?;
        Ok(Self::new(db, config))
    }
}
