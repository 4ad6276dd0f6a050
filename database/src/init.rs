use crate::{Collection, Database, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Database initialization configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file; `None` opens an in-memory database
    pub database_path: Option<PathBuf>,
    /// Whether to create the collection tables on initialization
    pub create_tables: bool,
}

impl DatabaseConfig {
    /// Create a configuration for the database file at `database_path`
    pub fn new_with_path(database_path: PathBuf) -> Self {
        Self {
            database_path: Some(database_path),
            create_tables: true,
        }
    }

    /// Create a configuration for a throwaway in-memory database
    pub fn in_memory() -> Self {
        Self {
            database_path: None,
            create_tables: true,
        }
    }

    /// Set whether to create tables on initialization
    pub fn with_create_tables(mut self, create: bool) -> Self {
        self.create_tables = create;
        self
    }
}

/// Initialize the database with the given configuration
pub async fn initialize_database(config: DatabaseConfig) -> Result<Arc<Database>> {
    info!("Initializing database with configuration");

    let db = match &config.database_path {
        Some(path) => Database::new(path).await?,
        None => Database::in_memory().await?,
    };

    // Wrap in Arc for sharing
    let db = Arc::new(db);

    if config.create_tables {
        create_collection_tables(&db).await?;
    }

    Ok(db)
}

/// Create one table per record collection
///
/// Records are stored as a JSON document next to their id and timestamps.
/// `seq` breaks ties between rows created within the same timestamp.
pub async fn create_collection_tables(db: &Database) -> Result<()> {
    for collection in Collection::ALL {
        let sql = format!(
            r#"CREATE TABLE IF NOT EXISTS {} (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    data TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)"#,
            collection.table_name()
        );
        db.execute_raw(&sql).await?;
        info!("Ensured table for collection: {}", collection);
    }

    Ok(())
}
