use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use tracing::{debug, info};

pub mod error;
pub mod init;
pub mod storage;

pub use error::{DatabaseError, Result};

// Re-export record types so callers need only this crate for persistence
pub use entities::{Collection, Record};

pub use init::{create_collection_tables, initialize_database, DatabaseConfig};
pub use storage::{ListQuery, RecordStore, Records, Stored, StoredRow};

/// Database connection pool
#[derive(Debug)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open (creating if needed) the SQLite database at `database_path`
    pub async fn new(database_path: &Path) -> Result<Self> {
        // Ensure the data directory exists
        if let Some(parent) = database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        info!("Connecting to database at: {:?}", database_path);

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        debug!("Database connection established");

        Ok(Self { pool })
    }

    /// Open a private in-memory database
    ///
    /// The pool is pinned to a single connection that never expires; every
    /// SQLite in-memory connection is a separate database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        debug!("In-memory database connection established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Check if a table exists
    pub async fn table_exists(&self, table_name: &str) -> Result<bool> {
        let query = r#"
            SELECT COUNT(*) as count
            FROM sqlite_master
            WHERE type='table' AND name=?
        "#;

        let result: (i32,) = sqlx::query_as(query)
            .bind(table_name)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0 > 0)
    }

    /// Execute raw SQL (for table creation, etc.)
    pub async fn execute_raw(&self, sql: &str) -> Result<()> {
        sqlx::query(sql).execute(&self.pool).await?;
        Ok(())
    }
}
