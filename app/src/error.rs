use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] database::DatabaseError),

    #[error("{0}")]
    Entities(#[from] entities::EntitiesError),

    #[error("{0}")]
    Content(#[from] content::ContentError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Not found: {0}")]
    NotFound(String),
}
