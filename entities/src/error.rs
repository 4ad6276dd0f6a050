use thiserror::Error;

pub type Result<T> = std::result::Result<T, EntitiesError>;

#[derive(Error, Debug)]
pub enum EntitiesError {
    #[error("Required field '{0}' is missing")]
    MissingField(&'static str),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Content error: {0}")]
    Content(#[from] content::ContentError),
}
