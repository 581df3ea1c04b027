use thiserror::Error;

use crate::path::UpdateError;
use crate::validate::ValidationErrors;

#[derive(Error, Debug)]
pub enum BuilderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid document: {0}")]
    Document(String),

    #[error("Field update rejected: {0}")]
    Update(#[from] UpdateError),

    #[error("Inbound validation failed: {0}")]
    Validation(ValidationErrors),
}

pub type Result<T> = std::result::Result<T, BuilderError>;
