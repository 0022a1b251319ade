use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DarisError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("conflicting write: {0}")]
    Conflict(String),

    #[error("DarisError: {0}")]
    Custom(String),
}

impl DarisError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        DarisError::Validation { field, message: message.into() }
    }

    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        DarisError::NotFound { entity, id }
    }
}

impl From<std::io::Error> for DarisError {
    fn from(error: std::io::Error) -> Self {
        DarisError::Io(Box::new(error))
    }
}
