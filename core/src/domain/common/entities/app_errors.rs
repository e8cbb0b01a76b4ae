use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Invalid file type!")]
    InvalidMediaType,

    #[error("Menu file is missing!")]
    MissingFile,

    #[error("File cannot be empty")]
    EmptyFile,

    #[error("File too large. Max size is {max_bytes} bytes")]
    FileTooLarge { max_bytes: usize },

    #[error("{0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl CoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound(_))
    }
}
