use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Not found")]
    NotFound,

    #[error("Invalid user identifier")]
    InvalidUserId,

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Please upload an image first")]
    EmptyImage,

    #[error("Please upload a smaller image (less than {}MB)", .max_bytes / (1024 * 1024))]
    ImageTooLarge { max_bytes: usize },

    #[error("Please upload a JPG or PNG image")]
    UnsupportedImageFormat,

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Missing API key: set GOOGLE_API_KEY")]
    MissingCredential,

    #[error("{0}")]
    ExternalServiceError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Failed to generate report: {0}")]
    ReportGenerationError(String),

    #[error("Internal server error")]
    InternalServerError,
}
