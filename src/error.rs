use thiserror::Error;

/// Main error type for subify
#[derive(Error, Debug)]
pub enum SubifyError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid language code: {0:?}")]
    InvalidLanguage(String),

    #[error("Language not enabled yet: {0}")]
    LanguageNotEnabled(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Caption overlay is already running")]
    AlreadyRunning,

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

/// Errors from the translation endpoint
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Network response was not ok: status {0}")]
    Status(u16),

    #[error("Malformed response body: {0}")]
    Body(#[from] serde_json::Error),
}

/// Errors from the preference storage area
#[derive(Error, Debug)]
pub enum StorageError {
    /// The owning extension context is gone; the area can no longer be used.
    #[error("Extension context invalidated")]
    ContextInvalidated,

    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SubifyError>;
