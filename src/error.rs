use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Remote service unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid category: {0:?}")]
    InvalidCategory(String),

    #[error("All {attempts} news API credentials failed, last error: {last_error}")]
    AllCredentialsExhausted {
        attempts: usize,
        last_error: Box<AppError>,
    },

    #[error("Write failed: {0}")]
    Write(String),

    #[error("Invalid user identity: {0}")]
    InvalidUser(String),

    #[error("Unknown summary model: {0:?} (expected bart or t5)")]
    InvalidModel(String),

    #[error("Summarizer error: {0}")]
    Summarizer(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database error: {0}")]
    AsyncDatabase(#[from] tokio_rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
