/// Application errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication failed: HTTP {status}")]
    AuthenticationFailed { status: u16 },

    #[error("Search request failed: {0}")]
    SearchRequestFailed(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::AuthenticationFailed { .. } => "AuthenticationFailed",
            AppError::SearchRequestFailed(_) => "SearchRequestFailed",
            AppError::Validation(_) => "ValidationError",
            AppError::InvalidUrl(_) => "InvalidUrl",
            AppError::Http(_) => "HttpError",
            AppError::Internal(_) => "InternalError",
        }
    }
}

/// Result type alias used across the crate
pub type AppResult<T> = Result<T, AppError>;
