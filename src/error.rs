use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status { status: StatusCode, url: String },

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

/// Reasons a transaction form is rejected before anything goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("description is required")]
    MissingDescription,

    #[error("amount is required")]
    MissingAmount,

    #[error("category is required")]
    MissingCategory,

    #[error("category id '{0}' is not a number")]
    InvalidCategory(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;
