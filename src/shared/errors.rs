use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation: {0}")]
    Validation(String),

    #[error("Not found: {entity} with id={id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Slot {0} is in use and cannot be deleted")]
    SlotInUse(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Not found: {entity} with id={id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Unauthorized: check the configured API token")]
    Unauthorized,

    #[error("Backend rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
