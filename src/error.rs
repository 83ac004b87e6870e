use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlueprintError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid blueprint data: {0}")]
    Invalid(String),

    #[error("Unknown page: {0}")]
    UnknownPage(String),
}

pub type Result<T> = std::result::Result<T, BlueprintError>;
