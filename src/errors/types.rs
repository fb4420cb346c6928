use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashError {
    #[error("A scan is already in progress. Please wait for it to complete.")]
    AlreadyRunning,

    #[error("Unknown view: {0}")]
    UnknownView(String),

    #[error("{0}")]
    EmptyInput(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
