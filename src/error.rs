use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("ANTHROPIC_API_KEY not configured in environment variables")]
    MissingCredential,

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("input file not found: {0}")]
    InputNotFound(String),

    #[error("input parse error: {0}")]
    InputParse(String),

    #[error("reasoning service request failed: {0}")]
    Transport(String),

    #[error("reasoning service response violated contract: {0}")]
    ContractViolation(String),

    #[error("invalid page transition: {0}")]
    InvalidTransition(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
