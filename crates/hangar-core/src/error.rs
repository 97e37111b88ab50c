use thiserror::Error;

/// Top-level error type for the Hangar console.
#[derive(Error, Debug)]
pub enum HangarError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<config::ConfigError> for HangarError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
