use thiserror::Error;

use crate::status::error::DecodeError;

#[derive(Error, Debug)]
pub enum ForgeError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ForgeError {
    fn from(e: serde_json::Error) -> Self {
        ForgeError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for ForgeError {
    fn from(e: toml::de::Error) -> Self {
        ForgeError::Config(e.to_string())
    }
}

impl From<reqwest::Error> for ForgeError {
    fn from(e: reqwest::Error) -> Self {
        ForgeError::Http(e.to_string())
    }
}
