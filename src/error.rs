use crate::factory::ProviderType;
use thiserror::Error;

/// Errors that can occur when using the unified-llm library.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid credential, missing model, invalid base URL.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    /// A stream that had already started failed while being consumed.
    #[error("Streaming error: {0}")]
    Streaming(String),

    #[error("Provider {0} is not configured with necessary credentials")]
    ProviderNotConfigured(ProviderType),

    #[error("Unsupported functionality: {0}")]
    UnsupportedFunctionality(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Error::Api {
            status,
            message: message.into(),
        }
    }

    pub fn parsing(message: impl Into<String>) -> Self {
        Error::ResponseParsing(message.into())
    }

    pub fn streaming(message: impl Into<String>) -> Self {
        Error::Streaming(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Error::UnsupportedFunctionality(message.into())
    }

    /// HTTP status carried by an [`Error::Api`], if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ResponseParsing(err.to_string())
    }
}
