use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenericError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    BadRequest(&'static str),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Failures talking to PDGA. Empty result sets are not errors.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unable to reach PDGA at {url}: {source}")]
    Unavailable {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("PDGA answered {url} with status {status}")]
    BadStatus { url: String, status: u16 },
    #[error("unable to convert PDGA response from {url}: {source}")]
    Malformed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("league config not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read league config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse league config: {source}")]
    ParseError { source: toml::de::Error },

    #[error("validation error for `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("discord webhook request failed: {0}")]
    Discord(#[source] reqwest::Error),
    #[error("discord rejected the message with status {status}: {body}")]
    DiscordStatus { status: u16, body: String },
    #[error("sheets request failed: {0}")]
    Sheets(#[source] reqwest::Error),
    #[error("sheets answered with status {status}: {body}")]
    SheetsStatus { status: u16, body: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}
