use std::io;

use thiserror::Error;

/// Errors raised while aggregating and publishing proxy lists
#[derive(Error, Debug)]
pub enum AggregatorError {
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("HTTP error fetching {url}: {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to parse YAML from {url}: {source}")]
    SourceParse {
        url: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to read template {path}: {source}")]
    TemplateRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse template {path}: {reason}")]
    TemplateParse { path: String, reason: String },

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AggregatorError {
    /// Whether the error only invalidates a single source rather than the whole cycle
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            AggregatorError::Fetch { .. }
                | AggregatorError::HttpStatus { .. }
                | AggregatorError::SourceParse { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
