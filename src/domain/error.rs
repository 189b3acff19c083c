use std::io;

use thiserror::Error;

/// Library-wide error type for spotlight operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A fixture file could not be parsed.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// The requested catalogue key has no fixture file.
    #[error("Catalogue '{key}' not found (expected {path})")]
    CatalogueNotFound { key: String, path: String },

    /// A required fixture file is missing from the data directory.
    #[error("{what} fixture not found: {path}")]
    FixtureNotFound { what: &'static str, path: String },

    /// Social post composition failed.
    #[error(transparent)]
    Compose(#[from] crate::domain::social::ComposeError),

    /// Collage template rendering failed.
    #[error("Failed to render collage template: {0}")]
    TemplateRenderError(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn parse_error<W: Into<String>, D: std::fmt::Display>(what: W, details: D) -> Self {
        AppError::ParseError { what: what.into(), details: details.to_string() }
    }
}
