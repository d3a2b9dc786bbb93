//! Error types shared across Framecut crates.

use std::path::PathBuf;

/// Top-level error type for Framecut operations.
#[derive(Debug, thiserror::Error)]
pub enum FramecutError {
    #[error("Import error: {message}")]
    Import { message: String },

    #[error("Timeline error: {message}")]
    Timeline { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Encoder error: {message}")]
    Encoder { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using FramecutError.
pub type FramecutResult<T> = Result<T, FramecutError>;

impl FramecutError {
    pub fn import(msg: impl Into<String>) -> Self {
        Self::Import {
            message: msg.into(),
        }
    }

    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export {
            message: msg.into(),
        }
    }

    pub fn encoder(msg: impl Into<String>) -> Self {
        Self::Encoder {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}
