use std::path::PathBuf;

use thiserror::Error;

/// Batch-fatal errors. Anything returned as a `DescribeError` stops the run
/// before (or while) the report is produced.
#[derive(Error, Debug)]
pub enum DescribeError {
    /// The supplied path is neither an existing file nor a directory.
    #[error("Invalid path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// Filesystem failure with context (output directory, report file, scan).
    #[error("{context}: {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl DescribeError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        DescribeError::Io {
            context: context.into(),
            source,
        }
    }
}

/// An image could not be decoded, resized or re-encoded.
#[derive(Error, Debug)]
#[error("Failed to encode image {}: {source}", path.display())]
pub struct EncodingError {
    pub path: PathBuf,
    #[source]
    pub source: image::ImageError,
}

/// Errors talking to the inference server. Recorded per image, never fatal.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// Network-level failure (refused, timed out, reset).
    #[error("Cannot connect to Ollama at {endpoint}: {source}")]
    Connection {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The server answered HTTP 400: the model cannot take image input.
    #[error("Model {model} doesn't support image analysis")]
    NotVisionCapable { model: String },

    /// Any other non-success status.
    #[error("Ollama returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The body was not the JSON we expected.
    #[error("Invalid response from Ollama: {0}")]
    InvalidResponse(String),
}

/// Convenience alias for batch-level results.
pub type Result<T> = std::result::Result<T, DescribeError>;
