//! Error types for payload encoding and decoding operations.

use thiserror::Error;

/// Errors that can occur while encoding or decoding a payload document.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The XML reader rejected the input (decoding path).
    #[error("XML parse error at byte {position}: {message}")]
    Xml { position: u64, message: String },

    /// The input parsed as XML but does not form a single element tree.
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// A leaf token is not valid base64.
    #[error("Invalid leaf token in <{element}>: {source}")]
    Leaf {
        element: String,
        #[source]
        source: base64::DecodeError,
    },

    /// A leaf token decoded to bytes that are not UTF-8.
    #[error("Leaf <{element}> does not decode to UTF-8 text")]
    LeafNotUtf8 { element: String },

    /// An element name is not a legal XML name (strict-name mode only).
    #[error("Invalid element name: {name:?}")]
    InvalidName { name: String },

    /// Payload or document nesting exceeds the configured limit.
    #[error("Nesting depth exceeds limit of {limit}")]
    DepthExceeded { limit: usize },

    /// The XML writer failed.
    #[error("Write error: {0}")]
    Write(String),

    /// JSON interop failed (parsing input JSON or mapping into typed structs).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout xml-payload.
pub type Result<T> = std::result::Result<T, CodecError>;
