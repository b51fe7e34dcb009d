//! Error taxonomy for Jelly streams.
//!
//! Errors are structured values, not control flow: every fallible entry
//! point returns [`Result`] and callers decide how to surface failures.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, JellyError>;

/// All errors produced by the Jelly encoder, decoder and I/O layers.
#[derive(Debug, Error)]
pub enum JellyError {
    /// The input (or requested operation) violates the Jelly format:
    /// empty frames, missing options rows, lookup size mismatches, use of a
    /// disabled lookup table, out-of-range lookup indices, or a reader mode
    /// that does not match the stream's logical type in strict mode.
    #[error("conformance error: {0}")]
    Conformance(String),

    /// Internal invariant violation, e.g. a physical/logical stream type
    /// pair outside the compatibility matrix.
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// An adapter does not support a callback required by the stream, or a
    /// combination of options this implementation chose not to support.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// The underlying byte stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<prost::DecodeError> for JellyError {
    fn from(err: prost::DecodeError) -> Self {
        JellyError::Conformance(format!("malformed frame: {err}"))
    }
}

impl JellyError {
    pub(crate) fn conformance(msg: impl Into<String>) -> Self {
        JellyError::Conformance(msg.into())
    }

    pub(crate) fn assertion(msg: impl Into<String>) -> Self {
        JellyError::Assertion(msg.into())
    }

    pub(crate) fn not_implemented(msg: impl Into<String>) -> Self {
        JellyError::NotImplemented(msg.into())
    }
}
