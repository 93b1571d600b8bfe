//! Error types for parsing documents and decoding service responses.

use std::str::Utf8Error;
use thiserror::Error;

/// Reasons the parser could not produce a value tree.
///
/// Failures carry no line or column: the parser aborts on the first
/// structural problem and never returns a partial tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JsonError {
    /// Input ended while a value was still expected (e.g. empty input, or a
    /// bare top-level token with no terminating `,`, `]` or `}`).
    #[error("unexpected end of input while reading a value")]
    UnexpectedEnd,

    /// Input ended inside a quoted string.
    #[error("unterminated string")]
    UnterminatedString,

    /// Input ended before the closing `}` of an object.
    #[error("unterminated object")]
    UnterminatedObject,

    /// Input ended before the closing `]` of an array.
    #[error("unterminated array")]
    UnterminatedArray,

    /// A `:` inside an object was not preceded by a non-empty quoted key.
    #[error("missing or empty key before ':'")]
    MissingKey,

    /// A closing bracket of the wrong kind appeared where an element was expected.
    #[error("expected '{expected}' but found '{found}'")]
    MismatchedClose { expected: char, found: char },

    /// Containers were nested deeper than the configured limit.
    #[error("nesting depth exceeds limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    /// Raw input bytes were not valid UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),
}

/// Errors from decoding a `{"data": ...}` service response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    #[error("response body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),

    #[error("invalid JSON string: {0}")]
    Malformed(#[from] JsonError),

    /// The document parsed, but did not have the expected shape.
    #[error("invalid JSON structure: {0}")]
    InvalidStructure(&'static str),
}

/// Convenience alias used throughout realty-json.
pub type Result<T> = std::result::Result<T, JsonError>;
