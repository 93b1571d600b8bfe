//! Decoding of service response bodies.
//!
//! Every response from the service wraps its payload as `{"data": ...}`.
//! These helpers take the raw body bytes, parse them, and hand the `data`
//! member to a record builder.

use crate::error::ResponseError;
use crate::extract::{get_object, get_object_array};
use crate::parser::{parse_with, ParseOptions};
use crate::types::{Object, Value};

/// Key holding the payload of every response.
pub const DATA_KEY: &str = "data";

/// Parse a response body and require a top-level object.
pub fn parse_body(body: &[u8], options: &ParseOptions) -> Result<Object, ResponseError> {
    let text = std::str::from_utf8(body)?;
    match parse_with(text, options)? {
        Value::Object(object) => Ok(object),
        _ => Err(invalid("top-level value is not an object")),
    }
}

/// Decode a response whose `data` member is a single record.
pub fn decode_data_object<T, F>(
    body: &[u8],
    options: &ParseOptions,
    builder: F,
) -> Result<T, ResponseError>
where
    F: FnOnce(&Object) -> Option<T>,
{
    let root = parse_body(body, options)?;
    get_object(&root, DATA_KEY, builder).ok_or_else(|| invalid("`data` is not a valid record"))
}

/// Decode a response whose `data` member is an array of records.
/// Fails if any element fails to decode.
pub fn decode_data_array<T, F>(
    body: &[u8],
    options: &ParseOptions,
    builder: F,
) -> Result<Vec<T>, ResponseError>
where
    F: FnMut(&Object) -> Option<T>,
{
    let root = parse_body(body, options)?;
    get_object_array(&root, DATA_KEY, builder)
        .ok_or_else(|| invalid("`data` is not an array of valid records"))
}

fn invalid(reason: &'static str) -> ResponseError {
    tracing::debug!(reason, "invalid JSON structure");
    ResponseError::InvalidStructure(reason)
}
