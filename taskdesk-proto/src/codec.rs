//! JSON encode/decode helpers for the task-creation wire format.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::ErrorBody;
use crate::task::CreateTaskResponse;

/// Error type for codec encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Encodes a wire value as JSON bytes.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the value cannot be serialized.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(value)?)
}

/// Decodes a wire value from JSON bytes.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the bytes are not valid JSON for `T`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Decodes a successful creation response.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the body is not a
/// `{ message, task }` object.
pub fn decode_created(bytes: &[u8]) -> Result<CreateTaskResponse, CodecError> {
    decode(bytes)
}

/// Decodes a structured validation failure.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the body has no `errors` mapping.
pub fn decode_error_body(bytes: &[u8]) -> Result<ErrorBody, CodecError> {
    decode(bytes)
}
