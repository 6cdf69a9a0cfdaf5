//! Field-level error mapping exchanged with the backend.
//!
//! A failed submission is always described by a [`FieldErrors`] map: field
//! name to its messages, with the reserved [`GENERAL`] key
//! for problems not tied to any single field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Reserved key for errors not attributable to a field.
pub const GENERAL: &str = "general";

/// Message used for every transport-level or unclassified failure.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred. Please try again.";

/// Mapping from field name to its error messages.
///
/// Field keys are kept sorted; messages per field stay in server order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// An empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// The normalized error for any failure without a structured body.
    #[must_use]
    pub fn unexpected() -> Self {
        Self::single(GENERAL, UNEXPECTED_ERROR)
    }

    /// A mapping holding one message for one field.
    #[must_use]
    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    /// Appends a message to a field's list.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// The first message for a field, if any. Later messages are never shown.
    #[must_use]
    pub fn first(&self, field: &str) -> Option<&str> {
        self.0.get(field)?.first().map(String::as_str)
    }

    /// The first [`GENERAL`] message, if any.
    #[must_use]
    pub fn general(&self) -> Option<&str> {
        self.first(GENERAL)
    }

    /// All messages for a field.
    #[must_use]
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    /// Whether a field has any message.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Field names that carry errors.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Whether there are no errors at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields carrying errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K, V> FromIterator<(K, Vec<V>)> for FieldErrors
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Vec<V>)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }
}

/// Failure body: `{ "errors": { field: [messages] } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// The per-field messages.
    pub errors: FieldErrors,
}
