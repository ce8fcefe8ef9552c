//! Error types for forms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Form-specific errors.
///
/// Field-level validation problems never show up here; they are plain
/// messages stored in an [`ErrorMap`].
#[derive(Debug, Error)]
pub enum FormError {
    /// A caller-supplied validation function failed outright.
    #[error("validator failed: {message}")]
    Validator { message: String },

    /// A custom validation pattern did not compile.
    #[error("invalid validation pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Form options could not be parsed.
    #[error("invalid form options: {0}")]
    Config(#[from] serde_json::Error),
}

impl FormError {
    /// Creates a validator failure with the given message.
    pub fn validator(message: impl Into<String>) -> Self {
        Self::Validator {
            message: message.into(),
        }
    }
}

/// Per-field error messages.
///
/// A field with a non-empty message is invalid. A field that is missing, or
/// present with an empty message, is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap {
    errors: BTreeMap<String, String>,
}

impl ErrorMap {
    /// Creates a new empty ErrorMap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message for a field, replacing any previous one.
    pub fn set(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    /// Builder form of [`ErrorMap::set`].
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.set(field, message);
        self
    }

    /// Returns the stored entry for a field, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Returns the message for a field, or `""` when there is none.
    pub fn message(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    /// Returns whether the field currently carries a non-empty message.
    pub fn is_invalid(&self, field: &str) -> bool {
        !self.message(field).is_empty()
    }

    /// Returns whether there are no entries at all.
    ///
    /// Entries holding an empty message still count.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of entries, including empty messages.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns whether any entry holds a non-empty message.
    pub fn has_messages(&self) -> bool {
        self.errors.values().any(|message| !message.is_empty())
    }

    /// Returns the fields holding a non-empty message, in key order.
    pub fn invalid_fields(&self) -> Vec<String> {
        self.errors
            .iter()
            .filter(|(_, message)| !message.is_empty())
            .map(|(field, _)| field.clone())
            .collect()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Iterates over `(field, message)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    pub(crate) fn entry_mut(&mut self, field: &str) -> Option<&mut String> {
        self.errors.get_mut(field)
    }
}

impl<K, V> FromIterator<(K, V)> for ErrorMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            errors: iter
                .into_iter()
                .map(|(field, message)| (field.into(), message.into()))
                .collect(),
        }
    }
}

impl std::fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (field, message) in self.iter().filter(|(_, m)| !m.is_empty()) {
            writeln!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
