//! Controller configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorMap, Result};

/// Decides whether a submit-time validation result blocks submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPolicy {
    /// Any entry blocks, even one holding an empty message.
    #[default]
    KeyCount,
    /// Only entries with a non-empty message block.
    NonBlankMessages,
}

impl SubmitPolicy {
    /// Returns whether `errors` allows the submit callback to run.
    pub fn accepts(self, errors: &ErrorMap) -> bool {
        match self {
            Self::KeyCount => errors.is_empty(),
            Self::NonBlankMessages => !errors.has_messages(),
        }
    }
}

/// Options for a [`FormController`](crate::FormController).
///
/// Missing keys take their defaults, so an empty JSON object is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormOptions {
    /// What blocks the submit callback.
    pub submit_policy: SubmitPolicy,
    /// Whether a change clears a non-empty error on that field.
    pub clear_error_on_change: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            submit_policy: SubmitPolicy::KeyCount,
            clear_error_on_change: true,
        }
    }
}

impl FormOptions {
    /// Parses options from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Config`](crate::FormError::Config) on malformed
    /// input or unknown enum values.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the submit policy.
    #[must_use]
    pub const fn submit_policy(mut self, policy: SubmitPolicy) -> Self {
        self.submit_policy = policy;
        self
    }

    /// Sets whether changes clear field errors.
    #[must_use]
    pub const fn clear_error_on_change(mut self, enabled: bool) -> Self {
        self.clear_error_on_change = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormError;

    #[test]
    fn test_defaults() {
        let options = FormOptions::default();
        assert_eq!(options.submit_policy, SubmitPolicy::KeyCount);
        assert!(options.clear_error_on_change);
    }

    #[test]
    fn test_from_json_partial() {
        let options = FormOptions::from_json(r#"{"submit_policy": "non_blank_messages"}"#).unwrap();
        assert_eq!(options.submit_policy, SubmitPolicy::NonBlankMessages);
        assert!(options.clear_error_on_change);

        let options = FormOptions::from_json("{}").unwrap();
        assert_eq!(options, FormOptions::default());
    }

    #[test]
    fn test_from_json_rejects_unknown_policy() {
        let err = FormOptions::from_json(r#"{"submit_policy": "whenever"}"#).unwrap_err();
        assert!(matches!(err, FormError::Config(_)));
    }

    #[test]
    fn test_policy_accepts() {
        let blank = ErrorMap::new().with("email", "");
        assert!(!SubmitPolicy::KeyCount.accepts(&blank));
        assert!(SubmitPolicy::NonBlankMessages.accepts(&blank));
        assert!(SubmitPolicy::KeyCount.accepts(&ErrorMap::new()));

        let invalid = blank.with("age", "Must be a positive number");
        assert!(!SubmitPolicy::NonBlankMessages.accepts(&invalid));
    }
}
