//! Short constructors for the built-in rules.
//!
//! ```rust
//! use finboard_forms::validators;
//! use finboard_forms::validation::Validator;
//! use finboard_forms::value::ValueMap;
//!
//! let values = ValueMap::new();
//! let rule = validators::min_length(3);
//! assert_ne!(rule.check(&"ab".into(), &values), "");
//! assert_eq!(rule.check(&"abc".into(), &values), "");
//! ```

use crate::error::Result;
use crate::validation::{
    EmailValidator, FnValidator, MatchValidator, MaxLengthValidator, MinLengthValidator,
    NumberValidator, PositiveNumberValidator, RegexValidator, RequiredValidator,
};
use crate::value::{Value, ValueMap};

/// Rejects falsy values.
pub fn required() -> RequiredValidator {
    RequiredValidator::new()
}

/// Rejects values that are not shaped like an email address.
pub fn email() -> EmailValidator {
    EmailValidator::new()
}

/// Rejects values shorter than `min`.
pub fn min_length(min: usize) -> MinLengthValidator {
    MinLengthValidator::new(min)
}

/// Rejects values longer than `max`.
pub fn max_length(max: usize) -> MaxLengthValidator {
    MaxLengthValidator::new(max)
}

/// Rejects values that differ from the `other` field.
///
/// With no message, reports "Fields do not match".
pub fn matches(other: impl Into<String>, message: Option<&str>) -> MatchValidator {
    match message {
        Some(message) => MatchValidator::with_message(other, message),
        None => MatchValidator::new(other),
    }
}

/// Rejects values that do not read as a number, and the empty string.
pub fn number() -> NumberValidator {
    NumberValidator::new()
}

/// Rejects values that are not numbers greater than zero.
pub fn positive_number() -> PositiveNumberValidator {
    PositiveNumberValidator::new()
}

/// Rejects values whose string form does not match `pattern`.
///
/// # Errors
///
/// Fails when `pattern` is not a valid regex.
pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<RegexValidator> {
    RegexValidator::new(pattern, message)
}

/// Wraps a predicate as a validator.
pub fn from_fn<F>(check: F, message: impl Into<String>) -> FnValidator<F>
where
    F: Fn(&Value, &ValueMap) -> bool + Send + Sync,
{
    FnValidator::new(check, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validator;
    use crate::value::value_map;
    use serde_json::json;

    #[test]
    fn test_matches_default_and_custom_message() {
        let values = value_map(json!({"password": "abc"}));
        assert_eq!(
            matches("password", None).check(&json!("abd"), &values),
            "Fields do not match"
        );
        assert_eq!(
            matches("password", Some("Passwords differ")).check(&json!("abd"), &values),
            "Passwords differ"
        );
        assert_eq!(matches("password", None).check(&json!("abc"), &values), "");
    }

    #[test]
    fn test_factories_use_default_messages() {
        assert_eq!(required().message(), "This field is required");
        assert_eq!(email().message(), "Invalid email address");
        assert_eq!(min_length(8).message(), "Must be at least 8 characters");
        assert_eq!(max_length(20).message(), "Must be no more than 20 characters");
        assert_eq!(number().message(), "Must be a valid number");
        assert_eq!(positive_number().message(), "Must be a positive number");
    }

    #[test]
    fn test_pattern_factory() {
        let rule = pattern(r"^\d{5}$", "Enter a 5 digit code").unwrap();
        assert_eq!(rule.check(&json!("1234"), &ValueMap::new()), "Enter a 5 digit code");
        assert!(pattern("[", "bad").is_err());
    }
}
