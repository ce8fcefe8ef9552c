//! Form field validators.
//!
//! Each rule inspects one field value, and optionally the whole value set,
//! and either accepts it or returns a human-readable message. The rules are
//! independent of each other and of the controller; callers compose them
//! into a [`Validate`](crate::Validate) implementation, by hand or through
//! [`ValidationSchema`](crate::ValidationSchema).

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::value::{self, Value, ValueMap};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

/// Trait for field validators.
pub trait Validator: Send + Sync {
    /// Validates a value and returns an error message if invalid.
    ///
    /// `values` is the full form contents, for rules that compare fields.
    fn validate(&self, value: &Value, values: &ValueMap) -> std::result::Result<(), String>;

    /// Returns the error message for this validator.
    fn message(&self) -> &str;

    /// Returns the error message, or `""` when the value is valid.
    fn check(&self, value: &Value, values: &ValueMap) -> String {
        self.validate(value, values).err().unwrap_or_default()
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate(&self, value: &Value, values: &ValueMap) -> std::result::Result<(), String> {
        (**self).validate(value, values)
    }

    fn message(&self) -> &str {
        (**self).message()
    }
}

fn reject_unless(valid: bool, message: &str) -> std::result::Result<(), String> {
    if valid {
        Ok(())
    } else {
        Err(message.to_string())
    }
}

/// Validator that requires a truthy value.
///
/// `0` and `false` are rejected along with `null` and `""`; use a custom
/// rule for fields where those are meaningful answers.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Creates a new RequiredValidator with default message.
    pub fn new() -> Self {
        Self::with_message("This field is required")
    }

    /// Creates a new RequiredValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredValidator {
    fn validate(&self, value: &Value, _values: &ValueMap) -> std::result::Result<(), String> {
        reject_unless(value::is_truthy(value), &self.message)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator for email addresses.
///
/// Only checks the `local@domain.tld` shape with no whitespace and a single
/// `@` on each side; no further address rules are applied.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    message: String,
}

impl EmailValidator {
    /// Creates a new EmailValidator with default message.
    pub fn new() -> Self {
        Self::with_message("Invalid email address")
    }

    /// Creates a new EmailValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for EmailValidator {
    fn validate(&self, value: &Value, _values: &ValueMap) -> std::result::Result<(), String> {
        let text = value::to_display_string(value);
        reject_unless(EMAIL_PATTERN.is_match(&text), &self.message)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator that enforces a minimum length.
///
/// Values without a length (numbers, booleans, `null`) are not measured and
/// pass.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    min_length: usize,
    message: String,
}

impl MinLengthValidator {
    /// Creates a new MinLengthValidator.
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            message: format!("Must be at least {min_length} characters"),
        }
    }

    /// Creates a new MinLengthValidator with custom message.
    pub fn with_message(min_length: usize, message: impl Into<String>) -> Self {
        Self {
            min_length,
            message: message.into(),
        }
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, value: &Value, _values: &ValueMap) -> std::result::Result<(), String> {
        match value::length(value) {
            Some(len) => reject_unless(len >= self.min_length, &self.message),
            None => Ok(()),
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator that enforces a maximum length.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    max_length: usize,
    message: String,
}

impl MaxLengthValidator {
    /// Creates a new MaxLengthValidator.
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            message: format!("Must be no more than {max_length} characters"),
        }
    }

    /// Creates a new MaxLengthValidator with custom message.
    pub fn with_message(max_length: usize, message: impl Into<String>) -> Self {
        Self {
            max_length,
            message: message.into(),
        }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &Value, _values: &ValueMap) -> std::result::Result<(), String> {
        match value::length(value) {
            Some(len) => reject_unless(len <= self.max_length, &self.message),
            None => Ok(()),
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator that requires the value to equal another field's value.
///
/// Typical use is a password confirmation field. A missing other field
/// never matches, not even a `null` value.
#[derive(Debug, Clone)]
pub struct MatchValidator {
    other: String,
    message: String,
}

impl MatchValidator {
    /// Creates a new MatchValidator against the named field.
    pub fn new(other: impl Into<String>) -> Self {
        Self::with_message(other, "Fields do not match")
    }

    /// Creates a new MatchValidator with custom message.
    pub fn with_message(other: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            other: other.into(),
            message: message.into(),
        }
    }

    /// Returns the name of the field this value must match.
    pub fn other_field(&self) -> &str {
        &self.other
    }
}

impl Validator for MatchValidator {
    fn validate(&self, value: &Value, values: &ValueMap) -> std::result::Result<(), String> {
        let matched = values
            .get(&self.other)
            .is_some_and(|other| value::strict_eq(value, other));
        reject_unless(matched, &self.message)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator that requires a numeric value.
///
/// The empty string is rejected even though it coerces to zero.
#[derive(Debug, Clone)]
pub struct NumberValidator {
    message: String,
}

impl NumberValidator {
    /// Creates a new NumberValidator with default message.
    pub fn new() -> Self {
        Self::with_message("Must be a valid number")
    }

    /// Creates a new NumberValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for NumberValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for NumberValidator {
    fn validate(&self, value: &Value, _values: &ValueMap) -> std::result::Result<(), String> {
        let blank = matches!(value, Value::String(s) if s.is_empty());
        reject_unless(!blank && !value::to_number(value).is_nan(), &self.message)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator that requires a number strictly greater than zero.
#[derive(Debug, Clone)]
pub struct PositiveNumberValidator {
    message: String,
}

impl PositiveNumberValidator {
    /// Creates a new PositiveNumberValidator with default message.
    pub fn new() -> Self {
        Self::with_message("Must be a positive number")
    }

    /// Creates a new PositiveNumberValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for PositiveNumberValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for PositiveNumberValidator {
    fn validate(&self, value: &Value, _values: &ValueMap) -> std::result::Result<(), String> {
        // NaN compares false, so this also rejects non-numbers.
        reject_unless(value::to_number(value) > 0.0, &self.message)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator using a custom regex pattern against the value's string form.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    pattern: Regex,
    message: String,
}

impl RegexValidator {
    /// Creates a new RegexValidator.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidPattern`](crate::FormError::InvalidPattern)
    /// when the pattern does not compile.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            message: message.into(),
        })
    }
}

impl Validator for RegexValidator {
    fn validate(&self, value: &Value, _values: &ValueMap) -> std::result::Result<(), String> {
        let text = value::to_display_string(value);
        reject_unless(self.pattern.is_match(&text), &self.message)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator backed by a closure returning `true` for valid values.
pub struct FnValidator<F> {
    check: F,
    message: String,
}

impl<F> FnValidator<F>
where
    F: Fn(&Value, &ValueMap) -> bool + Send + Sync,
{
    /// Creates a validator from a predicate and the message to report.
    pub fn new(check: F, message: impl Into<String>) -> Self {
        Self {
            check,
            message: message.into(),
        }
    }
}

impl<F> fmt::Debug for FnValidator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnValidator")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl<F> Validator for FnValidator<F>
where
    F: Fn(&Value, &ValueMap) -> bool + Send + Sync,
{
    fn validate(&self, value: &Value, values: &ValueMap) -> std::result::Result<(), String> {
        reject_unless((self.check)(value, values), &self.message)
    }

    fn message(&self) -> &str {
        &self.message
    }
}
