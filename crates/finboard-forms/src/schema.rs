//! Per-field rule lists composed into a whole-form [`Validate`].

use std::collections::BTreeMap;
use std::fmt;

use crate::controller::Validate;
use crate::error::{ErrorMap, Result};
use crate::validation::Validator;
use crate::value::{self, ValueMap};

/// Rules for one field, checked in order.
pub struct FieldRules {
    /// Field name.
    pub name: String,
    /// Validators, first failure wins.
    pub validators: Vec<Box<dyn Validator>>,
}

impl fmt::Debug for FieldRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRules")
            .field("name", &self.name)
            .field("validators", &self.validators.len())
            .finish()
    }
}

impl FieldRules {
    /// Creates an empty rule list for a field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            validators: Vec::new(),
        }
    }

    /// Adds a validator.
    #[must_use]
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Returns the first failing message, or `""`.
    pub fn first_error(&self, values: &ValueMap) -> String {
        let value = value::field(values, &self.name);
        self.validators
            .iter()
            .find_map(|validator| validator.validate(value, values).err())
            .unwrap_or_default()
    }

    /// Returns every failing message in rule order.
    pub fn all_errors(&self, values: &ValueMap) -> Vec<String> {
        let value = value::field(values, &self.name);
        self.validators
            .iter()
            .filter_map(|validator| validator.validate(value, values).err())
            .collect()
    }
}

/// Whole-form validation built from [`FieldRules`].
///
/// Evaluating a schema yields one entry per registered field, `""` for
/// fields that pass. Pair it with
/// [`SubmitPolicy::NonBlankMessages`](crate::SubmitPolicy::NonBlankMessages)
/// when blank entries should not block submission.
///
/// ```rust
/// use finboard_forms::{validators, FieldRules, Validate, ValidationSchema};
/// use finboard_forms::value::value_map;
///
/// let schema = ValidationSchema::new()
///     .field(FieldRules::new("email").validator(validators::required()).validator(validators::email()))
///     .field(FieldRules::new("amount").validator(validators::positive_number()));
///
/// let errors = schema
///     .evaluate(&value_map(serde_json::json!({"email": "", "amount": "12.50"})))
///     .unwrap();
/// assert_eq!(errors.message("email"), "This field is required");
/// assert_eq!(errors.get("amount"), Some(""));
/// ```
#[derive(Debug, Default)]
pub struct ValidationSchema {
    fields: Vec<FieldRules>,
}

impl ValidationSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds rules for a field.
    ///
    /// Registering the same field twice appends the later rules to the
    /// earlier ones.
    #[must_use]
    pub fn field(mut self, rules: FieldRules) -> Self {
        match self.fields.iter_mut().find(|f| f.name == rules.name) {
            Some(existing) => existing.validators.extend(rules.validators),
            None => self.fields.push(rules),
        }
        self
    }

    /// Returns the registered field names in registration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Returns every failing message per field, skipping fields that pass.
    pub fn all_errors(&self, values: &ValueMap) -> BTreeMap<String, Vec<String>> {
        self.fields
            .iter()
            .filter_map(|rules| {
                let errors = rules.all_errors(values);
                (!errors.is_empty()).then(|| (rules.name.clone(), errors))
            })
            .collect()
    }
}

impl Validate for ValidationSchema {
    fn evaluate(&self, values: &ValueMap) -> Result<ErrorMap> {
        Ok(self
            .fields
            .iter()
            .map(|rules| (rules.name.as_str(), rules.first_error(values)))
            .collect())
    }
}
