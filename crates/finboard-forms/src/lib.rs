//! # finboard-forms
//!
//! Form state management and field validation for finboard.
//!
//! This crate provides:
//! - [`FormController`], which owns a form's values, errors and touched flags
//!   and applies the change, blur and submit rules
//! - Composable field validators in [`validation`] with short constructors
//!   in [`validators`]
//! - [`ValidationSchema`] for composing rules into whole-form validation
//! - [`FormOptions`] for configuring submit behavior
//!
//! ## Quick Start
//!
//! ```rust
//! use finboard_forms::{
//!     validators, ErrorMap, FormController, SubmitOutcome,
//! };
//! use finboard_forms::validation::Validator;
//! use finboard_forms::value::{field, value_map, ValueMap};
//!
//! let initial = value_map(serde_json::json!({"email": "", "age": ""}));
//! let mut form = FormController::with_validation(initial, |values: &ValueMap| -> finboard_forms::Result<ErrorMap> {
//!     let mut errors = ErrorMap::new();
//!     errors.set("email", validators::email().check(field(values, "email"), values));
//!     errors.set("age", validators::positive_number().check(field(values, "age"), values));
//!     Ok(errors)
//! });
//!
//! let outcome = form.handle_submit(|_| unreachable!()).unwrap();
//! assert!(matches!(outcome, SubmitOutcome::Blocked { .. }));
//! assert_eq!(form.error("email"), "Invalid email address");
//! assert_eq!(form.error("age"), "Must be a positive number");
//! assert!(form.is_touched("email") && form.is_touched("age"));
//! ```
//!
//! ## Validation timing
//!
//! - **change** stores the value and blanks a visible error on that field.
//! - **blur** marks the field touched and merges only that field's result.
//! - **submit** replaces all errors, touches every field and calls the
//!   callback only when the [`SubmitPolicy`] accepts the result.
//!
//! ## Using a schema
//!
//! ```rust
//! use finboard_forms::{validators, FieldRules, FormController, FormOptions, SubmitPolicy, ValidationSchema};
//! use finboard_forms::value::value_map;
//!
//! let schema = ValidationSchema::new()
//!     .field(FieldRules::new("title").validator(validators::required()).validator(validators::max_length(40)))
//!     .field(FieldRules::new("amount").validator(validators::positive_number()));
//!
//! let mut form = FormController::with_validation(
//!     value_map(serde_json::json!({"title": "Rent", "amount": "950"})),
//!     schema,
//! )
//! .options(FormOptions::default().submit_policy(SubmitPolicy::NonBlankMessages));
//!
//! let mut saved = None;
//! let outcome = form.handle_submit(|values| saved = Some(values.clone())).unwrap();
//! assert!(outcome.is_submitted());
//! assert!(saved.is_some());
//! ```

mod controller;
mod error;
mod options;
mod schema;
pub mod validation;
pub mod validators;
pub mod value;

pub use controller::{
    FormController, FormEvent, FormSnapshot, ListenerId, SubmitOutcome, TouchedMap, Validate,
};
pub use error::{ErrorMap, FormError, Result};
pub use options::{FormOptions, SubmitPolicy};
pub use schema::{FieldRules, ValidationSchema};
