//! End-to-end form flows through the public API.
//!
//! These tests drive a controller the way a UI would: change events per
//! keystroke, blur when focus leaves a field, and submit on click.

use std::cell::RefCell;

use finboard_fixtures::{Fixtures, TransactionKind};
use finboard_forms::validation::Validator;
use finboard_forms::value::{field, value_map, Value, ValueMap};
use finboard_forms::{
    validators, ErrorMap, FieldRules, FormController, FormError, FormOptions, Result,
    SubmitOutcome, SubmitPolicy, ValidationSchema,
};
use serde_json::json;

// =============================================================================
// Signup form: email + age
// =============================================================================

fn signup_validation(values: &ValueMap) -> Result<ErrorMap> {
    Ok(ErrorMap::new()
        .with("email", validators::email().check(field(values, "email"), values))
        .with(
            "age",
            validators::positive_number().check(field(values, "age"), values),
        ))
}

fn signup_form() -> FormController {
    FormController::with_validation(value_map(json!({"email": "", "age": ""})), signup_validation)
}

#[test]
fn test_submit_on_empty_form_blocks() {
    let mut form = signup_form();
    let calls = RefCell::new(0);

    let outcome = form.handle_submit(|_| *calls.borrow_mut() += 1).unwrap();

    assert_eq!(*calls.borrow(), 0);
    assert!(!outcome.is_submitted());
    assert!(form.is_touched("email"));
    assert!(form.is_touched("age"));
    assert_eq!(form.error("email"), "Invalid email address");
    assert_eq!(form.error("age"), "Must be a positive number");
}

#[test]
fn test_corrected_form_with_non_blank_policy_submits_once() {
    let mut form = signup_form()
        .options(FormOptions::default().submit_policy(SubmitPolicy::NonBlankMessages));
    form.on_change("email", "a@b.com");
    form.on_change("age", "5");

    let mut received = Vec::new();
    let outcome = form.handle_submit(|values| received.push(values.clone())).unwrap();

    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(received, vec![value_map(json!({"email": "a@b.com", "age": "5"}))]);
    assert_eq!(form.errors().get("email"), Some(""));
    assert_eq!(form.errors().get("age"), Some(""));
}

#[test]
fn test_corrected_form_with_key_count_policy_stays_blocked() {
    let mut form = signup_form();
    form.on_change("email", "a@b.com");
    form.on_change("age", "5");

    let mut called = false;
    let outcome = form.handle_submit(|_| called = true).unwrap();

    assert!(!called);
    assert_eq!(outcome, SubmitOutcome::Blocked { invalid_fields: vec![] });
    assert!(form.is_valid());
}

#[test]
fn test_typing_after_blur_clears_message_until_next_blur() {
    let mut form = signup_form();

    form.on_change("email", "ada");
    form.on_blur("email").unwrap();
    assert_eq!(form.error("email"), "Invalid email address");

    form.on_change("email", "ada@");
    assert_eq!(form.error("email"), "");

    form.on_blur("email").unwrap();
    assert_eq!(form.error("email"), "Invalid email address");

    form.on_change("email", "ada@example.com");
    form.on_blur("email").unwrap();
    assert_eq!(form.error("email"), "");
    assert_eq!(form.errors().get("age"), None);
}

#[test]
fn test_blur_never_touches_other_fields() {
    let mut form = signup_form();
    form.on_blur("age").unwrap();
    form.on_blur("age").unwrap();
    assert_eq!(form.touched().len(), 1);
    assert!(form.is_touched("age"));
    assert!(!form.is_touched("email"));
}

#[test]
fn test_reset_after_failed_submit() {
    let mut form = signup_form();
    form.on_change("email", "bad");
    form.handle_submit(|_| {}).unwrap();
    form.reset();

    assert_eq!(form.values(), &value_map(json!({"email": "", "age": ""})));
    assert!(form.errors().is_empty());
    assert!(form.touched().is_empty());
}

// =============================================================================
// Registration form built from a schema
// =============================================================================

fn registration_schema() -> ValidationSchema {
    ValidationSchema::new()
        .field(FieldRules::new("name").validator(validators::required()))
        .field(
            FieldRules::new("email")
                .validator(validators::required())
                .validator(validators::email()),
        )
        .field(
            FieldRules::new("password")
                .validator(validators::required())
                .validator(validators::min_length(8))
                .validator(validators::max_length(64)),
        )
        .field(
            FieldRules::new("confirm_password")
                .validator(validators::matches("password", Some("Passwords do not match"))),
        )
}

fn registration_form() -> FormController {
    FormController::with_validation(
        value_map(json!({"name": "", "email": "", "password": "", "confirm_password": ""})),
        registration_schema(),
    )
    .options(FormOptions::default().submit_policy(SubmitPolicy::NonBlankMessages))
}

#[test]
fn test_registration_password_mismatch() {
    let mut form = registration_form();
    form.on_change("name", "Ada Lovelace");
    form.on_change("email", "ada@example.com");
    form.on_change("password", "analytical");
    form.on_change("confirm_password", "analytica");
    form.on_blur("confirm_password").unwrap();

    assert_eq!(form.error("confirm_password"), "Passwords do not match");

    let outcome = form.handle_submit(|_| panic!("must not submit")).unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Blocked {
            invalid_fields: vec!["confirm_password".to_string()]
        }
    );
}

#[test]
fn test_registration_happy_path() {
    let mut form = registration_form();
    for (name, value) in [
        ("name", "Ada Lovelace"),
        ("email", "ada@example.com"),
        ("password", "analytical"),
        ("confirm_password", "analytical"),
    ] {
        form.on_change(name, value);
        form.on_blur(name).unwrap();
    }
    assert!(form.is_valid());

    let mut submitted = None;
    form.handle_submit(|values| submitted = Some(values["email"].clone()))
        .unwrap();
    assert_eq!(submitted, Some(json!("ada@example.com")));
}

// =============================================================================
// Transaction form backed by fixtures
// =============================================================================

fn transaction_validation(fixtures: Fixtures) -> impl Fn(&ValueMap) -> Result<ErrorMap> {
    move |values: &ValueMap| {
        let kind: TransactionKind = serde_json::from_value(field(values, "type").clone())
            .map_err(|e| FormError::validator(format!("unreadable transaction type: {e}")))?;
        let category = field(values, "category").as_str().unwrap_or_default();
        let category_ok = fixtures
            .category_by_name(category)
            .is_some_and(|c| c.kind == kind);

        Ok(ErrorMap::new()
            .with(
                "title",
                validators::required().check(field(values, "title"), values),
            )
            .with(
                "amount",
                validators::positive_number().check(field(values, "amount"), values),
            )
            .with(
                "category",
                if category_ok {
                    ""
                } else {
                    "Choose a category for this transaction type"
                },
            ))
    }
}

fn transaction_form() -> FormController {
    let fixtures = Fixtures::load().unwrap();
    FormController::with_validation(
        value_map(json!({"type": "expense", "title": "", "amount": "", "category": ""})),
        transaction_validation(fixtures),
    )
    .options(FormOptions::default().submit_policy(SubmitPolicy::NonBlankMessages))
}

#[test]
fn test_transaction_category_must_match_type() {
    let mut form = transaction_form();
    form.on_change("title", "Paycheck");
    form.on_change("amount", "5200");
    form.on_change("category", "Salary");
    form.on_blur("category").unwrap();
    assert_eq!(
        form.error("category"),
        "Choose a category for this transaction type"
    );

    form.on_change("type", "income");
    form.on_blur("category").unwrap();
    assert_eq!(form.error("category"), "");

    let mut saved = Vec::new();
    assert!(form
        .handle_submit(|values| saved.push(values.clone()))
        .unwrap()
        .is_submitted());
    assert_eq!(saved[0]["amount"], json!("5200"));
}

#[test]
fn test_transaction_validator_failure_reaches_caller() {
    let mut form = transaction_form();
    form.on_change("type", "transfer");

    let err = form.on_blur("title").unwrap_err();
    assert!(err.to_string().contains("unreadable transaction type"));
    assert!(form.is_touched("title"));
    assert!(form.errors().is_empty());

    let mut called = false;
    assert!(form.handle_submit(|_| called = true).is_err());
    assert!(!called);
}

// =============================================================================
// Options
// =============================================================================

#[test]
fn test_options_from_json_drive_controller() {
    let options = FormOptions::from_json(
        r#"{"submit_policy": "non_blank_messages", "clear_error_on_change": false}"#,
    )
    .unwrap();
    let mut form = signup_form().options(options);

    form.on_blur("email").unwrap();
    form.on_change("email", "a@b.com");
    assert_eq!(form.error("email"), "Invalid email address");

    form.on_change("age", Value::from(3));
    assert!(form.handle_submit(|_| {}).unwrap().is_submitted());
}
