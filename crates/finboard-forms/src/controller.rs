//! Form state controller.
//!
//! [`FormController`] owns the values, errors and touched flags of one form
//! and applies the change, blur and submit rules to them. It has no opinion
//! about which fields exist or what their messages say; all of that comes
//! from the [`Validate`] implementation the caller hands it.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{ErrorMap, Result};
use crate::options::FormOptions;
use crate::value::{Value, ValueMap};

/// Which fields have been blurred or swept by a submit attempt.
pub type TouchedMap = BTreeMap<String, bool>;

/// Whole-form validation.
///
/// Implementations look at the full value set and report messages per field.
/// Returning `Err` means the validation itself broke; the controller passes
/// that error straight back to whoever fired the event.
pub trait Validate {
    /// Evaluates every field it knows about.
    ///
    /// # Errors
    ///
    /// Returns an error when validation cannot be carried out.
    fn evaluate(&self, values: &ValueMap) -> Result<ErrorMap>;
}

impl<F> Validate for F
where
    F: Fn(&ValueMap) -> Result<ErrorMap>,
{
    fn evaluate(&self, values: &ValueMap) -> Result<ErrorMap> {
        self(values)
    }
}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// The submit callback ran.
    Submitted,
    /// Validation blocked the callback.
    ///
    /// `invalid_fields` lists fields with a non-empty message; it can be empty
    /// when the key-count policy blocks on blank entries.
    Blocked { invalid_fields: Vec<String> },
}

impl SubmitOutcome {
    /// Returns whether the submit callback ran.
    pub const fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted)
    }
}

/// State change notifications, emitted once per handler call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// A field value was recorded.
    Changed { field: String },
    /// A field was touched and revalidated.
    Blurred { field: String },
    /// A submit attempt finished.
    Submitted { outcome: SubmitOutcome },
    /// Values were restored and metadata cleared.
    Reset,
}

/// Handle returned by [`FormController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&FormEvent) + Send>;

/// Read-only copy of the form state for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSnapshot {
    pub values: ValueMap,
    pub errors: ErrorMap,
    pub touched: TouchedMap,
}

/// Mutable state holder for one form instance.
pub struct FormController {
    initial_values: ValueMap,
    values: ValueMap,
    errors: ErrorMap,
    touched: TouchedMap,
    validate: Option<Box<dyn Validate + Send>>,
    options: FormOptions,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl fmt::Debug for FormController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("touched", &self.touched)
            .field("has_validation", &self.validate.is_some())
            .field("options", &self.options)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl FormController {
    /// Creates a controller with no validation.
    pub fn new(initial_values: ValueMap) -> Self {
        Self {
            values: initial_values.clone(),
            initial_values,
            errors: ErrorMap::new(),
            touched: TouchedMap::new(),
            validate: None,
            options: FormOptions::default(),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Creates a controller that validates with `validate`.
    ///
    /// Nothing is validated until the first blur or submit.
    pub fn with_validation(
        initial_values: ValueMap,
        validate: impl Validate + Send + 'static,
    ) -> Self {
        let mut controller = Self::new(initial_values);
        controller.validate = Some(Box::new(validate));
        controller
    }

    /// Applies options.
    #[must_use]
    pub fn options(mut self, options: FormOptions) -> Self {
        self.options = options;
        self
    }

    /// Records a new value for a field.
    ///
    /// A non-empty error on that field is blanked so the user sees the
    /// message go away as soon as they start correcting it. Nothing is
    /// revalidated and the field is not marked touched.
    pub fn on_change(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        trace!(field = %field, "field changed");

        if self.options.clear_error_on_change {
            if let Some(message) = self.errors.entry_mut(&field) {
                message.clear();
            }
        }
        self.values.insert(field.clone(), value.into());
        self.notify(&FormEvent::Changed { field });
    }

    /// Marks a field touched and revalidates it.
    ///
    /// The validator sees the full value set, but only its entry for `field`
    /// is merged; other fields keep their current errors. When the result has
    /// no entry for `field`, the existing error stays as it was.
    ///
    /// # Errors
    ///
    /// Propagates a validator failure. The field is already marked touched at
    /// that point and errors are left unchanged.
    pub fn on_blur(&mut self, field: &str) -> Result<()> {
        if !self.values.contains_key(field) {
            debug!(field, "blur on a field with no value");
        }
        self.touched.insert(field.to_string(), true);

        if let Some(validate) = &self.validate {
            let result = validate.evaluate(&self.values)?;
            if let Some(message) = result.get(field) {
                debug!(field, valid = message.is_empty(), "field revalidated");
                self.errors.set(field, message);
            }
        }

        self.notify(&FormEvent::Blurred {
            field: field.to_string(),
        });
        Ok(())
    }

    /// Runs one submit attempt.
    ///
    /// The validator result replaces all errors, every field with a value is
    /// marked touched, and `on_submit` runs only when the configured
    /// [`SubmitPolicy`](crate::SubmitPolicy) accepts the result. Without a
    /// validator `on_submit` always runs.
    ///
    /// # Errors
    ///
    /// Propagates a validator failure before any state is changed.
    pub fn handle_submit<F>(&mut self, on_submit: F) -> Result<SubmitOutcome>
    where
        F: FnOnce(&ValueMap),
    {
        let result = match &self.validate {
            Some(validate) => Some(validate.evaluate(&self.values)?),
            None => None,
        };

        for field in self.values.keys() {
            self.touched.insert(field.clone(), true);
        }

        let outcome = match result {
            Some(errors) => {
                let accepted = self.options.submit_policy.accepts(&errors);
                let invalid_fields = errors.invalid_fields();
                self.errors = errors;
                if accepted {
                    SubmitOutcome::Submitted
                } else {
                    SubmitOutcome::Blocked { invalid_fields }
                }
            }
            None => SubmitOutcome::Submitted,
        };

        match &outcome {
            SubmitOutcome::Submitted => {
                debug!(fields = self.values.len(), "submitting form");
                on_submit(&self.values);
            }
            SubmitOutcome::Blocked { invalid_fields } => {
                debug!(
                    invalid = invalid_fields.len(),
                    entries = self.errors.len(),
                    "submit blocked by validation"
                );
            }
        }

        self.notify(&FormEvent::Submitted {
            outcome: outcome.clone(),
        });
        Ok(outcome)
    }

    /// Returns a submit handler bound to this controller.
    ///
    /// Each call of the handler is one [`handle_submit`](Self::handle_submit)
    /// attempt with `on_submit` as the callback.
    ///
    /// The handler borrows the controller mutably for as long as it lives,
    /// so no other handler can run in between. Drop it before the next
    /// [`on_change`](Self::on_change) or use `handle_submit` directly.
    pub fn submit_handler<'a, F>(
        &'a mut self,
        mut on_submit: F,
    ) -> impl FnMut() -> Result<SubmitOutcome> + 'a
    where
        F: FnMut(&ValueMap) + 'a,
    {
        move || self.handle_submit(&mut on_submit)
    }

    /// Restores the initial values and forgets all errors and touched flags.
    pub fn reset(&mut self) {
        debug!("resetting form");
        self.values.clone_from(&self.initial_values);
        self.errors.clear();
        self.touched.clear();
        self.notify(&FormEvent::Reset);
    }

    /// Registers a listener called after every state change.
    pub fn subscribe(&mut self, listener: impl FnMut(&FormEvent) + Send + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, event: &FormEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    /// Returns the current values.
    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    /// Returns the current value of a field, if it has one.
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Returns the values the form was created with.
    pub fn initial_values(&self) -> &ValueMap {
        &self.initial_values
    }

    /// Returns the per-field messages, blank entries included.
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Returns the message for a field, or `""` when it has none.
    pub fn error(&self, field: &str) -> &str {
        self.errors.message(field)
    }

    /// Returns the touched flags.
    pub fn touched(&self) -> &TouchedMap {
        &self.touched
    }

    /// Returns whether a field has been blurred or swept by a submit.
    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.get(field).copied().unwrap_or(false)
    }

    /// Returns whether no field carries a non-empty message.
    pub fn is_valid(&self) -> bool {
        !self.errors.has_messages()
    }

    /// Returns whether the values differ from the initial values.
    pub fn is_dirty(&self) -> bool {
        self.values != self.initial_values
    }

    /// Returns whether a validator was supplied.
    pub fn has_validation(&self) -> bool {
        self.validate.is_some()
    }

    /// Returns the options in effect.
    pub fn form_options(&self) -> FormOptions {
        self.options
    }

    /// Copies the current state for rendering.
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            values: self.values.clone(),
            errors: self.errors.clone(),
            touched: self.touched.clone(),
        }
    }
}
