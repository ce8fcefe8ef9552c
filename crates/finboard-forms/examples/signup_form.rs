//! Signup form walkthrough
//!
//! Replays a short sequence of UI events against a controller and prints
//! the state after each one.
//! Run with: cargo run --example signup_form -- --verbose

use clap::Parser;
use finboard_forms::{
    validators, FieldRules, FormController, FormEvent, FormOptions, SubmitPolicy,
    ValidationSchema,
};
use finboard_forms::value::{value_map, Value};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Replays a scripted signup session against a form controller.
#[derive(Parser)]
#[command(name = "signup_form")]
struct Args {
    /// Log every field change.
    #[arg(short, long)]
    verbose: bool,
}

enum UiEvent {
    Change(&'static str, Value),
    Blur(&'static str),
    Submit,
    Reset,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Setup logging
    let log_level = if args.verbose { Level::TRACE } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let schema = ValidationSchema::new()
        .field(
            FieldRules::new("email")
                .validator(validators::required())
                .validator(validators::email()),
        )
        .field(
            FieldRules::new("password")
                .validator(validators::required())
                .validator(validators::min_length(8)),
        )
        .field(FieldRules::new("confirm_password").validator(validators::matches("password", None)))
        .field(FieldRules::new("monthly_income").validator(validators::positive_number()));

    let initial = value_map(serde_json::json!({
        "email": "",
        "password": "",
        "confirm_password": "",
        "monthly_income": ""
    }));
    let mut form = FormController::with_validation(initial, schema)
        .options(FormOptions::default().submit_policy(SubmitPolicy::NonBlankMessages));

    form.subscribe(|event| {
        if let FormEvent::Submitted { outcome } = event {
            info!(?outcome, "submit finished");
        }
    });

    let script = [
        UiEvent::Submit,
        UiEvent::Change("email", "sarah@example".into()),
        UiEvent::Blur("email"),
        UiEvent::Change("email", "sarah@example.com".into()),
        UiEvent::Blur("email"),
        UiEvent::Change("password", "password123".into()),
        UiEvent::Change("confirm_password", "password123".into()),
        UiEvent::Change("monthly_income", "5200".into()),
        UiEvent::Submit,
        UiEvent::Reset,
    ];

    for event in script {
        match event {
            UiEvent::Change(field, value) => form.on_change(field, value),
            UiEvent::Blur(field) => form.on_blur(field)?,
            UiEvent::Submit => {
                form.handle_submit(|values| {
                    info!(email = %values["email"], "account created");
                })?;
            }
            UiEvent::Reset => form.reset(),
        }
        println!("{}", serde_json::to_string(&form.snapshot())?);
    }

    Ok(())
}
