//! Submits one contact-form inquiry to a running inquiry service.
//!
//! Usage:
//!     submit_inquiry --endpoint http://127.0.0.1:8080/ --name "Jane Doe" \
//!         --email jane@example.com --phone 9876543210 \
//!         --message "I would like a kitchen renovation quote."

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use interiors_vision::client::{ContactForm, InquiryClient};
use interiors_vision::schema::InquiryInput;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/";

#[derive(Parser, Debug)]
#[command(name = "submit_inquiry", about = "Send a contact-form inquiry")]
struct Args {
    /// Base URL of the inquiry service; matches the service's default bind port
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    #[arg(long, default_value = "")]
    name: String,

    #[arg(long, default_value = "")]
    email: String,

    #[arg(long, default_value = "")]
    phone: String,

    #[arg(long, default_value = "")]
    message: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "interiors_vision=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let client =
        InquiryClient::with_timeout(&args.endpoint, Duration::from_secs(args.timeout_secs))
            .context("building inquiry client")?;

    let mut form = ContactForm::with_values(InquiryInput::new(
        args.name,
        args.email,
        args.phone,
        args.message,
    ));

    match form.submit(&client).await {
        Ok(inquiry) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&inquiry).context("rendering inquiry")?
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => {
            for (field, message) in form.field_errors().iter() {
                eprintln!("{}: {}", field, message);
            }
            if let Some(message) = form.general_error() {
                eprintln!("{}", message);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
