//! # Inquiry Schema
//!
//! The wire shapes of the contact form and the rules an inquiry must satisfy
//! before it is accepted. The same module is linked into the server and the
//! client binaries, so both sides validate against identical rules.

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

/// Field names as they appear on the wire and in [`FieldErrors`].
pub mod fields {
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const MESSAGE: &str = "message";
}

pub const NAME_REQUIRED: &str = "Name is required";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const INVALID_PHONE: &str = "Please enter a valid phone number";
pub const MESSAGE_TOO_SHORT: &str = "Message must be at least 10 characters";

/// Candidate inquiry as submitted by the contact form.
///
/// Absent, `null` and non-string JSON fields deserialize as empty strings so
/// they are reported by the validator against the specific field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct InquiryInput {
    /// Visitor's name
    #[serde(deserialize_with = "lenient_string")]
    #[validate(custom(function = validate_name))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    /// Contact email address
    #[serde(deserialize_with = "lenient_string")]
    #[validate(custom(function = validate_email))]
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// Contact phone number, any format of at least 10 characters
    #[serde(deserialize_with = "lenient_string")]
    #[validate(length(min = 10, message = "Please enter a valid phone number"))]
    #[schema(example = "9876543210")]
    pub phone: String,
    /// Free-text message
    #[serde(deserialize_with = "lenient_string")]
    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    #[schema(example = "I would like a kitchen renovation quote.")]
    pub message: String,
}

/// Keeps strings; anything else becomes empty and fails that field's rule.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(value) => Ok(value),
        _ => Ok(String::new()),
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(NAME_REQUIRED)));
    }
    Ok(())
}

/// RFC 5322-style address whose domain has at least two labels.
fn validate_email(email: &str) -> Result<(), ValidationError> {
    let has_dotted_domain = email.rsplit_once('@').is_some_and(|(_, domain)| {
        domain
            .rsplit_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
            && domain.split('.').all(|label| !label.is_empty())
    });

    if !has_dotted_domain || !email.validate_email() {
        return Err(ValidationError::new("email").with_message(Cow::Borrowed(INVALID_EMAIL)));
    }
    Ok(())
}

impl InquiryInput {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            message: message.into(),
        }
    }

    /// Checks every rule and reports all failing fields at once.
    pub fn check(&self) -> Result<(), FieldErrors> {
        Validate::validate(self).map_err(FieldErrors::from)
    }
}

/// Validates a candidate inquiry, handing it back unchanged when accepted.
pub fn validate(input: InquiryInput) -> Result<InquiryInput, FieldErrors> {
    input.check()?;
    Ok(input)
}

/// A persisted inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    /// Store-assigned identifier
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "9876543210")]
    pub phone: String,
    #[schema(example = "I would like a kitchen renovation quote.")]
    pub message: String,
    /// Time the record was written (ISO 8601, UTC)
    #[schema(value_type = String, example = "2025-01-15T10:30:00.000Z")]
    pub created_at: DateTime<Utc>,
}

/// Field name to human-readable message, one message per failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error, ToSchema)]
#[serde(transparent)]
#[error("{} field(s) failed validation", .0.len())]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field`; the first message per field wins.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, failures) in errors.field_errors() {
            let Some(first) = failures.first() else {
                continue;
            };
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            out.insert(field.to_string(), message);
        }
        out
    }
}
