//! # Client Submission Flow
//!
//! The browser-side half of the inquiry pipeline: a typed HTTP client for the
//! submission endpoint and the contact-form state machine that drives it.

use async_trait::async_trait;
use thiserror::Error;

use crate::schema::{FieldErrors, Inquiry, InquiryInput};

pub mod form;
pub mod http;

pub use form::{ContactForm, FormState, SubmitBlocked};
pub use http::{ClientBuildError, InquiryClient};

/// Message shown when a failure cannot be pinned to a single field.
pub const GENERAL_FAILURE_MESSAGE: &str =
    "Something went wrong while sending your message. Please try again.";

/// Why a submission did not produce a stored inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The endpoint rejected one or more fields.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    /// The endpoint refused the request for a reason not tied to a field.
    #[error("request rejected: {0}")]
    Rejected(String),
    /// The endpoint accepted the request but could not store it.
    #[error("the inquiry could not be saved")]
    Storage,
    /// The request never reached the endpoint or the response was unusable.
    #[error("network error: {0}")]
    Network(String),
}

impl SubmissionError {
    /// Field-level messages, when the failure is attributable to fields.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            SubmissionError::Validation(errors) if !errors.is_empty() => Some(errors),
            _ => None,
        }
    }

    /// Message to show near the form rather than near a field.
    pub fn general_message(&self) -> Option<String> {
        match self {
            SubmissionError::Validation(errors) if !errors.is_empty() => None,
            SubmissionError::Validation(_) => Some(GENERAL_FAILURE_MESSAGE.to_string()),
            SubmissionError::Rejected(message) => Some(message.clone()),
            SubmissionError::Storage | SubmissionError::Network(_) => {
                Some(GENERAL_FAILURE_MESSAGE.to_string())
            }
        }
    }
}

/// Anything that can deliver an inquiry to the submission endpoint.
#[async_trait]
pub trait InquiryTransport: Send + Sync {
    async fn create_inquiry(&self, input: &InquiryInput) -> Result<Inquiry, SubmissionError>;
}
