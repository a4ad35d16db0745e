//! Contact-form state machine.
//!
//! `Idle -> Submitting -> {Success -> Idle (reset), Failure -> Idle (error shown)}`.
//! Local validation gates the network call, and a form in `Submitting`
//! refuses a second dispatch.

use tracing::{debug, info};

use super::{InquiryTransport, SubmissionError};
use crate::schema::{FieldErrors, Inquiry, InquiryInput, fields};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Success(Inquiry),
    Failure(SubmissionError),
}

/// Why `begin_submit` did not hand out a payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitBlocked {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("the form has invalid fields")]
    Invalid(FieldErrors),
}

#[derive(Debug, Default)]
pub struct ContactForm {
    values: InquiryInput,
    field_errors: FieldErrors,
    general_error: Option<String>,
    state: FormState,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled with `values`, as if the visitor had typed them.
    pub fn with_values(values: InquiryInput) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    pub fn values(&self) -> &InquiryInput {
        &self.values
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field)
    }

    pub fn general_error(&self) -> Option<&str> {
        self.general_error.as_deref()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_submit_enabled(&self) -> bool {
        !matches!(self.state, FormState::Submitting)
    }

    // Editing a field clears the message attached to it.

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.values.name = value.into();
        self.field_errors.remove(fields::NAME);
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.values.email = value.into();
        self.field_errors.remove(fields::EMAIL);
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.values.phone = value.into();
        self.field_errors.remove(fields::PHONE);
    }

    pub fn set_message(&mut self, value: impl Into<String>) {
        self.values.message = value.into();
        self.field_errors.remove(fields::MESSAGE);
    }

    /// Validates locally and, if the form is valid and idle, moves it to
    /// `Submitting` and returns the payload to send.
    pub fn begin_submit(&mut self) -> Result<InquiryInput, SubmitBlocked> {
        if matches!(self.state, FormState::Submitting) {
            return Err(SubmitBlocked::InFlight);
        }

        self.general_error = None;
        if let Err(errors) = self.values.check() {
            debug!(fields = ?errors.field_names(), "Local validation failed");
            self.field_errors = errors.clone();
            self.state = FormState::Idle;
            return Err(SubmitBlocked::Invalid(errors));
        }

        self.field_errors = FieldErrors::new();
        self.state = FormState::Submitting;
        Ok(self.values.clone())
    }

    /// Applies the endpoint's answer to an in-flight submission.
    pub fn finish_submit(&mut self, result: Result<Inquiry, SubmissionError>) {
        match result {
            Ok(inquiry) => {
                info!(inquiry_id = inquiry.id, "Inquiry submitted");
                self.values = InquiryInput::default();
                self.field_errors = FieldErrors::new();
                self.general_error = None;
                self.state = FormState::Success(inquiry);
            }
            Err(err) => {
                info!(error = %err, "Inquiry submission failed");
                self.field_errors = err.field_errors().cloned().unwrap_or_default();
                self.general_error = err.general_message();
                self.state = FormState::Failure(err);
            }
        }
    }

    /// Returns a settled form to `Idle`. Messages from a failure stay visible
    /// until the visitor edits or resubmits.
    pub fn acknowledge(&mut self) {
        if matches!(self.state, FormState::Success(_) | FormState::Failure(_)) {
            self.state = FormState::Idle;
        }
    }

    /// Runs one full submission: local validation, one call through
    /// `transport`, then the state update.
    pub async fn submit<T>(&mut self, transport: &T) -> Result<Inquiry, SubmissionError>
    where
        T: InquiryTransport + ?Sized,
    {
        let payload = match self.begin_submit() {
            Ok(payload) => payload,
            Err(SubmitBlocked::Invalid(errors)) => return Err(SubmissionError::Validation(errors)),
            Err(SubmitBlocked::InFlight) => {
                return Err(SubmissionError::Rejected(
                    "A submission is already in progress".to_string(),
                ));
            }
        };

        let result = transport.create_inquiry(&payload).await;
        self.finish_submit(result.clone());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{INVALID_EMAIL, INVALID_PHONE, MESSAGE_TOO_SHORT, NAME_REQUIRED};
    use crate::client::GENERAL_FAILURE_MESSAGE;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockTransport {
        calls: AtomicUsize,
        response: Mutex<Result<Inquiry, SubmissionError>>,
    }

    impl MockTransport {
        fn returning(response: Result<Inquiry, SubmissionError>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response: Mutex::new(response),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl InquiryTransport for MockTransport {
        async fn create_inquiry(&self, input: &InquiryInput) -> Result<Inquiry, SubmissionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.lock().unwrap().clone().map(|mut inquiry| {
                inquiry.name = input.name.clone();
                inquiry
            })
        }
    }

    fn jane() -> InquiryInput {
        InquiryInput::new(
            "Jane Doe",
            "jane@example.com",
            "9876543210",
            "I would like a kitchen renovation quote.",
        )
    }

    fn stored(id: i32) -> Inquiry {
        let input = jane();
        Inquiry {
            id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            message: input.message,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_successful_submit_clears_the_form() {
        let transport = MockTransport::returning(Ok(stored(1)));
        let mut form = ContactForm::with_values(jane());

        let inquiry = form.submit(&transport).await.unwrap();

        assert_eq!(inquiry.id, 1);
        assert_eq!(transport.calls(), 1);
        assert_eq!(form.values(), &InquiryInput::default());
        assert!(form.field_errors().is_empty());
        assert!(form.general_error().is_none());
        assert!(matches!(form.state(), FormState::Success(i) if i.id == 1));

        form.acknowledge();
        assert_eq!(form.state(), &FormState::Idle);
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_the_network() {
        let transport = MockTransport::returning(Ok(stored(1)));
        let mut form =
            ContactForm::with_values(InquiryInput::new("Bob", "not-an-email", "123", "hi"));

        let err = form.submit(&transport).await.unwrap_err();

        assert_eq!(transport.calls(), 0);
        assert!(matches!(err, SubmissionError::Validation(_)));
        assert_eq!(form.state(), &FormState::Idle);
        assert_eq!(form.field_error(fields::EMAIL), Some(INVALID_EMAIL));
        assert_eq!(form.field_error(fields::PHONE), Some(INVALID_PHONE));
        assert_eq!(form.field_error(fields::MESSAGE), Some(MESSAGE_TOO_SHORT));
        assert_eq!(form.field_error(fields::NAME), None);
    }

    #[tokio::test]
    async fn test_storage_failure_keeps_entered_values() {
        let transport = MockTransport::returning(Err(SubmissionError::Storage));
        let mut form = ContactForm::with_values(jane());

        let err = form.submit(&transport).await.unwrap_err();

        assert_eq!(err, SubmissionError::Storage);
        assert_eq!(form.values(), &jane());
        assert_eq!(form.general_error(), Some(GENERAL_FAILURE_MESSAGE));
        assert!(form.field_errors().is_empty());
        assert!(form.is_submit_enabled());
    }

    #[tokio::test]
    async fn test_retry_is_allowed_right_after_a_failure() {
        let transport = MockTransport::returning(Err(SubmissionError::Network("timeout".into())));
        let mut form = ContactForm::with_values(jane());

        form.submit(&transport).await.unwrap_err();
        *transport.response.lock().unwrap() = Ok(stored(7));
        let inquiry = form.submit(&transport).await.unwrap();

        assert_eq!(inquiry.id, 7);
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_server_field_errors_are_shown_per_field() {
        let mut errors = FieldErrors::new();
        errors.insert(fields::PHONE, INVALID_PHONE);
        let transport = MockTransport::returning(Err(SubmissionError::Validation(errors)));
        let mut form = ContactForm::with_values(jane());

        form.submit(&transport).await.unwrap_err();

        assert_eq!(form.field_error(fields::PHONE), Some(INVALID_PHONE));
        assert!(form.general_error().is_none());
        assert_eq!(form.values(), &jane());
    }

    #[test]
    fn test_submit_is_disabled_while_in_flight() {
        let mut form = ContactForm::with_values(jane());

        assert!(form.begin_submit().is_ok());
        assert!(!form.is_submit_enabled());
        assert_eq!(form.begin_submit(), Err(SubmitBlocked::InFlight));

        form.finish_submit(Ok(stored(1)));
        assert!(form.is_submit_enabled());
    }

    #[test]
    fn test_editing_a_field_clears_its_error() {
        let mut form = ContactForm::new();
        assert!(matches!(form.begin_submit(), Err(SubmitBlocked::Invalid(_))));
        assert_eq!(form.field_error(fields::NAME), Some(NAME_REQUIRED));
        assert_eq!(form.field_errors().len(), 4);

        form.set_name("Jane Doe");
        assert_eq!(form.field_error(fields::NAME), None);
        assert_eq!(form.field_errors().len(), 3);
    }
}
