//! HTTP transport for the submission endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use super::{InquiryTransport, SubmissionError};
use crate::error::VALIDATION_FAILED;
use crate::schema::{FieldErrors, Inquiry, InquiryInput};

const INQUIRIES_PATH: &str = "api/inquiries";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Problem body returned by the endpoint on failure; every part is optional
/// so that foreign error pages still decode.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<serde_json::Value>,
}

/// Posts inquiries to a running inquiry service.
#[derive(Debug, Clone)]
pub struct InquiryClient {
    http: Client,
    endpoint: Url,
}

impl InquiryClient {
    /// Builds a client for the service rooted at `base_url`.
    ///
    /// The endpoint is resolved relative to the base, so a path prefix such
    /// as `https://example.com/site/` is kept. A base without a trailing
    /// slash is treated as a directory.
    pub fn new(base_url: &str) -> Result<Self, ClientBuildError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientBuildError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join(INQUIRIES_PATH)?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl InquiryTransport for InquiryClient {
    async fn create_inquiry(&self, input: &InquiryInput) -> Result<Inquiry, SubmissionError> {
        debug!(endpoint = %self.endpoint, "Submitting inquiry");

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(input)
            .send()
            .await
            .map_err(|err| SubmissionError::Network(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<Inquiry>()
                .await
                .map_err(|err| SubmissionError::Network(format!("unreadable response: {}", err)));
        }

        let body: ErrorBody = response.json().await.unwrap_or_default();
        warn!(status = status.as_u16(), code = ?body.code, "Inquiry submission failed");
        Err(map_failure(status, body))
    }
}

fn map_failure(status: StatusCode, body: ErrorBody) -> SubmissionError {
    if status.is_server_error() {
        return SubmissionError::Storage;
    }

    if status == StatusCode::BAD_REQUEST
        && body.code.as_deref().is_none_or(|code| code == VALIDATION_FAILED)
        && let Some(details) = body.details
        && let Ok(errors) = serde_json::from_value::<FieldErrors>(details)
        && !errors.is_empty()
    {
        return SubmissionError::Validation(errors);
    }

    let message = body
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Request rejected with status {}", status.as_u16()));
    SubmissionError::Rejected(message)
}
