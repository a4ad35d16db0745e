//! # Inquiry Submission Handler
//!
//! Accepts a contact-form submission, validates it with the shared schema and
//! persists it through the configured [`InquiryStore`](crate::repositories::InquiryStore).

use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use metrics::counter;

use crate::error::ApiError;
use crate::schema::{self, Inquiry, InquiryInput};
use crate::server::AppState;

/// Submit a contact-form inquiry
///
/// Identical payloads are not deduplicated; every accepted submission
/// creates a new record.
#[utoipa::path(
    post,
    path = "/api/inquiries",
    request_body = InquiryInput,
    responses(
        (status = 201, description = "Inquiry stored", body = Inquiry, headers(
            ("X-Trace-Id", description = "Trace identifier for request correlation")
        )),
        (status = 400, description = "Validation failed; `details` maps field names to messages", body = ApiError),
        (status = 413, description = "Request body too large", body = ApiError),
        (status = 500, description = "Inquiry could not be stored", body = ApiError),
        (status = 503, description = "Storage temporarily unavailable", body = ApiError)
    ),
    tag = "inquiries"
)]
pub async fn create_inquiry(
    State(state): State<AppState>,
    payload: Result<Json<InquiryInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Inquiry>), ApiError> {
    let Json(candidate) = payload.map_err(|rejection| {
        counter!("inquiries_rejected_total", "reason" => "malformed").increment(1);
        tracing::info!(rejection = %rejection, "Rejected malformed inquiry payload");
        ApiError::from(rejection)
    })?;

    let input = schema::validate(candidate).map_err(|errors| {
        counter!("inquiries_rejected_total", "reason" => "validation").increment(1);
        tracing::info!(fields = ?errors.field_names(), "Inquiry failed validation");
        ApiError::from(errors)
    })?;

    let inquiry = state.store.insert(input).await.map_err(|err| {
        counter!("inquiries_rejected_total", "reason" => "storage").increment(1);
        ApiError::from(err)
    })?;

    counter!("inquiries_created_total").increment(1);
    tracing::info!(inquiry_id = inquiry.id, "Inquiry stored");

    Ok((StatusCode::CREATED, Json(inquiry)))
}
