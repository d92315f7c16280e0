//! Handler for the contact form.
//!
//! Validates the raw submission, then forwards it to the configured
//! [`folio_mail::ContactNotifier`]. A submission either fully succeeds or
//! fully fails; delivery is attempted once.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use folio_core::contact::validate_contact;
use folio_core::error::CoreError;
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Confirmation shown to the visitor after a successful send.
pub const CONTACT_SUCCESS_MESSAGE: &str =
    "Thank you for your message! I'll get back to you as soon as possible.";

#[derive(Debug, Serialize)]
pub struct ContactReceipt {
    pub message: &'static str,
}

/// POST /api/v1/contact
///
/// - 200 with a receipt when the email was handed off.
/// - 400 `VALIDATION_ERROR` with a `fields` map when any field is invalid.
/// - 502 `EMAIL_DELIVERY_FAILED` when the notifier fails.
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<DataResponse<ContactReceipt>>> {
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let Value::Object(input) = body else {
        return Err(AppError::BadRequest(
            "Contact submission must be a JSON object".to_string(),
        ));
    };

    let submission = validate_contact(&input).map_err(|errors| {
        let invalid: Vec<&str> = errors.fields().collect();
        tracing::debug!(invalid_fields = ?invalid, "Contact submission rejected");
        CoreError::InvalidFields(errors)
    })?;

    state.notifier.send_contact(&submission).await?;

    tracing::info!(
        service_type = submission.service_type.as_str(),
        "Contact submission forwarded",
    );

    Ok(Json(DataResponse {
        data: ContactReceipt {
            message: CONTACT_SUCCESS_MESSAGE,
        },
    }))
}
