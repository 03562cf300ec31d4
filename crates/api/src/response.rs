//! JSON error bodies shared by the route handlers.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use reqflow_core::workflow::{DialogError, WorkflowError};
use reqflow_shared::AppError;

/// Builds `{"error": code, "message": message}` with the given status.
pub fn error_response(status: u16, code: &str, message: &str) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": code, "message": message }))).into_response()
}

/// Response for an application error.
pub fn app_error(err: &AppError) -> Response {
    error_response(err.status_code(), err.error_code(), err.message())
}

/// Response for a workflow error.
pub fn workflow_error(err: &WorkflowError) -> Response {
    error_response(err.status_code(), err.error_code(), &err.to_string())
}

/// Response for a refused dialog submission that never reached the backend.
pub fn dialog_error(err: &DialogError) -> Response {
    let (status, code) = match err {
        DialogError::ReasonRequired(_) | DialogError::MessageRequired => (400, "VALIDATION_ERROR"),
        DialogError::AdminApprovalNotPermitted => (403, "ADMIN_APPROVAL_NOT_PERMITTED"),
        DialogError::NotifyUnavailable => (403, "NOTIFY_UNAVAILABLE"),
        DialogError::SubmissionInFlight => (409, "SUBMISSION_IN_FLIGHT"),
        DialogError::Action(_) => (502, "EXTERNAL_SERVICE_ERROR"),
    };
    error_response(status, code, &err.to_string())
}
