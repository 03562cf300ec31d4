//! Unit tests for application errors.

use rstest::rstest;

use crate::error::AppError;

#[rstest]
#[case(AppError::Unauthorized(String::new()), 401, "UNAUTHORIZED")]
#[case(AppError::Forbidden(String::new()), 403, "FORBIDDEN")]
#[case(AppError::NotFound(String::new()), 404, "NOT_FOUND")]
#[case(AppError::Validation(String::new()), 400, "VALIDATION_ERROR")]
#[case(AppError::Conflict(String::new()), 409, "CONFLICT")]
#[case(AppError::ExternalService(String::new()), 502, "EXTERNAL_SERVICE_ERROR")]
#[case(AppError::Internal(String::new()), 500, "INTERNAL_ERROR")]
fn test_status_and_code(#[case] err: AppError, #[case] status: u16, #[case] code: &str) {
    assert_eq!(err.status_code(), status);
    assert_eq!(err.error_code(), code);
}

#[test]
fn test_error_display() {
    assert_eq!(
        AppError::Unauthorized("msg".into()).to_string(),
        "Authentication failed: msg"
    );
    assert_eq!(
        AppError::Forbidden("msg".into()).to_string(),
        "Access denied: msg"
    );
    assert_eq!(
        AppError::ExternalService("msg".into()).to_string(),
        "External service error: msg"
    );
}

#[test]
fn test_message_strips_prefix() {
    let err = AppError::Validation("Rejection reason is required".into());
    assert_eq!(err.message(), "Rejection reason is required");
}
