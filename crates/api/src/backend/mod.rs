//! Client side of the backend request service.
//!
//! The backend owns requests and their workflow state. The console reads a
//! request and forwards operator decisions, always on behalf of the operator's
//! bearer token.

pub mod handlers;
pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use reqflow_core::workflow::{ActionError, RequestDomain, WorkflowRequest};
use reqflow_shared::AppError;
use reqflow_shared::types::RequestId;

pub use handlers::BackendHandlers;
pub use http::HttpBackendClient;

/// Errors from calls to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The request never produced a response (connect failure, timeout).
    #[error("Backend unreachable: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("Invalid backend response: {0}")]
    Decode(String),

    /// The request id cannot name a single backend document.
    #[error("Request not found: {0:?}")]
    InvalidId(String),

    /// The backend base URL is unusable.
    #[error("Invalid backend configuration: {0}")]
    Config(String),
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Status { status, message } => match status {
                400 | 422 => Self::Validation(message),
                401 => Self::Unauthorized(message),
                403 => Self::Forbidden(message),
                404 => Self::NotFound(message),
                409 => Self::Conflict(message),
                _ => Self::ExternalService(message),
            },
            BackendError::InvalidId(_) => Self::NotFound("Request not found".to_string()),
            BackendError::Config(_) => Self::Internal(err.to_string()),
            BackendError::Transport(_) | BackendError::Decode(_) => {
                Self::ExternalService(err.to_string())
            }
        }
    }
}

impl From<&BackendError> for ActionError {
    fn from(err: &BackendError) -> Self {
        Self::new(err.to_string())
    }
}

/// Calls the backend makes available to the console.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Load a request with its stages and approval history.
    async fn fetch_request(
        &self,
        domain: RequestDomain,
        id: &RequestId,
        token: &str,
    ) -> Result<WorkflowRequest, BackendError>;

    /// Approve at the current stage.
    async fn approve(
        &self,
        domain: RequestDomain,
        id: &RequestId,
        token: &str,
        comment: &str,
        is_admin_approval: bool,
    ) -> Result<(), BackendError>;

    /// Reject the request.
    async fn reject(
        &self,
        domain: RequestDomain,
        id: &RequestId,
        token: &str,
        reason: &str,
    ) -> Result<(), BackendError>;

    /// Return the request for correction.
    async fn send_back(
        &self,
        domain: RequestDomain,
        id: &RequestId,
        token: &str,
        reason: &str,
    ) -> Result<(), BackendError>;

    /// Notify the requester.
    async fn notify(
        &self,
        domain: RequestDomain,
        id: &RequestId,
        token: &str,
        message: &str,
    ) -> Result<(), BackendError>;

    /// Whether `notify` is wired for this deployment.
    fn supports_notify(&self) -> bool;
}
