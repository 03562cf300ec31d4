//! Workflow error types for request approval presentation.

use thiserror::Error;

use crate::workflow::actions::RequestAction;
use crate::workflow::types::{RequestDomain, RequestStatus};

/// Errors that can occur while deriving workflow state or gating actions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// The request's current stage is not part of its stage list.
    #[error("Current stage {stage} is not part of the workflow")]
    UnknownCurrentStage {
        /// The stage identifier the backend reported.
        stage: String,
    },

    /// The action is not offered for this request and operator.
    #[error("Action {action} is not available for a {status} request")]
    ActionNotAvailable {
        /// The attempted action.
        action: RequestAction,
        /// The request's status.
        status: RequestStatus,
    },

    /// The operator lacks the department permission for this request.
    #[error("Operator cannot manage {0} requests")]
    CannotManageDomain(RequestDomain),

    /// Unrecognised request domain.
    #[error("Unknown request domain {0}")]
    UnknownDomain(String),
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::UnknownCurrentStage { .. } => 422,
            Self::ActionNotAvailable { .. } | Self::CannotManageDomain(_) => 403,
            Self::UnknownDomain(_) => 404,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCurrentStage { .. } => "UNKNOWN_CURRENT_STAGE",
            Self::ActionNotAvailable { .. } => "ACTION_NOT_AVAILABLE",
            Self::CannotManageDomain(_) => "CANNOT_MANAGE_DOMAIN",
            Self::UnknownDomain(_) => "UNKNOWN_DOMAIN",
        }
    }
}
