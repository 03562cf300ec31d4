//! Request workflow presentation for Reqflow.
//!
//! This module derives what the console shows for a request moving through
//! its approval chain, and drives the operator's approve/reject/send-back/notify
//! submissions.
//!
//! # Modules
//!
//! - `types` - Workflow domain types (RequestStatus, WorkflowStage, ApprovalEvent)
//! - `error` - Workflow-specific error types
//! - `timeline` - Per-stage status derivation
//! - `actions` - Permission and status gating of operator actions
//! - `dialog` - Operator form state and handler dispatch
//! - `notify` - Operator feedback seam

pub mod actions;
pub mod dialog;
pub mod error;
pub mod notify;
pub mod timeline;
pub mod types;

#[cfg(test)]
mod actions_props;
#[cfg(test)]
mod timeline_props;

pub use actions::{AvailableActions, RequestAction, RequestActions};
pub use dialog::{ActionError, ApprovalDialog, DialogError, WorkflowHandlers};
pub use error::WorkflowError;
pub use notify::Notifier;
pub use timeline::{StageView, TimelineSummary, WorkflowTimeline};
pub use types::{
    ApprovalDecision, ApprovalEvent, RequestDomain, RequestStatus, StageStatus, UserSummary,
    WorkflowRequest, WorkflowStage,
};
