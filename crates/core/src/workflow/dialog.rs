//! Operator form state and submission for approval actions.
//!
//! `ApprovalDialog` holds what the operator typed (approval comment, rejection
//! or send-back reason, notification message, admin-approval toggle) and hands
//! it to caller-supplied `WorkflowHandlers`. Each submit makes exactly one
//! handler call; there is no retry. A failure keeps the form and surfaces the
//! handler's message; a success clears the form and closes the dialog.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use reqflow_shared::Permissions;

use crate::workflow::actions::{RequestAction, RequestActions};
use crate::workflow::notify::Notifier;

/// A handler failure, carrying the message to show the operator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ActionError {
    message: String,
}

impl ActionError {
    /// Creates an action error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The operator-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Async callbacks that carry out operator actions.
#[async_trait]
pub trait WorkflowHandlers: Send + Sync {
    /// Approve with an optional comment.
    async fn on_approve(&self, comment: &str, is_admin_approval: bool) -> Result<(), ActionError>;

    /// Reject with a reason.
    async fn on_reject(&self, reason: &str) -> Result<(), ActionError>;

    /// Send back for correction with a reason.
    async fn on_send_back(&self, reason: &str) -> Result<(), ActionError>;

    /// Whether `on_notify` is wired to anything.
    fn supports_notify(&self) -> bool {
        false
    }

    /// Notify the requester.
    async fn on_notify(&self, _message: &str) -> Result<(), ActionError> {
        Err(ActionError::new("Notifications are not available"))
    }
}

/// Reasons a submission did not go through.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DialogError {
    /// Reject and send-back need a reason.
    #[error("A reason is required to {0}")]
    ReasonRequired(RequestAction),

    /// Notify needs a message.
    #[error("A notification message is required")]
    MessageRequired,

    /// The operator cannot flag an approval as an admin approval.
    #[error("Admin approval requires the approve-all permission")]
    AdminApprovalNotPermitted,

    /// No notify handler was supplied.
    #[error("Notifications are not available for this request")]
    NotifyUnavailable,

    /// Another submission has not resolved yet.
    #[error("A submission is already in progress")]
    SubmissionInFlight,

    /// The handler failed.
    #[error(transparent)]
    Action(#[from] ActionError),
}

/// Form state for the approval dialog.
pub struct ApprovalDialog {
    notifier: Arc<dyn Notifier>,
    can_approve_all: bool,
    comment: String,
    reason: String,
    message: String,
    is_admin_approval: bool,
    is_open: bool,
    is_submitting: bool,
    error: Option<String>,
}

impl std::fmt::Debug for ApprovalDialog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApprovalDialog")
            .field("can_approve_all", &self.can_approve_all)
            .field("is_admin_approval", &self.is_admin_approval)
            .field("is_open", &self.is_open)
            .field("is_submitting", &self.is_submitting)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl ApprovalDialog {
    /// Creates a closed, empty dialog for an operator.
    pub fn new(permissions: &Permissions, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            can_approve_all: RequestActions::can_toggle_admin_approval(permissions),
            comment: String::new(),
            reason: String::new(),
            message: String::new(),
            is_admin_approval: false,
            is_open: false,
            is_submitting: false,
            error: None,
        }
    }

    /// Open the dialog, clearing any previous error.
    pub fn open(&mut self) {
        self.is_open = true;
        self.error = None;
    }

    /// Close the dialog and discard form state.
    pub fn close(&mut self) {
        self.reset();
        self.is_open = false;
    }

    /// Whether the dialog is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Whether a submission is in flight. Submit controls are disabled while true.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Last error shown to the operator.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the admin-approval toggle is rendered.
    #[must_use]
    pub fn shows_admin_toggle(&self) -> bool {
        self.can_approve_all
    }

    /// Current approval comment.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Current rejection or send-back reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Current admin-approval flag.
    #[must_use]
    pub fn is_admin_approval(&self) -> bool {
        self.is_admin_approval
    }

    /// Set the approval comment.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    /// Set the rejection or send-back reason.
    pub fn set_reason(&mut self, reason: impl Into<String>) {
        self.reason = reason.into();
    }

    /// Set the notification message.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Flip the admin-approval toggle.
    ///
    /// Without the approve-all permission the toggle does not exist, so the
    /// flag stays false and setting it is refused.
    pub fn set_admin_approval(&mut self, value: bool) -> Result<(), DialogError> {
        if value && !self.can_approve_all {
            return Err(DialogError::AdminApprovalNotPermitted);
        }
        self.is_admin_approval = value;
        Ok(())
    }

    /// Whether the reject/send-back submit control is enabled.
    #[must_use]
    pub fn can_submit_reason(&self) -> bool {
        !self.is_submitting && !self.reason.trim().is_empty()
    }

    /// Submit an approval.
    pub async fn submit_approve(
        &mut self,
        handlers: &dyn WorkflowHandlers,
    ) -> Result<(), DialogError> {
        self.begin()?;
        let result = handlers
            .on_approve(self.comment.trim(), self.is_admin_approval)
            .await;
        self.finish(result, "Request approved")
    }

    /// Submit a rejection. An empty reason is refused without calling the handler.
    pub async fn submit_reject(
        &mut self,
        handlers: &dyn WorkflowHandlers,
    ) -> Result<(), DialogError> {
        self.require_reason(RequestAction::Reject)?;
        self.begin()?;
        let result = handlers.on_reject(self.reason.trim()).await;
        self.finish(result, "Request rejected")
    }

    /// Submit a send-back. An empty reason is refused without calling the handler.
    pub async fn submit_send_back(
        &mut self,
        handlers: &dyn WorkflowHandlers,
    ) -> Result<(), DialogError> {
        self.require_reason(RequestAction::SendBack)?;
        self.begin()?;
        let result = handlers.on_send_back(self.reason.trim()).await;
        self.finish(result, "Request sent back for correction")
    }

    /// Submit a notification to the requester.
    pub async fn submit_notify(
        &mut self,
        handlers: &dyn WorkflowHandlers,
    ) -> Result<(), DialogError> {
        if !handlers.supports_notify() {
            return Err(self.refuse(DialogError::NotifyUnavailable));
        }
        if self.message.trim().is_empty() {
            return Err(self.refuse(DialogError::MessageRequired));
        }
        self.begin()?;
        let result = handlers.on_notify(self.message.trim()).await;
        self.finish(result, "Requester notified")
    }

    fn require_reason(&mut self, action: RequestAction) -> Result<(), DialogError> {
        if self.reason.trim().is_empty() {
            return Err(self.refuse(DialogError::ReasonRequired(action)));
        }
        Ok(())
    }

    fn refuse(&mut self, err: DialogError) -> DialogError {
        let message = err.to_string();
        self.notifier.error(&message);
        self.error = Some(message);
        err
    }

    fn begin(&mut self) -> Result<(), DialogError> {
        if self.is_submitting {
            return Err(DialogError::SubmissionInFlight);
        }
        self.is_submitting = true;
        self.error = None;
        Ok(())
    }

    fn finish(
        &mut self,
        result: Result<(), ActionError>,
        success_message: &str,
    ) -> Result<(), DialogError> {
        self.is_submitting = false;
        match result {
            Ok(()) => {
                self.notifier.success(success_message);
                self.close();
                Ok(())
            }
            Err(e) => {
                self.notifier.error(e.message());
                self.error = Some(e.message().to_string());
                Err(DialogError::Action(e))
            }
        }
    }

    fn reset(&mut self) {
        self.comment.clear();
        self.reason.clear();
        self.message.clear();
        self.is_admin_approval = false;
        self.error = None;
    }
}
