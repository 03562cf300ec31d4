//! Request workflow routes.
//!
//! `GET .../workflow` renders the approval timeline and the controls the
//! operator may use. The action routes re-check availability against fresh
//! backend state, then run the operator's input through an `ApprovalDialog`
//! bound to the backend.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    AppState,
    backend::BackendHandlers,
    middleware::AuthUser,
    notifier::TracingNotifier,
    response::{app_error, dialog_error, workflow_error},
};
use reqflow_core::workflow::{
    ApprovalDialog, AvailableActions, DialogError, RequestAction, RequestActions, RequestDomain,
    RequestStatus, StageView, TimelineSummary, UserSummary, WorkflowError, WorkflowRequest,
    WorkflowTimeline,
};
use reqflow_shared::AppError;
use reqflow_shared::types::{EntityRef, RequestId};

/// Creates the request workflow routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/requests/{domain}/{request_id}/workflow", get(get_workflow))
        .route("/requests/{domain}/{request_id}/approve", put(approve_request))
        .route("/requests/{domain}/{request_id}/reject", put(reject_request))
        .route("/requests/{domain}/{request_id}/send-back", put(send_back_request))
        .route("/requests/{domain}/{request_id}/notify", post(notify_requester))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for approving.
#[derive(Debug, Default, Deserialize)]
pub struct ApproveRequest {
    /// Optional approval comment.
    #[serde(default)]
    pub comment: Option<String>,
    /// Mark as an admin approval outside the stage sequence.
    #[serde(default)]
    pub is_admin_approval: bool,
}

/// Request body for rejecting or sending back.
#[derive(Debug, Deserialize)]
pub struct ReasonRequest {
    /// Reason shown to the requester.
    #[serde(default)]
    pub reason: String,
}

/// Request body for notifying the requester.
#[derive(Debug, Deserialize)]
pub struct NotifyRequest {
    /// Message for the requester.
    #[serde(default)]
    pub message: String,
}

/// Workflow view of a request.
#[derive(Debug, Serialize)]
pub struct WorkflowResponse {
    /// Request ID.
    pub request_id: RequestId,
    /// Department.
    pub domain: RequestDomain,
    /// Current status.
    pub status: RequestStatus,
    /// Current stage identifier.
    pub current_stage: String,
    /// Title, if the backend has one.
    pub title: Option<String>,
    /// Requester reference.
    pub requester: Option<EntityRef<UserSummary>>,
    /// Stage-by-stage timeline.
    pub timeline: Vec<StageView>,
    /// Progress summary.
    pub summary: TimelineSummary,
    /// Controls offered to this operator.
    pub actions: AvailableActions,
    /// Whether the admin-approval toggle is shown.
    pub can_toggle_admin_approval: bool,
}

/// Response after a successful action.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    /// Request ID.
    pub request_id: RequestId,
    /// The action performed.
    pub action: RequestAction,
}

/// Operator input for one action.
enum ActionInput {
    Approve { comment: String, is_admin_approval: bool },
    Reject { reason: String },
    SendBack { reason: String },
    Notify { message: String },
}

impl ActionInput {
    fn action(&self) -> RequestAction {
        match self {
            Self::Approve { .. } => RequestAction::Approve,
            Self::Reject { .. } => RequestAction::Reject,
            Self::SendBack { .. } => RequestAction::SendBack,
            Self::Notify { .. } => RequestAction::Notify,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET `/requests/{domain}/{request_id}/workflow` - Timeline and available actions.
async fn get_workflow(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((domain, request_id)): Path<(String, String)>,
) -> Response {
    let (domain, request) = match load_request(&state, &auth, &domain, request_id).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    let timeline = match WorkflowTimeline::derive(
        &request.stages,
        &request.current_stage,
        &request.approvals,
    ) {
        Ok(timeline) => timeline,
        Err(e) => {
            error!(
                request_id = %request.id,
                current_stage = %request.current_stage,
                error = %e,
                "Backend returned an inconsistent workflow"
            );
            return workflow_error(&e);
        }
    };

    let permissions = auth.permissions();
    let response = WorkflowResponse {
        summary: WorkflowTimeline::summarize(&timeline),
        actions: RequestActions::available(
            permissions,
            domain,
            request.status,
            state.backend.supports_notify(),
        ),
        can_toggle_admin_approval: RequestActions::can_toggle_admin_approval(permissions),
        request_id: request.id,
        domain,
        status: request.status,
        current_stage: request.current_stage,
        title: request.title,
        requester: request.requester,
        timeline,
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// PUT `/requests/{domain}/{request_id}/approve` - Approve at the current stage.
async fn approve_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((domain, request_id)): Path<(String, String)>,
    Json(payload): Json<ApproveRequest>,
) -> Response {
    let input = ActionInput::Approve {
        comment: payload.comment.unwrap_or_default(),
        is_admin_approval: payload.is_admin_approval,
    };
    dispatch(&state, &auth, &domain, request_id, input).await
}

/// PUT `/requests/{domain}/{request_id}/reject` - Reject with a reason.
async fn reject_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((domain, request_id)): Path<(String, String)>,
    Json(payload): Json<ReasonRequest>,
) -> Response {
    let input = ActionInput::Reject {
        reason: payload.reason,
    };
    dispatch(&state, &auth, &domain, request_id, input).await
}

/// PUT `/requests/{domain}/{request_id}/send-back` - Return for correction.
async fn send_back_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((domain, request_id)): Path<(String, String)>,
    Json(payload): Json<ReasonRequest>,
) -> Response {
    let input = ActionInput::SendBack {
        reason: payload.reason,
    };
    dispatch(&state, &auth, &domain, request_id, input).await
}

/// POST `/requests/{domain}/{request_id}/notify` - Notify the requester.
async fn notify_requester(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((domain, request_id)): Path<(String, String)>,
    Json(payload): Json<NotifyRequest>,
) -> Response {
    let input = ActionInput::Notify {
        message: payload.message,
    };
    dispatch(&state, &auth, &domain, request_id, input).await
}

// ============================================================================
// Helper Functions
// ============================================================================

async fn load_request(
    state: &AppState,
    auth: &AuthUser,
    domain: &str,
    request_id: String,
) -> Result<(RequestDomain, WorkflowRequest), Response> {
    let domain = RequestDomain::parse(domain)
        .ok_or_else(|| workflow_error(&WorkflowError::UnknownDomain(domain.to_string())))?;
    let request_id = RequestId::from(request_id);

    let request = state
        .backend
        .fetch_request(domain, &request_id, auth.token())
        .await
        .map_err(|e| {
            error!(domain = %domain, request_id = %request_id, error = %e, "Failed to fetch request");
            app_error(&AppError::from(e))
        })?;

    // Actions go to the route id, so the document checked must be that one.
    if request.id != request_id {
        warn!(
            domain = %domain,
            request_id = %request_id,
            returned_id = %request.id,
            "Backend returned a different request"
        );
        return Err(app_error(&AppError::NotFound("Request not found".to_string())));
    }

    Ok((domain, request))
}

async fn dispatch(
    state: &AppState,
    auth: &AuthUser,
    domain: &str,
    request_id: String,
    input: ActionInput,
) -> Response {
    let action = input.action();
    let (domain, request) = match load_request(state, auth, domain, request_id).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    if let Err(e) = RequestActions::ensure_available(
        auth.permissions(),
        domain,
        request.status,
        state.backend.supports_notify(),
        action,
    ) {
        info!(
            domain = %domain,
            request_id = %request.id,
            operator = %auth.user_id(),
            role = %auth.role(),
            action = %action,
            error = %e,
            "Action refused"
        );
        return workflow_error(&e);
    }

    let handlers = BackendHandlers::new(
        state.backend.clone(),
        domain,
        request.id.clone(),
        auth.token(),
    );
    let notifier = Arc::new(TracingNotifier::new(
        domain,
        request.id.clone(),
        auth.user_id().clone(),
        action,
    ));
    let mut dialog = ApprovalDialog::new(auth.permissions(), notifier);
    dialog.open();

    let result = match input {
        ActionInput::Approve {
            comment,
            is_admin_approval,
        } => {
            dialog.set_comment(comment);
            match dialog.set_admin_approval(is_admin_approval) {
                Ok(()) => dialog.submit_approve(&handlers).await,
                Err(e) => Err(e),
            }
        }
        ActionInput::Reject { reason } => {
            dialog.set_reason(reason);
            dialog.submit_reject(&handlers).await
        }
        ActionInput::SendBack { reason } => {
            dialog.set_reason(reason);
            dialog.submit_send_back(&handlers).await
        }
        ActionInput::Notify { message } => {
            dialog.set_message(message);
            dialog.submit_notify(&handlers).await
        }
    };

    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(ActionResponse {
                request_id: request.id,
                action,
            }),
        )
            .into_response(),
        Err(DialogError::Action(e)) => match handlers.take_failure() {
            Some(failure) => app_error(&failure),
            None => app_error(&AppError::Internal(e.message().to_string())),
        },
        Err(e) => dialog_error(&e),
    }
}
