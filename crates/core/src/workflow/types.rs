//! Workflow domain types for request approval chains.
//!
//! Requests, their stages, and their approval history are owned by the
//! backend. These types mirror its JSON (camelCase, Mongo-style `_id`) and are
//! read-only from the console's point of view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use reqflow_shared::types::{EntityRef, HasId, RequestId, UserId};

/// Department a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestDomain {
    /// ICT equipment requests.
    Ict,
    /// Store supply requests.
    Store,
    /// Vehicle/transport requests.
    Vehicle,
}

impl RequestDomain {
    /// All domains, in display order.
    pub const ALL: [Self; 3] = [Self::Ict, Self::Store, Self::Vehicle];

    /// Returns the string representation of the domain.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ict => "ICT",
            Self::Store => "STORE",
            Self::Vehicle => "VEHICLE",
        }
    }

    /// Parses a domain from a string, accepting either case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ict" => Some(Self::Ict),
            "store" => Some(Self::Store),
            "vehicle" => Some(Self::Vehicle),
            _ => None,
        }
    }

    /// URL segment used on the console's own routes.
    #[must_use]
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Ict => "ict",
            Self::Store => "store",
            Self::Vehicle => "vehicle",
        }
    }

    /// Collection path on the backend API.
    #[must_use]
    pub fn backend_path(&self) -> &'static str {
        match self {
            Self::Ict => "ict-requests",
            Self::Store => "store-requests",
            Self::Vehicle => "vehicle-requests",
        }
    }
}

impl fmt::Display for RequestDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request status as reported by the backend.
///
/// Statuses the console does not know about deserialize as `Unknown`, which
/// offers no actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Waiting on the current stage's approver.
    Pending,
    /// Sent back, corrected by the requester, and awaiting review again.
    Corrected,
    /// Approved through the whole chain; awaiting fulfillment.
    Approved,
    /// Rejected at some stage.
    Rejected,
    /// Returned to the requester for correction.
    SentBack,
    /// Fulfilled (items issued, vehicle assigned).
    Fulfilled,
    /// Withdrawn by the requester.
    Cancelled,
    /// Any status this console does not recognise.
    #[serde(other)]
    Unknown,
}

impl RequestStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Corrected => "CORRECTED",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::SentBack => "SENT_BACK",
            Self::Fulfilled => "FULFILLED",
            Self::Cancelled => "CANCELLED",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Returns true if the request is waiting on a reviewer decision.
    #[must_use]
    pub fn awaits_review(&self) -> bool {
        matches!(self, Self::Pending | Self::Corrected)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decision recorded in an approval event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApprovalDecision {
    /// The role-holder approved.
    Approved,
    /// The role-holder rejected.
    Rejected,
}

/// Derived display status of a workflow stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    /// Stage lies before the current one and was not rejected.
    Completed,
    /// Stage the request currently sits at.
    Current,
    /// Stage lies before the current one and its role rejected.
    Rejected,
    /// Stage not yet reached.
    Pending,
}

impl StageStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Current => "current",
            Self::Rejected => "rejected",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One named step in a request's approval chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStage {
    /// Stage identifier, e.g. `SUPERVISOR_REVIEW`.
    pub stage: String,
    /// Role whose holder decides this stage. `None` for system stages.
    #[serde(default)]
    pub role: Option<String>,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

impl WorkflowStage {
    /// Creates a stage.
    #[must_use]
    pub fn new(stage: impl Into<String>, role: Option<&str>, description: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            role: role.map(str::to_string),
            description: description.into(),
        }
    }
}

/// A recorded approve/reject decision by a role-holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalEvent {
    /// Who decided.
    pub approver_id: UserId,
    /// Role the approver acted under.
    pub role: String,
    /// The decision.
    pub status: ApprovalDecision,
    /// Optional comment or rejection reason.
    #[serde(default)]
    pub comment: Option<String>,
    /// When the decision was recorded.
    pub timestamp: DateTime<Utc>,
}

/// Summary of a requester or approver as embedded by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// User identifier.
    #[serde(alias = "_id")]
    pub id: UserId,
    /// Display name.
    #[serde(default, alias = "fullName")]
    pub name: String,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Department or unit.
    #[serde(default)]
    pub department: Option<String>,
}

impl HasId for UserSummary {
    fn id(&self) -> &str {
        self.id.as_str()
    }
}

/// A request as returned by the backend, reduced to what the workflow view needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRequest {
    /// Request identifier.
    #[serde(alias = "_id")]
    pub id: RequestId,
    /// Current status.
    pub status: RequestStatus,
    /// Identifier of the stage the request sits at.
    pub current_stage: String,
    /// Ordered approval chain.
    #[serde(default, alias = "workflowStages")]
    pub stages: Vec<WorkflowStage>,
    /// Recorded decisions.
    #[serde(default, alias = "approvalHistory")]
    pub approvals: Vec<ApprovalEvent>,
    /// Who raised the request.
    #[serde(default)]
    pub requester: Option<EntityRef<UserSummary>>,
    /// Requester's supervisor, the first approver.
    #[serde(default)]
    pub supervisor: Option<EntityRef<UserSummary>>,
    /// Short title or purpose line.
    #[serde(default)]
    pub title: Option<String>,
    /// When the request was raised.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_domain_parse() {
        assert_eq!(RequestDomain::parse("ict"), Some(RequestDomain::Ict));
        assert_eq!(RequestDomain::parse("STORE"), Some(RequestDomain::Store));
        assert_eq!(RequestDomain::parse("Vehicle"), Some(RequestDomain::Vehicle));
        assert_eq!(RequestDomain::parse("fleet"), None);
    }

    #[test]
    fn test_domain_paths() {
        assert_eq!(RequestDomain::Ict.backend_path(), "ict-requests");
        assert_eq!(RequestDomain::Store.backend_path(), "store-requests");
        assert_eq!(RequestDomain::Vehicle.backend_path(), "vehicle-requests");
        for domain in RequestDomain::ALL {
            assert_eq!(RequestDomain::parse(domain.path_segment()), Some(domain));
        }
    }

    #[test]
    fn test_status_wire_names() {
        let status: RequestStatus = serde_json::from_value(json!("SENT_BACK")).unwrap();
        assert_eq!(status, RequestStatus::SentBack);
        assert_eq!(status.to_string(), "SENT_BACK");
    }

    #[test]
    fn test_status_awaits_review() {
        assert!(RequestStatus::Pending.awaits_review());
        assert!(RequestStatus::Corrected.awaits_review());
        assert!(!RequestStatus::Approved.awaits_review());
        assert!(!RequestStatus::SentBack.awaits_review());
        assert!(!RequestStatus::Unknown.awaits_review());
    }

    #[test]
    fn test_unrecognised_status_deserializes_as_unknown() {
        let status: RequestStatus = serde_json::from_value(json!("IN_TRANSIT")).unwrap();
        assert_eq!(status, RequestStatus::Unknown);
    }

    #[test]
    fn test_request_from_backend_json() {
        let request: WorkflowRequest = serde_json::from_value(json!({
            "_id": "65a0c1d2",
            "status": "PENDING",
            "currentStage": "ICT_REVIEW",
            "workflowStages": [
                {"stage": "SUPERVISOR_REVIEW", "role": "SUPERVISOR", "description": "Supervisor"},
                {"stage": "ICT_REVIEW", "role": "ICT_OFFICER", "description": "ICT officer"},
                {"stage": "FULFILLMENT", "role": null}
            ],
            "approvals": [{
                "approverId": "u-3",
                "role": "SUPERVISOR",
                "status": "APPROVED",
                "timestamp": "2026-03-02T09:15:00Z"
            }],
            "requester": {"_id": "u-1", "fullName": "Amina Yusuf"},
            "supervisor": "u-3"
        }))
        .unwrap();

        assert_eq!(request.id.as_str(), "65a0c1d2");
        assert_eq!(request.stages.len(), 3);
        assert_eq!(request.stages[2].role, None);
        assert_eq!(request.approvals[0].status, ApprovalDecision::Approved);
        assert!(request.requester.as_ref().is_some_and(EntityRef::is_populated));
        assert_eq!(request.supervisor.as_ref().map(EntityRef::id), Some("u-3"));
        assert_eq!(
            request
                .requester
                .as_ref()
                .and_then(EntityRef::entity)
                .map(|u| u.name.as_str()),
            Some("Amina Yusuf")
        );
    }
}
