//! Action availability for operators viewing a request.
//!
//! Gating is a pure function of the operator's permission flags, the
//! request's department, and its status. It is re-evaluated on every call;
//! nothing is cached between renders.

use serde::{Deserialize, Serialize};
use std::fmt;

use reqflow_shared::Permissions;

use crate::workflow::error::WorkflowError;
use crate::workflow::types::{RequestDomain, RequestStatus};

/// An operator action on a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestAction {
    /// Approve at the current stage.
    Approve,
    /// Reject the request.
    Reject,
    /// Return the request to the requester for correction.
    SendBack,
    /// Notify the requester that an approved request is ready.
    Notify,
}

impl RequestAction {
    /// Returns the string representation of the action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::SendBack => "send_back",
            Self::Notify => "notify",
        }
    }
}

impl fmt::Display for RequestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which action controls are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct AvailableActions {
    /// Approve control.
    pub approve: bool,
    /// Reject control.
    pub reject: bool,
    /// Send-back control.
    pub send_back: bool,
    /// Notify control.
    pub notify: bool,
}

impl AvailableActions {
    /// Returns true if `action` is offered.
    #[must_use]
    pub fn allows(&self, action: RequestAction) -> bool {
        match action {
            RequestAction::Approve => self.approve,
            RequestAction::Reject => self.reject,
            RequestAction::SendBack => self.send_back,
            RequestAction::Notify => self.notify,
        }
    }

    /// Returns true if no control is offered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.approve || self.reject || self.send_back || self.notify)
    }
}

/// Stateless action gating.
pub struct RequestActions;

impl RequestActions {
    /// Check whether the operator may act on requests of `domain`.
    ///
    /// `admin_override` covers every domain.
    #[must_use]
    pub fn can_manage(permissions: &Permissions, domain: RequestDomain) -> bool {
        permissions.admin_override
            || match domain {
                RequestDomain::Ict => permissions.can_manage_ict,
                RequestDomain::Store => permissions.can_manage_store,
                RequestDomain::Vehicle => permissions.can_manage_vehicle,
            }
    }

    /// Compute the visible action controls.
    ///
    /// # Arguments
    /// * `permissions` - The operator's permission flags
    /// * `domain` - The request's department
    /// * `status` - The request's current status
    /// * `has_notify_handler` - Whether the caller can deliver notifications
    ///
    /// Approve, reject, and send-back need a PENDING or CORRECTED request and
    /// the domain permission. Notify needs an APPROVED request and a handler;
    /// it is not gated by permissions.
    #[must_use]
    pub fn available(
        permissions: &Permissions,
        domain: RequestDomain,
        status: RequestStatus,
        has_notify_handler: bool,
    ) -> AvailableActions {
        let review = status.awaits_review() && Self::can_manage(permissions, domain);

        AvailableActions {
            approve: review,
            reject: review,
            send_back: review,
            notify: status == RequestStatus::Approved && has_notify_handler,
        }
    }

    /// Fail unless `action` is currently offered.
    ///
    /// # Returns
    /// * `Ok(())` if the action is available
    /// * `Err(WorkflowError::CannotManageDomain)` if a review action is blocked by permissions
    /// * `Err(WorkflowError::ActionNotAvailable)` otherwise
    pub fn ensure_available(
        permissions: &Permissions,
        domain: RequestDomain,
        status: RequestStatus,
        has_notify_handler: bool,
        action: RequestAction,
    ) -> Result<(), WorkflowError> {
        if Self::available(permissions, domain, status, has_notify_handler).allows(action) {
            return Ok(());
        }

        if action != RequestAction::Notify
            && status.awaits_review()
            && !Self::can_manage(permissions, domain)
        {
            return Err(WorkflowError::CannotManageDomain(domain));
        }

        Err(WorkflowError::ActionNotAvailable { action, status })
    }

    /// Whether the admin-approval toggle is shown at all.
    #[must_use]
    pub fn can_toggle_admin_approval(permissions: &Permissions) -> bool {
        permissions.can_approve_all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ict_officer() -> Permissions {
        Permissions {
            can_manage_ict: true,
            ..Permissions::default()
        }
    }

    #[rstest]
    #[case(RequestStatus::Pending, true)]
    #[case(RequestStatus::Corrected, true)]
    #[case(RequestStatus::Approved, false)]
    #[case(RequestStatus::Rejected, false)]
    #[case(RequestStatus::SentBack, false)]
    #[case(RequestStatus::Fulfilled, false)]
    #[case(RequestStatus::Cancelled, false)]
    #[case(RequestStatus::Unknown, false)]
    fn test_review_actions_by_status(#[case] status: RequestStatus, #[case] expected: bool) {
        let actions = RequestActions::available(&ict_officer(), RequestDomain::Ict, status, true);
        assert_eq!(actions.approve, expected);
        assert_eq!(actions.reject, expected);
        assert_eq!(actions.send_back, expected);
    }

    #[rstest]
    #[case(RequestDomain::Ict, true)]
    #[case(RequestDomain::Store, false)]
    #[case(RequestDomain::Vehicle, false)]
    fn test_review_actions_by_domain(#[case] domain: RequestDomain, #[case] expected: bool) {
        let actions =
            RequestActions::available(&ict_officer(), domain, RequestStatus::Pending, false);
        assert_eq!(actions.approve, expected);
    }

    #[test]
    fn test_admin_override_covers_all_domains() {
        let admin = Permissions {
            admin_override: true,
            ..Permissions::default()
        };
        for domain in RequestDomain::ALL {
            assert!(RequestActions::can_manage(&admin, domain));
            assert!(RequestActions::available(&admin, domain, RequestStatus::Corrected, false).approve);
        }
    }

    #[test]
    fn test_notify_requires_approved_and_handler() {
        let none = Permissions::default();
        assert!(RequestActions::available(&none, RequestDomain::Store, RequestStatus::Approved, true).notify);
        assert!(!RequestActions::available(&none, RequestDomain::Store, RequestStatus::Approved, false).notify);
        assert!(!RequestActions::available(&none, RequestDomain::Store, RequestStatus::Pending, true).notify);
    }

    #[test]
    fn test_nothing_offered_without_permissions() {
        let actions = RequestActions::available(
            &Permissions::default(),
            RequestDomain::Vehicle,
            RequestStatus::Pending,
            true,
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn test_ensure_available_errors() {
        let perms = ict_officer();
        assert!(
            RequestActions::ensure_available(
                &perms,
                RequestDomain::Ict,
                RequestStatus::Pending,
                false,
                RequestAction::Reject
            )
            .is_ok()
        );
        assert_eq!(
            RequestActions::ensure_available(
                &perms,
                RequestDomain::Vehicle,
                RequestStatus::Pending,
                false,
                RequestAction::Approve
            ),
            Err(WorkflowError::CannotManageDomain(RequestDomain::Vehicle))
        );
        assert_eq!(
            RequestActions::ensure_available(
                &perms,
                RequestDomain::Ict,
                RequestStatus::Fulfilled,
                false,
                RequestAction::SendBack
            ),
            Err(WorkflowError::ActionNotAvailable {
                action: RequestAction::SendBack,
                status: RequestStatus::Fulfilled
            })
        );
        assert_eq!(
            RequestActions::ensure_available(
                &perms,
                RequestDomain::Ict,
                RequestStatus::Approved,
                false,
                RequestAction::Notify
            ),
            Err(WorkflowError::ActionNotAvailable {
                action: RequestAction::Notify,
                status: RequestStatus::Approved
            })
        );
    }

    #[test]
    fn test_admin_toggle_follows_approve_all() {
        assert!(!RequestActions::can_toggle_admin_approval(&Permissions {
            admin_override: true,
            ..Permissions::default()
        }));
        assert!(RequestActions::can_toggle_admin_approval(&Permissions {
            can_approve_all: true,
            ..Permissions::default()
        }));
    }
}
