//! Property-based tests for RequestActions.

use proptest::prelude::*;

use reqflow_shared::Permissions;

use crate::workflow::actions::RequestActions;
use crate::workflow::types::{RequestDomain, RequestStatus};

/// Strategy for generating random RequestStatus values.
fn arb_status() -> impl Strategy<Value = RequestStatus> {
    prop_oneof![
        Just(RequestStatus::Pending),
        Just(RequestStatus::Corrected),
        Just(RequestStatus::Approved),
        Just(RequestStatus::Rejected),
        Just(RequestStatus::SentBack),
        Just(RequestStatus::Fulfilled),
        Just(RequestStatus::Cancelled),
        Just(RequestStatus::Unknown),
    ]
}

/// Strategy for generating random RequestDomain values.
fn arb_domain() -> impl Strategy<Value = RequestDomain> {
    prop_oneof![
        Just(RequestDomain::Ict),
        Just(RequestDomain::Store),
        Just(RequestDomain::Vehicle),
    ]
}

/// Strategy for generating random permission flags.
fn arb_permissions() -> impl Strategy<Value = Permissions> {
    any::<[bool; 5]>().prop_map(|f| Permissions {
        admin_override: f[0],
        can_approve_all: f[1],
        can_manage_ict: f[2],
        can_manage_store: f[3],
        can_manage_vehicle: f[4],
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Review controls are absent unless the status is PENDING or CORRECTED.
    #[test]
    fn prop_review_controls_need_reviewable_status(
        permissions in arb_permissions(),
        domain in arb_domain(),
        status in arb_status(),
        has_notify in any::<bool>()
    ) {
        let actions = RequestActions::available(&permissions, domain, status, has_notify);
        if !matches!(status, RequestStatus::Pending | RequestStatus::Corrected) {
            prop_assert!(!actions.approve);
            prop_assert!(!actions.reject);
            prop_assert!(!actions.send_back);
        }
    }

    /// Review controls always appear together.
    #[test]
    fn prop_review_controls_move_together(
        permissions in arb_permissions(),
        domain in arb_domain(),
        status in arb_status()
    ) {
        let actions = RequestActions::available(&permissions, domain, status, false);
        prop_assert_eq!(actions.approve, actions.reject);
        prop_assert_eq!(actions.reject, actions.send_back);
    }

    /// Notify is present iff the request is APPROVED and a handler exists.
    #[test]
    fn prop_notify_gate(
        permissions in arb_permissions(),
        domain in arb_domain(),
        status in arb_status(),
        has_notify in any::<bool>()
    ) {
        let actions = RequestActions::available(&permissions, domain, status, has_notify);
        prop_assert_eq!(actions.notify, status == RequestStatus::Approved && has_notify);
    }

    /// Admin override grants review controls in every domain.
    #[test]
    fn prop_admin_override_sufficient(
        mut permissions in arb_permissions(),
        domain in arb_domain()
    ) {
        permissions.admin_override = true;
        let actions = RequestActions::available(&permissions, domain, RequestStatus::Pending, false);
        prop_assert!(actions.approve);
    }
}
