//! Property-based tests for WorkflowTimeline.
//!
//! Stage lists are generated with unique identifiers; approval logs are
//! random decisions over the stage roles plus some unrelated roles.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use reqflow_shared::types::UserId;

use crate::workflow::timeline::WorkflowTimeline;
use crate::workflow::types::{ApprovalDecision, ApprovalEvent, StageStatus, WorkflowStage};

const ROLES: [&str; 6] = [
    "SUPERVISOR",
    "ICT_OFFICER",
    "STORE_KEEPER",
    "TRANSPORT_OFFICER",
    "DIRECTOR",
    "AUDITOR",
];

/// Strategy for an ordered stage list with unique ids and optional roles.
fn arb_stages() -> impl Strategy<Value = Vec<WorkflowStage>> {
    prop::collection::vec(prop::option::of(0..ROLES.len()), 1..10).prop_map(|roles| {
        roles
            .into_iter()
            .enumerate()
            .map(|(i, role)| {
                WorkflowStage::new(format!("STAGE_{i}"), role.map(|r| ROLES[r]), format!("Stage {i}"))
            })
            .collect()
    })
}

/// Strategy for an approval log.
fn arb_approvals() -> impl Strategy<Value = Vec<ApprovalEvent>> {
    prop::collection::vec((0..ROLES.len(), any::<bool>(), 0u32..60), 0..12).prop_map(|events| {
        events
            .into_iter()
            .map(|(role, rejected, minute)| ApprovalEvent {
                approver_id: UserId::from(format!("user-{role}")),
                role: ROLES[role].to_string(),
                status: if rejected {
                    ApprovalDecision::Rejected
                } else {
                    ApprovalDecision::Approved
                },
                comment: None,
                timestamp: Utc.with_ymd_and_hms(2026, 1, 5, 10, minute, 0).unwrap(),
            })
            .collect()
    })
}

/// Strategy for stages plus a valid current index.
fn arb_chain() -> impl Strategy<Value = (Vec<WorkflowStage>, usize)> {
    arb_stages().prop_flat_map(|stages| {
        let len = stages.len();
        (Just(stages), 0..len)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Exactly one stage is current when the current stage is in the list.
    #[test]
    fn prop_exactly_one_current(
        (stages, current) in arb_chain(),
        approvals in arb_approvals()
    ) {
        let views = WorkflowTimeline::derive(&stages, &stages[current].stage, &approvals).unwrap();
        let currents: Vec<_> = views
            .iter()
            .enumerate()
            .filter(|(_, v)| v.status == StageStatus::Current)
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(currents, vec![current]);
    }

    /// Stages before the current one are completed unless their role rejected.
    #[test]
    fn prop_before_current_completed_or_rejected(
        (stages, current) in arb_chain(),
        approvals in arb_approvals()
    ) {
        let views = WorkflowTimeline::derive(&stages, &stages[current].stage, &approvals).unwrap();
        for view in &views[..current] {
            let rejected = view.role.as_ref().is_some_and(|role| {
                approvals
                    .iter()
                    .any(|e| &e.role == role && e.status == ApprovalDecision::Rejected)
            });
            let expected = if rejected { StageStatus::Rejected } else { StageStatus::Completed };
            prop_assert_eq!(view.status, expected);
        }
    }

    /// Stages after the current one are pending regardless of the log.
    #[test]
    fn prop_after_current_pending(
        (stages, current) in arb_chain(),
        approvals in arb_approvals()
    ) {
        let views = WorkflowTimeline::derive(&stages, &stages[current].stage, &approvals).unwrap();
        for view in &views[current + 1..] {
            prop_assert_eq!(view.status, StageStatus::Pending);
        }
    }

    /// Output preserves stage order and length.
    #[test]
    fn prop_order_preserved(
        (stages, current) in arb_chain(),
        approvals in arb_approvals()
    ) {
        let views = WorkflowTimeline::derive(&stages, &stages[current].stage, &approvals).unwrap();
        prop_assert_eq!(views.len(), stages.len());
        for (view, stage) in views.iter().zip(&stages) {
            prop_assert_eq!(&view.stage, &stage.stage);
        }
    }

    /// Summary counts add up to the total.
    #[test]
    fn prop_summary_consistent(
        (stages, current) in arb_chain(),
        approvals in arb_approvals()
    ) {
        let views = WorkflowTimeline::derive(&stages, &stages[current].stage, &approvals).unwrap();
        let summary = WorkflowTimeline::summarize(&views);
        prop_assert_eq!(summary.completed + summary.rejected + summary.pending + 1, summary.total);
        prop_assert_eq!(summary.current_position, Some(current + 1));
    }

    /// Repeating stage ids never yields a second current stage.
    #[test]
    fn prop_repeated_ids_single_current(
        (stages, current) in arb_chain(),
        approvals in arb_approvals()
    ) {
        let mut repeated = stages.clone();
        repeated.extend(stages.iter().cloned());
        let views = WorkflowTimeline::derive(&repeated, &stages[current].stage, &approvals).unwrap();
        let currents: Vec<_> = views
            .iter()
            .enumerate()
            .filter(|(_, v)| v.status == StageStatus::Current)
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(currents, vec![current]);
    }

    /// A current stage missing from the list always fails.
    #[test]
    fn prop_missing_current_fails(stages in arb_stages(), approvals in arb_approvals()) {
        prop_assert!(WorkflowTimeline::derive(&stages, "NOT_A_STAGE", &approvals).is_err());
    }
}
