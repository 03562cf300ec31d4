//! Per-stage status derivation for the workflow timeline.
//!
//! The backend keeps a pointer to the current stage and a log of approval
//! decisions. The console reconstructs each stage's status from those two
//! pieces and the ordered stage list:
//!
//! - before the current stage: `completed`, or `rejected` if the stage's role
//!   has a REJECTED decision on record
//! - at the current stage: `current`
//! - after the current stage: `pending`, whatever the log says

use serde::Serialize;
use std::cmp::Ordering;

use crate::workflow::error::WorkflowError;
use crate::workflow::types::{ApprovalDecision, ApprovalEvent, StageStatus, WorkflowStage};

/// A stage with its derived status, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageView {
    /// Stage identifier.
    pub stage: String,
    /// Approver role, if any.
    pub role: Option<String>,
    /// Human-readable description.
    pub description: String,
    /// Derived status.
    pub status: StageStatus,
    /// Latest decision recorded for this stage's role.
    pub decision: Option<ApprovalEvent>,
}

/// Counts and position for a progress indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimelineSummary {
    /// Number of stages.
    pub total: usize,
    /// Stages completed.
    pub completed: usize,
    /// Stages rejected.
    pub rejected: usize,
    /// Stages not yet reached.
    pub pending: usize,
    /// 1-based position of the current stage.
    pub current_position: Option<usize>,
}

/// Stateless timeline derivation.
pub struct WorkflowTimeline;

impl WorkflowTimeline {
    /// Derive the display status of every stage.
    ///
    /// # Arguments
    /// * `stages` - The ordered stage list
    /// * `current_stage` - Identifier of the stage the request sits at
    /// * `approvals` - Recorded approval decisions
    ///
    /// # Returns
    /// * `Ok(views)` in stage order
    /// * `Err(WorkflowError::UnknownCurrentStage)` if `current_stage` is not in `stages`
    pub fn derive(
        stages: &[WorkflowStage],
        current_stage: &str,
        approvals: &[ApprovalEvent],
    ) -> Result<Vec<StageView>, WorkflowError> {
        let current_index =
            Self::index_of(stages, current_stage).ok_or_else(|| {
                WorkflowError::UnknownCurrentStage {
                    stage: current_stage.to_string(),
                }
            })?;

        Ok(stages
            .iter()
            .enumerate()
            .map(|(position, stage)| {
                // Duplicated identifiers resolve to their first occurrence.
                let index = Self::index_of(stages, &stage.stage).unwrap_or(position);
                let role = stage.role.as_deref();
                // Only the first occurrence of the current stage is current;
                // a later repeat has not been reached yet.
                let status = if index == current_index && position != current_index {
                    StageStatus::Pending
                } else {
                    Self::stage_status(index, current_index, role, approvals)
                };

                StageView {
                    stage: stage.stage.clone(),
                    role: stage.role.clone(),
                    description: stage.description.clone(),
                    status,
                    decision: role.and_then(|r| Self::latest_decision(r, approvals)).cloned(),
                }
            })
            .collect())
    }

    /// Status of the stage at `index` given the current index.
    #[must_use]
    pub fn stage_status(
        index: usize,
        current_index: usize,
        role: Option<&str>,
        approvals: &[ApprovalEvent],
    ) -> StageStatus {
        match index.cmp(&current_index) {
            Ordering::Less => {
                if role.is_some_and(|r| Self::was_rejected(r, approvals)) {
                    StageStatus::Rejected
                } else {
                    StageStatus::Completed
                }
            }
            Ordering::Equal => StageStatus::Current,
            Ordering::Greater => StageStatus::Pending,
        }
    }

    /// Summarise derived views for a progress indicator.
    #[must_use]
    pub fn summarize(views: &[StageView]) -> TimelineSummary {
        let count = |status: StageStatus| views.iter().filter(|v| v.status == status).count();

        TimelineSummary {
            total: views.len(),
            completed: count(StageStatus::Completed),
            rejected: count(StageStatus::Rejected),
            pending: count(StageStatus::Pending),
            current_position: views
                .iter()
                .position(|v| v.status == StageStatus::Current)
                .map(|i| i + 1),
        }
    }

    fn index_of(stages: &[WorkflowStage], stage: &str) -> Option<usize> {
        stages.iter().position(|s| s.stage == stage)
    }

    fn was_rejected(role: &str, approvals: &[ApprovalEvent]) -> bool {
        approvals
            .iter()
            .any(|e| e.role == role && e.status == ApprovalDecision::Rejected)
    }

    fn latest_decision<'a>(role: &str, approvals: &'a [ApprovalEvent]) -> Option<&'a ApprovalEvent> {
        approvals
            .iter()
            .filter(|e| e.role == role)
            .max_by_key(|e| e.timestamp)
    }
}
