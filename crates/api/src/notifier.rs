//! Operator feedback as structured log events.

use tracing::{info, warn};

use reqflow_core::workflow::{Notifier, RequestAction, RequestDomain};
use reqflow_shared::types::{RequestId, UserId};

/// Logs dialog outcomes with the request and operator attached.
#[derive(Debug, Clone)]
pub struct TracingNotifier {
    domain: RequestDomain,
    request_id: RequestId,
    operator: UserId,
    action: RequestAction,
}

impl TracingNotifier {
    /// Creates a notifier scoped to one operator action.
    #[must_use]
    pub fn new(
        domain: RequestDomain,
        request_id: RequestId,
        operator: UserId,
        action: RequestAction,
    ) -> Self {
        Self {
            domain,
            request_id,
            operator,
            action,
        }
    }
}

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(
            domain = %self.domain,
            request_id = %self.request_id,
            operator = %self.operator,
            action = %self.action,
            outcome = %message,
            "Operator action succeeded"
        );
    }

    fn error(&self, message: &str) {
        warn!(
            domain = %self.domain,
            request_id = %self.request_id,
            operator = %self.operator,
            action = %self.action,
            error = %message,
            "Operator action failed"
        );
    }
}
