//! Binds a backend client to one request so the approval dialog can drive it.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use reqflow_core::workflow::{ActionError, RequestDomain, WorkflowHandlers};
use reqflow_shared::AppError;
use reqflow_shared::types::RequestId;

use super::{BackendClient, BackendError};

/// `WorkflowHandlers` that forward to the backend on behalf of one operator.
///
/// The dialog only sees the failure message; the last backend failure is kept
/// here so the HTTP layer can still pick a status code.
pub struct BackendHandlers {
    client: Arc<dyn BackendClient>,
    domain: RequestDomain,
    request_id: RequestId,
    token: String,
    failure: Mutex<Option<BackendError>>,
}

impl BackendHandlers {
    /// Creates handlers for one request.
    pub fn new(
        client: Arc<dyn BackendClient>,
        domain: RequestDomain,
        request_id: RequestId,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            domain,
            request_id,
            token: token.into(),
            failure: Mutex::new(None),
        }
    }

    /// Takes the last backend failure as an application error.
    pub fn take_failure(&self) -> Option<AppError> {
        self.failure
            .lock()
            .ok()
            .and_then(|mut f| f.take())
            .map(AppError::from)
    }

    fn settle(&self, result: Result<(), BackendError>) -> Result<(), ActionError> {
        result.map_err(|e| {
            let action_error = ActionError::from(&e);
            if let Ok(mut slot) = self.failure.lock() {
                *slot = Some(e);
            }
            action_error
        })
    }
}

#[async_trait]
impl WorkflowHandlers for BackendHandlers {
    async fn on_approve(&self, comment: &str, is_admin_approval: bool) -> Result<(), ActionError> {
        let result = self
            .client
            .approve(
                self.domain,
                &self.request_id,
                &self.token,
                comment,
                is_admin_approval,
            )
            .await;
        self.settle(result)
    }

    async fn on_reject(&self, reason: &str) -> Result<(), ActionError> {
        let result = self
            .client
            .reject(self.domain, &self.request_id, &self.token, reason)
            .await;
        self.settle(result)
    }

    async fn on_send_back(&self, reason: &str) -> Result<(), ActionError> {
        let result = self
            .client
            .send_back(self.domain, &self.request_id, &self.token, reason)
            .await;
        self.settle(result)
    }

    fn supports_notify(&self) -> bool {
        self.client.supports_notify()
    }

    async fn on_notify(&self, message: &str) -> Result<(), ActionError> {
        let result = self
            .client
            .notify(self.domain, &self.request_id, &self.token, message)
            .await;
        self.settle(result)
    }
}
