//! reqwest implementation of `BackendClient`.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use reqflow_core::workflow::{RequestDomain, WorkflowRequest};
use reqflow_shared::config::BackendConfig;
use reqflow_shared::types::RequestId;

use super::{BackendClient, BackendError};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApproveBody<'a> {
    comment: &'a str,
    is_admin_approval: bool,
}

#[derive(Serialize)]
struct ReasonBody<'a> {
    reason: &'a str,
}

#[derive(Serialize)]
struct NotifyBody<'a> {
    message: &'a str,
}

/// Backend client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackendClient {
    client: Client,
    base_url: Url,
    notify_enabled: bool,
}

impl HttpBackendClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Config` if the base URL is not an absolute
    /// http(s) URL, or `BackendError::Transport` if the HTTP client cannot be
    /// built.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| BackendError::Config(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::Config(format!(
                "{} cannot carry a path",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            notify_enabled: config.notify_enabled,
        })
    }

    /// Builds `{base}/{domain path}/{id}[/{action}]`.
    ///
    /// The id is one percent-encoded path segment, so it can never address
    /// another collection.
    fn url(
        &self,
        domain: RequestDomain,
        id: &RequestId,
        action: Option<&str>,
    ) -> Result<Url, BackendError> {
        if matches!(id.as_str(), "" | "." | "..") {
            return Err(BackendError::InvalidId(id.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| BackendError::Config(format!("{} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .push(domain.backend_path())
            .push(id.as_str())
            .extend(action);
        Ok(url)
    }

    /// Sends once and turns non-2xx into `BackendError::Status`.
    async fn send(request: RequestBuilder, token: &str) -> Result<Response, BackendError> {
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.json::<Value>().await.ok();
        let message = body
            .as_ref()
            .and_then(error_message)
            .map_or_else(
                || {
                    status
                        .canonical_reason()
                        .unwrap_or("Backend request failed")
                        .to_string()
                },
                str::to_string,
            );

        warn!(status = status.as_u16(), message = %message, "Backend returned an error");
        Err(BackendError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

/// Pulls an operator-facing message out of an error body.
fn error_message(body: &Value) -> Option<&str> {
    body.get("message")
        .or_else(|| body.get("error"))
        .and_then(Value::as_str)
}

/// Some backend endpoints wrap documents as `{"data": {...}}`.
fn unwrap_data(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[async_trait]
impl BackendClient for HttpBackendClient {
    async fn fetch_request(
        &self,
        domain: RequestDomain,
        id: &RequestId,
        token: &str,
    ) -> Result<WorkflowRequest, BackendError> {
        let url = self.url(domain, id, None)?;
        debug!(url = %url, "Fetching request");

        let body: Value = Self::send(self.client.get(url), token)
            .await?
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        serde_json::from_value(unwrap_data(body)).map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn approve(
        &self,
        domain: RequestDomain,
        id: &RequestId,
        token: &str,
        comment: &str,
        is_admin_approval: bool,
    ) -> Result<(), BackendError> {
        let url = self.url(domain, id, Some("approve"))?;
        let body = ApproveBody {
            comment,
            is_admin_approval,
        };
        Self::send(self.client.put(url).json(&body), token).await?;
        Ok(())
    }

    async fn reject(
        &self,
        domain: RequestDomain,
        id: &RequestId,
        token: &str,
        reason: &str,
    ) -> Result<(), BackendError> {
        let url = self.url(domain, id, Some("reject"))?;
        Self::send(self.client.put(url).json(&ReasonBody { reason }), token).await?;
        Ok(())
    }

    async fn send_back(
        &self,
        domain: RequestDomain,
        id: &RequestId,
        token: &str,
        reason: &str,
    ) -> Result<(), BackendError> {
        let url = self.url(domain, id, Some("send-back"))?;
        Self::send(self.client.put(url).json(&ReasonBody { reason }), token).await?;
        Ok(())
    }

    async fn notify(
        &self,
        domain: RequestDomain,
        id: &RequestId,
        token: &str,
        message: &str,
    ) -> Result<(), BackendError> {
        let url = self.url(domain, id, Some("notify"))?;
        Self::send(self.client.post(url).json(&NotifyBody { message }), token).await?;
        Ok(())
    }

    fn supports_notify(&self) -> bool {
        self.notify_enabled
    }
}
