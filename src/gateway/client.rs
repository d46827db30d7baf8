// ABOUTME: reqwest implementation of AgentService — threads, messages, runs over HTTP.
// ABOUTME: Handles URL building, bearer auth, and the run status polling loop.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::config::ConnectionConfig;
use crate::gateway::AgentService;
use crate::gateway::error::{GatewayError, remote_error_message};
use crate::gateway::types::{MessageList, RunHandle, ThreadHandle, ThreadMessage};

/// Environment variable holding the service API key. Treated as a
/// black-box credential; absent means unauthenticated (local endpoints).
pub const API_KEY_ENV: &str = "AGENT_API_KEY";

/// HTTP client for an assistants-style agents service.
#[derive(Debug)]
pub struct AgentsClient {
    http: Client,
    base_url: String,
    api_version: Option<String>,
    api_key: Option<String>,
    poll_interval: Duration,
}

impl AgentsClient {
    /// Build a client from connection config, reading the API key from the
    /// environment.
    pub fn new(config: &ConnectionConfig) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .build()
            .map_err(GatewayError::Connection)?;
        Ok(Self {
            http,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            api_version: config
                .api_version
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(str::to_string),
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        })
    }

    fn url(&self, path: &str) -> String {
        match &self.api_version {
            Some(version) => format!("{}/{}?api-version={}", self.base_url, path, version),
            None => format!("{}/{}", self.base_url, path),
        }
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    /// Turn a response into a typed value, mapping HTTP error statuses to
    /// `GatewayError::Remote` with the body's message.
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Remote(remote_error_message(status, &body)));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Remote(format!("malformed service response: {e}")))
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, GatewayError> {
        let response = self
            .request(self.http.post(self.url(path)))
            .json(&body)
            .send()
            .await
            .map_err(GatewayError::Connection)?;
        Self::read_json(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let response = self
            .request(self.http.get(self.url(path)))
            .send()
            .await
            .map_err(GatewayError::Connection)?;
        Self::read_json(response).await
    }
}

#[async_trait]
impl AgentService for AgentsClient {
    async fn create_thread(&self) -> Result<ThreadHandle, GatewayError> {
        let thread: ThreadHandle = self.post_json("threads", json!({})).await?;
        tracing::info!(thread_id = %thread.id, "created thread");
        Ok(thread)
    }

    async fn post_message(&self, thread_id: &str, text: &str) -> Result<(), GatewayError> {
        let _: serde_json::Value = self
            .post_json(
                &format!("threads/{thread_id}/messages"),
                json!({ "role": "user", "content": text }),
            )
            .await?;
        Ok(())
    }

    async fn run_to_completion(
        &self,
        thread_id: &str,
        agent_id: &str,
    ) -> Result<(), GatewayError> {
        let mut run: RunHandle = self
            .post_json(
                &format!("threads/{thread_id}/runs"),
                json!({ "assistant_id": agent_id }),
            )
            .await?;
        tracing::debug!(run_id = %run.id, status = ?run.status, "run created");

        // Poll until the service reports a terminal status. No timeout is
        // enforced here; the interaction model waits for the run to settle.
        while run.status.is_in_progress() {
            tokio::time::sleep(self.poll_interval).await;
            run = self
                .get_json(&format!("threads/{thread_id}/runs/{}", run.id))
                .await?;
            tracing::debug!(run_id = %run.id, status = ?run.status, "run polled");
        }

        if run.status == crate::gateway::types::RunStatus::Completed {
            return Ok(());
        }
        let detail = run
            .last_error
            .map(|e| e.message)
            .unwrap_or_else(|| format!("run ended with status {:?}", run.status));
        Err(GatewayError::Remote(detail))
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>, GatewayError> {
        let list: MessageList = self
            .get_json(&format!("threads/{thread_id}/messages"))
            .await?;
        Ok(list.data)
    }
}
