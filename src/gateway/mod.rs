// ABOUTME: Agent gateway — stateless façade over the remote agents service.
// ABOUTME: Defines the AgentService trait and the ask/run/extract composition.

pub mod bridge;
pub mod client;
pub mod error;
pub mod types;

use async_trait::async_trait;

pub use client::AgentsClient;
pub use error::GatewayError;
use types::{ContentBlock, MessageRole, ThreadHandle, ThreadMessage};

/// The four remote operations the session layer needs. Implemented over
/// HTTP by [`AgentsClient`]; tests substitute an in-memory double.
#[async_trait]
pub trait AgentService: Send + Sync {
    /// Create a new conversation thread and return its handle.
    async fn create_thread(&self) -> Result<ThreadHandle, GatewayError>;

    /// Append a user message to the thread.
    async fn post_message(&self, thread_id: &str, text: &str) -> Result<(), GatewayError>;

    /// Execute the agent against the thread and wait until the run reaches
    /// a terminal state. Succeeds only on a completed run.
    async fn run_to_completion(&self, thread_id: &str, agent_id: &str)
    -> Result<(), GatewayError>;

    /// List the thread's messages in the order the service returns them.
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>, GatewayError>;
}

/// Send a question through the full remote sequence and return the reply:
/// post the user message, run the agent to completion, then list messages
/// and extract the newest assistant text.
pub async fn post_and_run(
    service: &dyn AgentService,
    thread_id: &str,
    agent_id: &str,
    text: &str,
) -> Result<String, GatewayError> {
    service.post_message(thread_id, text).await?;
    service.run_to_completion(thread_id, agent_id).await?;
    let messages = service.list_messages(thread_id).await?;
    extract_reply(&messages)
}

/// Pick the reply out of a message listing.
///
/// The last assistant message in listed order wins; within it, the first
/// text-typed content block wins. Non-text blocks are skipped silently.
pub fn extract_reply(messages: &[ThreadMessage]) -> Result<String, GatewayError> {
    let latest = messages
        .iter()
        .rev()
        .find(|m| m.role == MessageRole::Assistant)
        .ok_or(GatewayError::EmptyResponse)?;

    latest
        .content
        .iter()
        .find_map(|block| match block {
            ContentBlock::Text { text } => Some(text.value.clone()),
            ContentBlock::Other => None,
        })
        .ok_or(GatewayError::EmptyResponse)
}
