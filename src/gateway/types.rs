// ABOUTME: Typed wire schema for the agents service — threads, runs, and messages.
// ABOUTME: Validated once at the gateway boundary; unknown variants fall through safely.

use serde::Deserialize;

/// A freshly created server-side thread.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadHandle {
    pub id: String,
}

/// A run of the agent against a thread.
#[derive(Debug, Clone, Deserialize)]
pub struct RunHandle {
    pub id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub last_error: Option<RunError>,
}

/// Failure detail attached to a run by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct RunError {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

/// Lifecycle status of a run. Unrecognized statuses deserialize to
/// `Unknown` and are treated as still in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    Completed,
    RequiresAction,
    Failed,
    Cancelled,
    Expired,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Whether the service may still advance this run.
    pub fn is_in_progress(self) -> bool {
        matches!(
            self,
            RunStatus::Queued | RunStatus::InProgress | RunStatus::Unknown
        )
    }
}

/// The paged message listing returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageList {
    pub data: Vec<ThreadMessage>,
}

/// One message stored on a thread.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadMessage {
    pub role: MessageRole,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// Speaker role on the wire. Roles this client never produces (tool,
/// system) deserialize to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
    #[serde(other)]
    Other,
}

/// One typed content block within a message. Only text blocks carry a
/// value this client can display; everything else (images, files) is
/// preserved as `Other` and skipped during extraction.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: TextValue },
    #[serde(other)]
    Other,
}

/// The value payload of a text content block.
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub value: String,
}
