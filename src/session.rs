// ABOUTME: Session state store — the UI-visible conversation and its phase machine.
// ABOUTME: Holds the active thread id, ordered transcript entries, and submit rules.

use chrono::{DateTime, Local};
use thiserror::Error;

/// Who spoke a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One message in the local transcript. Immutable once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// Severity of an inline notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// An inline transcript indicator that is not a conversation turn:
/// error reports, thread-creation confirmations, usage hints.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub at: DateTime<Local>,
}

/// A single entry in the rendered transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Turn(Turn),
    Notice(Notice),
}

/// Where the session is in its request cycle. "No thread yet" is `Idle`
/// with an absent thread id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    CreatingThread,
    AwaitingAnswer,
}

/// Errors raised by the session before any remote call is issued.
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("please enter a question")]
    EmptyQuestion,
    #[error("no active conversation — start a new one first")]
    NoThread,
    #[error("a request is already in flight")]
    Busy,
}

/// The conversation state for one run of the program.
///
/// Every mutation goes through a named transition; the TUI renders the
/// transcript as a pure projection of `entries`.
#[derive(Debug, Default)]
pub struct Session {
    thread_id: Option<String>,
    entries: Vec<Entry>,
    phase: Phase,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a remote request is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Conversation turns only, skipping notices.
    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Turn(t) => Some(t),
            Entry::Notice(_) => None,
        })
    }

    /// Append an inline notice to the transcript.
    pub fn push_notice(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.entries.push(Entry::Notice(Notice {
            level,
            text: text.into(),
            at: Local::now(),
        }));
    }

    /// Enter the thread-creation phase. Refused while any request is in
    /// flight; allowed from Idle whether or not a thread already exists
    /// (re-creating replaces the conversation).
    pub fn begin_thread_creation(&mut self) -> Result<(), SessionError> {
        if self.is_busy() {
            return Err(SessionError::Busy);
        }
        self.phase = Phase::CreatingThread;
        Ok(())
    }

    /// Successful thread creation: adopt the new id and clear the transcript.
    pub fn adopt_thread(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.entries.clear();
        self.push_notice(NoticeLevel::Info, format!("New conversation started ({id})"));
        self.thread_id = Some(id);
        self.phase = Phase::Idle;
    }

    /// Failed thread creation: report the error and leave the prior thread
    /// id and transcript untouched.
    pub fn creation_failed(&mut self, message: impl Into<String>) {
        self.push_notice(
            NoticeLevel::Error,
            format!("Could not create thread: {}", message.into()),
        );
        self.phase = Phase::Idle;
    }

    /// Validate and record a question for dispatch.
    ///
    /// On success the trimmed text is appended as a user turn, the phase
    /// moves to `AwaitingAnswer`, and the text to send is returned. On any
    /// error nothing is appended and no remote call may be issued.
    pub fn begin_question(&mut self, text: &str) -> Result<String, SessionError> {
        if self.is_busy() {
            return Err(SessionError::Busy);
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SessionError::EmptyQuestion);
        }
        if self.thread_id.is_none() {
            return Err(SessionError::NoThread);
        }
        let question = trimmed.to_string();
        self.entries.push(Entry::Turn(Turn {
            role: Role::User,
            content: question.clone(),
        }));
        self.phase = Phase::AwaitingAnswer;
        Ok(question)
    }

    /// The answer arrived: append the assistant turn and return to Idle.
    pub fn complete_answer(&mut self, text: impl Into<String>) {
        self.entries.push(Entry::Turn(Turn {
            role: Role::Assistant,
            content: text.into(),
        }));
        self.phase = Phase::Idle;
    }

    /// The submission failed after dispatch: the user turn stays, an error
    /// notice is appended instead of an assistant turn.
    pub fn fail_answer(&mut self, message: impl Into<String>) {
        self.push_notice(NoticeLevel::Error, message);
        self.phase = Phase::Idle;
    }
}
