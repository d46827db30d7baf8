// ABOUTME: TUI state — the session plus the input buffer, cursor, and scroll position.
// ABOUTME: Applies gateway replies to the session and turns submissions into requests.

use crate::config::Config;
use crate::gateway::bridge::{GatewayReply, GatewayRequest};
use crate::session::{NoticeLevel, Phase, Session};

/// Full TUI application state.
pub struct TuiState {
    pub session: Session,
    pub input: String,
    pub cursor_pos: usize,
    /// Lines scrolled up from the bottom of the transcript (0 = pinned).
    pub scroll_offset: u16,
    pub agent_id: String,
    pub endpoint: String,
}

impl TuiState {
    /// Create the initial state with a startup hint in the transcript.
    pub fn new(config: &Config) -> Self {
        let mut session = Session::new();
        session.push_notice(
            NoticeLevel::Info,
            "Press Ctrl+N to start a new conversation",
        );
        Self {
            session,
            input: String::new(),
            cursor_pos: 0,
            scroll_offset: 0,
            agent_id: config.agent.id.clone(),
            endpoint: config.connection.endpoint.clone(),
        }
    }

    /// Whether input should be inert because a request is in flight.
    pub fn is_busy(&self) -> bool {
        self.session.is_busy()
    }

    /// Try to dispatch the current input buffer as a question.
    ///
    /// On success the buffer is cleared immediately — before the reply
    /// resolves — and the request to send is returned. Validation failures
    /// keep the buffer so the user can correct it, and surface as an
    /// inline error notice instead.
    pub fn submit_question(&mut self) -> Option<GatewayRequest> {
        let text = self.input.clone();
        match self.session.begin_question(&text) {
            Ok(question) => {
                let thread_id = self.session.thread_id().unwrap_or_default().to_string();
                self.input.clear();
                self.cursor_pos = 0;
                self.scroll_offset = 0;
                Some(GatewayRequest::Ask {
                    thread_id,
                    text: question,
                })
            }
            Err(e) => {
                self.session.push_notice(NoticeLevel::Error, e.to_string());
                self.scroll_offset = 0;
                None
            }
        }
    }

    /// Try to start a new conversation thread.
    pub fn request_new_thread(&mut self) -> Option<GatewayRequest> {
        match self.session.begin_thread_creation() {
            Ok(()) => Some(GatewayRequest::CreateThread),
            Err(e) => {
                self.session.push_notice(NoticeLevel::Error, e.to_string());
                self.scroll_offset = 0;
                None
            }
        }
    }

    /// Apply a gateway reply to the session and pin the view to the bottom.
    pub fn apply_reply(&mut self, reply: GatewayReply) {
        match reply {
            GatewayReply::ThreadCreated(id) => self.session.adopt_thread(id),
            GatewayReply::ThreadFailed(message) => self.session.creation_failed(message),
            GatewayReply::Answer(text) => self.session.complete_answer(text),
            GatewayReply::AnswerFailed(message) => self.session.fail_answer(message),
        }
        self.scroll_offset = 0;
    }

    /// Short label for the status bar describing the current phase.
    pub fn phase_label(&self) -> Option<&'static str> {
        match self.session.phase() {
            Phase::Idle => None,
            Phase::CreatingThread => Some("creating thread..."),
            Phase::AwaitingAnswer => Some("thinking..."),
        }
    }

    // --- Input buffer editing (UTF-8 safe, multiline) ---

    /// Clamp the cursor position to the valid character range of the input buffer.
    pub fn clamp_cursor(&mut self) {
        self.cursor_pos = self.cursor_pos.min(self.input_char_len());
    }

    /// Return the current cursor byte index in the UTF-8 input buffer.
    pub fn cursor_byte_index(&self) -> usize {
        char_index_to_byte_index(&self.input, self.cursor_pos)
    }

    /// Return the total number of characters in the input buffer.
    pub fn input_char_len(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert a character at the cursor and advance by one character.
    pub fn insert_char_at_cursor(&mut self, c: char) {
        self.clamp_cursor();
        let byte_index = self.cursor_byte_index();
        self.input.insert(byte_index, c);
        self.cursor_pos += 1;
    }

    /// Delete the character before the cursor (backspace behavior).
    pub fn backspace_char(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos == 0 {
            return;
        }

        let end = self.cursor_byte_index();
        let start = char_index_to_byte_index(&self.input, self.cursor_pos - 1);
        self.input.replace_range(start..end, "");
        self.cursor_pos -= 1;
    }

    /// Delete the character at the cursor (delete behavior).
    pub fn delete_char_at_cursor(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos >= self.input_char_len() {
            return;
        }

        let start = self.cursor_byte_index();
        let end = char_index_to_byte_index(&self.input, self.cursor_pos + 1);
        self.input.replace_range(start..end, "");
    }

    /// Move cursor one character to the left.
    pub fn move_cursor_left(&mut self) {
        self.clamp_cursor();
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    /// Move cursor one character to the right.
    pub fn move_cursor_right(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos < self.input_char_len() {
            self.cursor_pos += 1;
        }
    }

    /// Move cursor to start of input.
    pub fn move_cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    /// Move cursor to end of input.
    pub fn move_cursor_end(&mut self) {
        self.cursor_pos = self.input_char_len();
    }

    /// The input buffer split into logical lines.
    pub fn input_lines(&self) -> Vec<&str> {
        self.input.split('\n').collect()
    }

    /// Number of logical lines in the input buffer.
    pub fn input_line_count(&self) -> usize {
        self.input.split('\n').count()
    }

    /// Zero-based line index the cursor is on.
    pub fn cursor_line(&self) -> usize {
        self.input
            .chars()
            .take(self.cursor_pos)
            .filter(|c| *c == '\n')
            .count()
    }

    /// Zero-based character column of the cursor within its line.
    pub fn cursor_column(&self) -> usize {
        let mut column = 0;
        for c in self.input.chars().take(self.cursor_pos) {
            if c == '\n' {
                column = 0;
            } else {
                column += 1;
            }
        }
        column
    }

    /// Move the cursor up one logical line, keeping the column where
    /// possible. Returns false when already on the first line.
    pub fn move_cursor_up_in_input(&mut self) -> bool {
        self.clamp_cursor();
        let line = self.cursor_line();
        if line == 0 {
            return false;
        }
        self.move_to_line_column(line - 1, self.cursor_column());
        true
    }

    /// Move the cursor down one logical line, keeping the column where
    /// possible. Returns false when already on the last line.
    pub fn move_cursor_down_in_input(&mut self) -> bool {
        self.clamp_cursor();
        let line = self.cursor_line();
        if line + 1 >= self.input_line_count() {
            return false;
        }
        self.move_to_line_column(line + 1, self.cursor_column());
        true
    }

    fn move_to_line_column(&mut self, line: usize, column: usize) {
        let lines = self.input_lines();
        // Characters before the target line: each prior line plus its newline.
        let start: usize = lines
            .iter()
            .take(line)
            .map(|l| l.chars().count() + 1)
            .sum();
        let line_len = lines.get(line).map_or(0, |l| l.chars().count());
        self.cursor_pos = start + column.min(line_len);
    }
}

fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    if char_index == 0 {
        return 0;
    }

    match s.char_indices().nth(char_index) {
        Some((idx, _)) => idx,
        None => s.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Entry, Role};

    fn test_state() -> TuiState {
        let mut config = Config::default();
        config.agent.id = "asst_test".to_string();
        config.connection.endpoint = "http://localhost:1".to_string();
        TuiState::new(&config)
    }

    fn state_with_thread() -> TuiState {
        let mut state = test_state();
        state.request_new_thread().unwrap();
        state.apply_reply(GatewayReply::ThreadCreated("thread_1".to_string()));
        state
    }

    #[test]
    fn new_state_shows_startup_hint() {
        let state = test_state();
        assert_eq!(state.session.entries().len(), 1);
        assert!(matches!(state.session.entries()[0], Entry::Notice(_)));
        assert!(!state.is_busy());
    }

    #[test]
    fn submit_without_thread_yields_no_request_and_a_notice() {
        let mut state = test_state();
        state.input = "What is CCUS?".to_string();
        let request = state.submit_question();
        assert!(request.is_none());
        assert_eq!(state.session.turns().count(), 0);
        // Buffer kept for correction since nothing was dispatched.
        assert_eq!(state.input, "What is CCUS?");
        match state.session.entries().last().unwrap() {
            Entry::Notice(n) => assert!(n.text.contains("no active conversation")),
            other => panic!("expected notice, got {other:?}"),
        }
    }

    #[test]
    fn submit_empty_yields_validation_notice() {
        let mut state = state_with_thread();
        state.input = "   ".to_string();
        assert!(state.submit_question().is_none());
        assert_eq!(state.session.turns().count(), 0);
        match state.session.entries().last().unwrap() {
            Entry::Notice(n) => assert!(n.text.contains("enter a question")),
            other => panic!("expected notice, got {other:?}"),
        }
    }

    #[test]
    fn submit_clears_buffer_before_reply_arrives() {
        let mut state = state_with_thread();
        state.input = "hello".to_string();
        state.cursor_pos = 5;
        let request = state.submit_question().unwrap();
        match request {
            GatewayRequest::Ask { thread_id, text } => {
                assert_eq!(thread_id, "thread_1");
                assert_eq!(text, "hello");
            }
            other => panic!("expected Ask, got {other:?}"),
        }
        assert_eq!(state.input, "");
        assert_eq!(state.cursor_pos, 0);
        assert!(state.is_busy());
    }

    #[test]
    fn answer_reply_appends_assistant_turn() {
        let mut state = state_with_thread();
        state.input = "hello".to_string();
        state.submit_question().unwrap();
        state.apply_reply(GatewayReply::Answer("hi there".to_string()));

        let turns: Vec<_> = state.session.turns().collect();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[1].content, "hi there");
        assert!(!state.is_busy());
    }

    #[test]
    fn failed_answer_keeps_user_turn_and_notes_error() {
        let mut state = state_with_thread();
        state.input = "hello".to_string();
        state.submit_question().unwrap();
        state.apply_reply(GatewayReply::AnswerFailed("boom".to_string()));

        assert_eq!(state.session.turns().count(), 1);
        assert!(!state.is_busy());
        // Retrying requires re-typing: the buffer stays cleared.
        assert_eq!(state.input, "");
    }

    #[test]
    fn thread_created_clears_transcript() {
        let mut state = state_with_thread();
        state.input = "hello".to_string();
        state.submit_question().unwrap();
        state.apply_reply(GatewayReply::Answer("hi".to_string()));

        state.request_new_thread().unwrap();
        state.apply_reply(GatewayReply::ThreadCreated("thread_2".to_string()));
        assert_eq!(state.session.thread_id(), Some("thread_2"));
        assert_eq!(state.session.turns().count(), 0);
    }

    #[test]
    fn new_thread_refused_while_thinking() {
        let mut state = state_with_thread();
        state.input = "hello".to_string();
        state.submit_question().unwrap();
        assert!(state.request_new_thread().is_none());
    }

    #[test]
    fn scroll_resets_on_reply() {
        let mut state = state_with_thread();
        state.scroll_offset = 7;
        state.apply_reply(GatewayReply::Answer("hi".to_string()));
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn utf8_input_editing_is_safe() {
        let mut state = test_state();
        state.insert_char_at_cursor('a');
        state.insert_char_at_cursor('🙂');
        state.insert_char_at_cursor('é');
        assert_eq!(state.input, "a🙂é");
        assert_eq!(state.cursor_pos, 3);

        state.move_cursor_left();
        state.backspace_char();
        assert_eq!(state.input, "aé");
        assert_eq!(state.cursor_pos, 1);

        state.delete_char_at_cursor();
        assert_eq!(state.input, "a");
        assert_eq!(state.cursor_pos, 1);
    }

    #[test]
    fn clamp_cursor_handles_out_of_range_positions() {
        let mut state = test_state();
        state.input = "hi🙂".to_string();
        state.cursor_pos = 999;
        state.clamp_cursor();
        assert_eq!(state.cursor_pos, 3);
        assert_eq!(state.cursor_byte_index(), state.input.len());
    }

    #[test]
    fn cursor_line_and_column_track_newlines() {
        let mut state = test_state();
        state.input = "abc\nde".to_string();
        state.cursor_pos = 5; // on 'e'... a,b,c,\n,d -> line 1, col 1
        assert_eq!(state.cursor_line(), 1);
        assert_eq!(state.cursor_column(), 1);
    }

    #[test]
    fn cursor_moves_between_lines_preserving_column() {
        let mut state = test_state();
        state.input = "abcdef\nxy\nlonger".to_string();
        state.cursor_pos = 4; // line 0, col 4
        assert!(state.move_cursor_down_in_input());
        // Line "xy" is shorter; column clamps to 2.
        assert_eq!(state.cursor_line(), 1);
        assert_eq!(state.cursor_column(), 2);

        assert!(state.move_cursor_down_in_input());
        assert_eq!(state.cursor_line(), 2);

        assert!(!state.move_cursor_down_in_input(), "already on last line");
        assert!(state.move_cursor_up_in_input());
        assert!(state.move_cursor_up_in_input());
        assert_eq!(state.cursor_line(), 0);
        assert!(!state.move_cursor_up_in_input(), "already on first line");
    }
}
