// ABOUTME: Status bar rendering — agent id, thread id, and in-flight indicator.
// ABOUTME: Produces a single dim line shown at the bottom of the screen.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::state::TuiState;

/// Build the one-line status bar.
pub fn status_line(state: &TuiState) -> Line<'static> {
    let dim = Style::default().add_modifier(Modifier::DIM);
    let mut spans = vec![Span::styled(format!(" {}", state.agent_id), dim)];

    let thread = match state.session.thread_id() {
        Some(id) => format!("thread {}", short_id(id)),
        None => "no thread".to_string(),
    };
    spans.push(Span::styled(" | ", dim));
    spans.push(Span::styled(thread, dim));

    if let Some(label) = state.phase_label() {
        spans.push(Span::styled(" | ", dim));
        spans.push(Span::styled(
            label.to_string(),
            Style::default().fg(Color::Yellow),
        ));
    }

    Line::from(spans)
}

/// Shorten long opaque ids for display, keeping head and tail.
fn short_id(id: &str) -> String {
    const HEAD: usize = 14;
    const TAIL: usize = 4;
    let chars: Vec<char> = id.chars().collect();
    if chars.len() <= HEAD + TAIL + 1 {
        return id.to_string();
    }
    let head: String = chars[..HEAD].iter().collect();
    let tail: String = chars[chars.len() - TAIL..].iter().collect();
    format!("{head}…{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::gateway::bridge::GatewayReply;

    fn test_state() -> TuiState {
        let mut config = Config::default();
        config.agent.id = "asst_42".to_string();
        config.connection.endpoint = "http://localhost:1".to_string();
        TuiState::new(&config)
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn shows_agent_and_no_thread_initially() {
        let state = test_state();
        let line = text(&status_line(&state));
        assert!(line.contains("asst_42"));
        assert!(line.contains("no thread"));
        assert!(!line.contains("thinking"));
    }

    #[test]
    fn shows_thread_and_thinking_indicator() {
        let mut state = test_state();
        state.request_new_thread().unwrap();
        let line = text(&status_line(&state));
        assert!(line.contains("creating thread..."));

        state.apply_reply(GatewayReply::ThreadCreated("thread_xyz".to_string()));
        state.input = "q".to_string();
        state.submit_question().unwrap();
        let line = text(&status_line(&state));
        assert!(line.contains("thread thread_xyz"));
        assert!(line.contains("thinking..."));
    }

    #[test]
    fn long_ids_are_shortened() {
        let shortened = short_id("thread_AbCdEfGhIjKlMnOpQrStUvWx");
        assert!(shortened.contains('…'));
        assert!(shortened.starts_with("thread_"));
        assert!(shortened.ends_with("UvWx"));
        assert_eq!(short_id("thread_short"), "thread_short");
    }
}
