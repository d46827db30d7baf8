// ABOUTME: Keyboard input handling for the TUI.
// ABOUTME: Translates key events into editing actions and high-level input results.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::TuiState;

/// Result of handling a key event.
#[derive(Debug, PartialEq)]
pub enum InputResult {
    /// No action needed beyond any state mutation that already happened.
    None,
    /// The user pressed Enter on a non-empty-looking buffer; the caller
    /// should try to dispatch it via `TuiState::submit_question`.
    Submit,
    /// The user asked for a fresh conversation thread (Ctrl+N).
    NewThread,
    /// The user wants to quit.
    Quit,
}

/// Handle a key event, mutating state as needed.
pub fn handle_key(state: &mut TuiState, key: KeyEvent) -> InputResult {
    // Quit and scrolling work in every mode.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return InputResult::Quit;
    }
    match key.code {
        KeyCode::PageUp => {
            state.scroll_offset = state.scroll_offset.saturating_add(10);
            return InputResult::None;
        }
        KeyCode::PageDown => {
            state.scroll_offset = state.scroll_offset.saturating_sub(10);
            return InputResult::None;
        }
        _ => {}
    }

    // While a request is in flight the input line is inert, but the
    // transcript can still be scrolled.
    if state.is_busy() {
        return match key.code {
            KeyCode::Up => {
                state.scroll_offset = state.scroll_offset.saturating_add(1);
                InputResult::None
            }
            KeyCode::Down => {
                state.scroll_offset = state.scroll_offset.saturating_sub(1);
                InputResult::None
            }
            _ => InputResult::None,
        };
    }

    if key.code == KeyCode::Char('n') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return InputResult::NewThread;
    }

    match key.code {
        KeyCode::Esc => InputResult::Quit,
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => {
            state.insert_char_at_cursor('\n');
            InputResult::None
        }
        KeyCode::Enter => InputResult::Submit,
        KeyCode::Char(c) => {
            state.insert_char_at_cursor(c);
            InputResult::None
        }
        KeyCode::Backspace => {
            state.backspace_char();
            InputResult::None
        }
        KeyCode::Delete => {
            state.delete_char_at_cursor();
            InputResult::None
        }
        KeyCode::Left => {
            state.move_cursor_left();
            InputResult::None
        }
        KeyCode::Right => {
            state.move_cursor_right();
            InputResult::None
        }
        KeyCode::Home => {
            state.move_cursor_home();
            InputResult::None
        }
        KeyCode::End => {
            state.move_cursor_end();
            InputResult::None
        }
        // Up/Down move within a multiline draft; on a single line they
        // scroll the transcript instead.
        KeyCode::Up => {
            if !state.move_cursor_up_in_input() {
                state.scroll_offset = state.scroll_offset.saturating_add(1);
            }
            InputResult::None
        }
        KeyCode::Down => {
            if !state.move_cursor_down_in_input() {
                state.scroll_offset = state.scroll_offset.saturating_sub(1);
            }
            InputResult::None
        }
        _ => InputResult::None,
    }
}
