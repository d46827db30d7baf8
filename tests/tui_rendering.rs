// ABOUTME: E2E tests for TUI rendering using ratatui's TestBackend.
// ABOUTME: Verifies the transcript, input area, busy indicators, and status bar.

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use colloquy::config::Config;
use colloquy::gateway::bridge::GatewayReply;
use colloquy::tui::state::TuiState;
use colloquy::tui::ui;

/// Extract a single row of text from the terminal buffer as a String.
fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buf = terminal.backend().buffer();
    let width = buf.area.width;
    (0..width)
        .map(|x| {
            buf.cell((x, y))
                .map(|c| c.symbol().chars().next().unwrap_or(' '))
                .unwrap_or(' ')
        })
        .collect()
}

/// Extract all text from the terminal buffer as a single string (rows joined by newlines).
fn all_text(terminal: &Terminal<TestBackend>) -> String {
    let buf = terminal.backend().buffer();
    let height = buf.area.height;
    (0..height)
        .map(|y| row_text(terminal, y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn test_state() -> TuiState {
    let mut config = Config::default();
    config.agent.id = "asst_render".to_string();
    config.connection.endpoint = "http://localhost:1".to_string();
    TuiState::new(&config)
}

fn state_with_thread() -> TuiState {
    let mut state = test_state();
    state.request_new_thread().unwrap();
    state.apply_reply(GatewayReply::ThreadCreated("thread_render".to_string()));
    state
}

fn draw(state: &mut TuiState) -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::render(frame, state)).unwrap();
    terminal
}

/// Rendering the initial state should produce the header, the startup
/// hint, and a status bar reporting no thread.
#[test]
fn renders_empty_state() {
    let mut state = test_state();
    let terminal = draw(&mut state);

    let header = row_text(&terminal, 0);
    assert!(
        header.contains("colloquy"),
        "header should contain 'colloquy', got: {header:?}",
    );

    let text = all_text(&terminal);
    assert!(text.contains("Ctrl+N"), "startup hint missing:\n{text}");
    assert!(text.contains("no thread"), "status bar missing:\n{text}");
    assert!(text.contains("asst_render"), "agent id missing:\n{text}");
}

/// A full question/answer exchange should render both turn prefixes
/// with their text.
#[test]
fn renders_conversation_turns() {
    let mut state = state_with_thread();
    state.input = "Hello agent!".to_string();
    state.submit_question().unwrap();
    state.apply_reply(GatewayReply::Answer("Hello user!".to_string()));

    let terminal = draw(&mut state);
    let text = all_text(&terminal);
    assert!(text.contains("❯"), "user prefix missing:\n{text}");
    assert!(text.contains("Hello agent!"), "question missing:\n{text}");
    assert!(text.contains("⏺"), "assistant prefix missing:\n{text}");
    assert!(text.contains("Hello user!"), "answer missing:\n{text}");
}

/// While waiting for an answer the input border shows a thinking
/// indicator and the status bar reports the in-flight state.
#[test]
fn renders_thinking_indicator_while_busy() {
    let mut state = state_with_thread();
    state.input = "slow question".to_string();
    state.submit_question().unwrap();

    let terminal = draw(&mut state);
    let text = all_text(&terminal);
    assert!(text.contains("thinking..."), "indicator missing:\n{text}");
}

/// Thread creation shows its own indicator.
#[test]
fn renders_creating_thread_indicator() {
    let mut state = test_state();
    state.request_new_thread().unwrap();

    let terminal = draw(&mut state);
    let text = all_text(&terminal);
    assert!(
        text.contains("creating thread..."),
        "indicator missing:\n{text}"
    );
}

/// A failed answer renders as an inline error while the user's question
/// stays in the transcript.
#[test]
fn renders_error_notice_after_failed_answer() {
    let mut state = state_with_thread();
    state.input = "doomed question".to_string();
    state.submit_question().unwrap();
    state.apply_reply(GatewayReply::AnswerFailed(
        "could not reach the agent service".to_string(),
    ));

    let terminal = draw(&mut state);
    let text = all_text(&terminal);
    assert!(text.contains("doomed question"), "question missing:\n{text}");
    assert!(
        text.contains("could not reach the agent service"),
        "error notice missing:\n{text}"
    );
}

/// The input buffer renders in the input area with the typed draft.
#[test]
fn renders_input_buffer() {
    let mut state = state_with_thread();
    state.input = "draft in progress".to_string();
    state.cursor_pos = state.input.chars().count();

    let terminal = draw(&mut state);
    let text = all_text(&terminal);
    assert!(text.contains("draft in progress"), "draft missing:\n{text}");
}

/// A multiline draft grows the input area and renders every line.
#[test]
fn renders_multiline_input() {
    let mut state = state_with_thread();
    state.input = "first line\nsecond line".to_string();
    state.cursor_pos = state.input.chars().count();

    let terminal = draw(&mut state);
    let text = all_text(&terminal);
    assert!(text.contains("first line"), "first line missing:\n{text}");
    assert!(text.contains("second line"), "second line missing:\n{text}");
}

/// Scrolled far past the top, the offset clamps instead of blanking the
/// transcript.
#[test]
fn scroll_offset_clamps_to_content() {
    let mut state = state_with_thread();
    state.input = "question".to_string();
    state.submit_question().unwrap();
    state.apply_reply(GatewayReply::Answer("answer".to_string()));
    state.scroll_offset = 500;

    let terminal = draw(&mut state);
    let text = all_text(&terminal);
    assert!(text.contains("question"), "transcript vanished:\n{text}");
    assert!(state.scroll_offset < 500, "offset not clamped");
}

/// Starting a new thread replaces the transcript with a fresh notice.
#[test]
fn new_thread_clears_rendered_transcript() {
    let mut state = state_with_thread();
    state.input = "old question".to_string();
    state.submit_question().unwrap();
    state.apply_reply(GatewayReply::Answer("old answer".to_string()));

    state.request_new_thread().unwrap();
    state.apply_reply(GatewayReply::ThreadCreated("thread_next".to_string()));

    let terminal = draw(&mut state);
    let text = all_text(&terminal);
    assert!(!text.contains("old question"), "stale turn rendered:\n{text}");
    assert!(
        text.contains("New conversation started"),
        "creation notice missing:\n{text}"
    );
    assert!(text.contains("thread_next"), "status bar stale:\n{text}");
}
