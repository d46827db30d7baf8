// ABOUTME: Main TUI rendering function — assembles header, transcript, input, and status bar.
// ABOUTME: Splits the terminal frame into vertical layout chunks and delegates to widgets.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::tui::state::TuiState;
use crate::tui::widgets::chat::transcript_lines;
use crate::tui::widgets::status::status_line;

/// Render the full TUI screen layout to the given frame.
pub fn render(frame: &mut Frame, state: &mut TuiState) {
    let area = frame.area();

    // Maximum height the input area can grow to (in terminal rows).
    const MAX_INPUT_HEIGHT: u16 = 8;

    // +2 accounts for top and bottom borders.
    let input_height = (state.input_line_count() as u16 + 2).clamp(3, MAX_INPUT_HEIGHT);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Header
            Constraint::Min(3),               // Transcript
            Constraint::Length(input_height), // Input area
            Constraint::Length(1),            // Status bar
        ])
        .split(area);

    // Header
    let header = Line::from(Span::styled(
        " colloquy",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(header), chunks[0]);

    // Transcript
    let chat_chunk = chunks[1];
    let visible_height = chat_chunk.height;

    // Use ratatui's own line_count() so the wrapped line count exactly
    // matches its internal rendering; otherwise scroll math can hide the
    // bottom of the transcript.
    let chat_paragraph =
        Paragraph::new(transcript_lines(state.session.entries())).wrap(Wrap { trim: false });
    let total_lines = chat_paragraph.line_count(chat_chunk.width) as u16;
    let max_scroll = total_lines.saturating_sub(visible_height);

    // Cap scroll_offset so it can't go past the top of the content.
    if state.scroll_offset > max_scroll {
        state.scroll_offset = max_scroll;
    }

    // scroll_offset is lines scrolled up from the bottom (0 = at bottom).
    let scroll = max_scroll.saturating_sub(state.scroll_offset);
    frame.render_widget(chat_paragraph.scroll((scroll, 0)), chat_chunk);

    // Input area
    let input_chunk = chunks[2];
    let mut input_block = Block::default().borders(Borders::TOP | Borders::BOTTOM);
    if let Some(label) = state.phase_label() {
        input_block = input_block.title(Span::styled(
            format!(" {label} "),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let input_style = if state.is_busy() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let input = Paragraph::new(Text::from(state.input.clone()))
        .style(input_style)
        .block(input_block);
    frame.render_widget(input, input_chunk);

    // Cursor position while editing; hidden while a request is in flight.
    if !state.is_busy() && input_chunk.width > 0 && input_chunk.height > 1 {
        state.clamp_cursor();

        let cursor_line = state.cursor_line();
        let cursor_col = state.cursor_column();

        // Compute the visual (display) width of the text before the cursor on its line.
        let lines = state.input_lines();
        let line_text = lines.get(cursor_line).unwrap_or(&"");
        let prefix: String = line_text.chars().take(cursor_col).collect();
        let visual_col = UnicodeWidthStr::width(prefix.as_str());

        let max_visual_col = input_chunk.width.saturating_sub(1) as usize;
        let clamped_visual_col = visual_col.min(max_visual_col);

        let cursor_x = input_chunk.x.saturating_add(clamped_visual_col as u16);
        // +1 for the top border, then offset by the cursor's line index.
        let cursor_y = input_chunk.y.saturating_add(1 + cursor_line as u16);
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }

    // Status bar
    frame.render_widget(Paragraph::new(status_line(state)), chunks[3]);
}
