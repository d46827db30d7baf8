// ABOUTME: Transcript rendering — turns session entries into styled lines.
// ABOUTME: User turns get a ❯ prefix, assistant turns ⏺, notices render dimmed.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::session::{Entry, Notice, NoticeLevel, Role, Turn};

/// Build the transcript lines for a slice of session entries.
///
/// Entries are separated by a blank line. Wrapping is left to the
/// Paragraph that displays these lines.
pub fn transcript_lines(entries: &[Entry]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for entry in entries {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        match entry {
            Entry::Turn(turn) => push_turn(&mut lines, turn),
            Entry::Notice(notice) => push_notice(&mut lines, notice),
        }
    }
    lines
}

fn push_turn(lines: &mut Vec<Line<'static>>, turn: &Turn) {
    let (prefix, style) = match turn.role {
        Role::User => (
            "❯ ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Role::Assistant => (
            "⏺ ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    };
    for (i, text_line) in turn.content.lines().enumerate() {
        if i == 0 {
            lines.push(Line::from(vec![
                Span::styled(prefix.to_string(), style),
                Span::raw(text_line.to_string()),
            ]));
        } else {
            lines.push(Line::from(format!("  {text_line}")));
        }
    }
    // An empty turn should still occupy a line.
    if turn.content.lines().next().is_none() {
        lines.push(Line::from(Span::styled(prefix.to_string(), style)));
    }
}

fn push_notice(lines: &mut Vec<Line<'static>>, notice: &Notice) {
    let stamp = notice.at.format("[%H:%M]").to_string();
    let style = match notice.level {
        NoticeLevel::Info => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
        NoticeLevel::Error => Style::default().fg(Color::Red),
    };
    let marker = match notice.level {
        NoticeLevel::Info => "",
        NoticeLevel::Error => "⚠ ",
    };
    for (i, text_line) in notice.text.lines().enumerate() {
        if i == 0 {
            lines.push(Line::from(vec![
                Span::styled(format!("{stamp} "), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{marker}{text_line}"), style),
            ]));
        } else {
            lines.push(Line::from(Span::styled(text_line.to_string(), style)));
        }
    }
}
