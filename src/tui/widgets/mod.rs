// ABOUTME: Widget rendering helpers for the TUI.
// ABOUTME: Pure functions from state to ratatui lines, testable without a terminal.

pub mod chat;
pub mod status;
