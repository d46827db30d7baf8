// ABOUTME: Library root for colloquy, a terminal chat client for a hosted agents service.
// ABOUTME: Exposes the session, gateway, config, TUI, and app modules for integration tests.

pub mod app;
pub mod config;
pub mod gateway;
pub mod session;
pub mod tui;
