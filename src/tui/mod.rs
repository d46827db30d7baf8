// ABOUTME: Terminal UI — owns the terminal, the event loop, and the draw cycle.
// ABOUTME: Multiplexes keyboard events with gateway replies via tokio::select!.

pub mod input;
pub mod state;
pub mod ui;
pub mod widgets;

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::gateway::bridge::{GatewayReply, GatewayRequest};
use input::InputResult;
pub use state::TuiState;

/// Run the TUI until the user quits. Restores the terminal even when the
/// event loop errors out.
pub async fn run(
    state: &mut TuiState,
    request_tx: mpsc::Sender<GatewayRequest>,
    reply_rx: &mut mpsc::Receiver<GatewayReply>,
) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, state, request_tx, reply_rx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut TuiState,
    request_tx: mpsc::Sender<GatewayRequest>,
    reply_rx: &mut mpsc::Receiver<GatewayReply>,
) -> Result<()> {
    let mut events = EventStream::new();

    loop {
        terminal.draw(|frame| ui::render(frame, state))?;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        match input::handle_key(state, key) {
                            InputResult::Quit => break,
                            InputResult::Submit => {
                                if let Some(request) = state.submit_question() {
                                    request_tx.send(request).await?;
                                }
                            }
                            InputResult::NewThread => {
                                if let Some(request) = state.request_new_thread() {
                                    request_tx.send(request).await?;
                                }
                            }
                            InputResult::None => {}
                        }
                    }
                    // Resize and other events just trigger a redraw.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }
            maybe_reply = reply_rx.recv() => {
                match maybe_reply {
                    Some(reply) => state.apply_reply(reply),
                    None => break, // gateway loop is gone
                }
            }
        }
    }

    Ok(())
}
