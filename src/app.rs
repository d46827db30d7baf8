// ABOUTME: Application wiring — builds the HTTP client, channels, and background tasks.
// ABOUTME: Owns the lifecycle: spawn the gateway loop, run the TUI, shut down cleanly.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::gateway::AgentsClient;
use crate::gateway::bridge::{GatewayRequest, run_gateway_loop};
use crate::tui::{self, TuiState};

/// The assembled application.
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run until the user quits. The gateway loop lives on its own task;
    /// the TUI talks to it exclusively through channels.
    pub async fn run(self) -> Result<()> {
        let client = Arc::new(AgentsClient::new(&self.config.connection)?);

        let (request_tx, request_rx) = mpsc::channel::<GatewayRequest>(16);
        let (reply_tx, mut reply_rx) = mpsc::channel(16);

        let gateway = tokio::spawn(run_gateway_loop(
            client,
            self.config.agent.id.clone(),
            request_rx,
            reply_tx,
        ));

        let mut state = TuiState::new(&self.config);
        let result = tui::run(&mut state, request_tx.clone(), &mut reply_rx).await;

        // Ask the gateway loop to stop; ignore failure if it already has.
        let _ = request_tx.send(GatewayRequest::Quit).await;
        drop(request_tx);
        let _ = gateway.await;

        result
    }
}
