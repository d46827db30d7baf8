// ABOUTME: Gateway loop — background task that owns the client and serializes remote work.
// ABOUTME: Receives requests from the TUI over mpsc and reports replies back the same way.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::gateway::{AgentService, post_and_run};

/// A remote request dispatched by the TUI. At most one is in flight at a
/// time; the session phase machine enforces that on the sending side.
#[derive(Debug)]
pub enum GatewayRequest {
    CreateThread,
    Ask { thread_id: String, text: String },
    Quit,
}

/// The outcome reported back to the TUI for each request.
#[derive(Debug, PartialEq)]
pub enum GatewayReply {
    ThreadCreated(String),
    ThreadFailed(String),
    Answer(String),
    AnswerFailed(String),
}

/// Run the gateway loop until a Quit request arrives or the channel closes.
///
/// Requests are processed one at a time in arrival order; every request
/// produces exactly one reply (except Quit).
pub async fn run_gateway_loop(
    service: Arc<dyn AgentService>,
    agent_id: String,
    mut request_rx: mpsc::Receiver<GatewayRequest>,
    reply_tx: mpsc::Sender<GatewayReply>,
) {
    while let Some(request) = request_rx.recv().await {
        let reply = match request {
            GatewayRequest::Quit => break,
            GatewayRequest::CreateThread => match service.create_thread().await {
                Ok(thread) => GatewayReply::ThreadCreated(thread.id),
                Err(e) => {
                    tracing::warn!(error = %e, "thread creation failed");
                    GatewayReply::ThreadFailed(e.to_string())
                }
            },
            GatewayRequest::Ask { thread_id, text } => {
                match post_and_run(service.as_ref(), &thread_id, &agent_id, &text).await {
                    Ok(answer) => GatewayReply::Answer(answer),
                    Err(e) => {
                        tracing::warn!(error = %e, thread_id, "question failed");
                        GatewayReply::AnswerFailed(e.to_string())
                    }
                }
            }
        };
        if reply_tx.send(reply).await.is_err() {
            break; // TUI is gone.
        }
    }
}
