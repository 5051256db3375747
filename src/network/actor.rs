//! Network actor - runs valuation requests in the Tokio async runtime

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{execute_fetch, ValuationTransport};

/// Network actor that processes fetch commands
pub struct NetworkActor {
    transport: Arc<dyn ValuationTransport>,
    backend_url: String,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(
        transport: Arc<dyn ValuationTransport>,
        backend_url: impl Into<String>,
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
    ) -> Self {
        NetworkActor {
            transport,
            backend_url: backend_url.into(),
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                // Handle incoming commands
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::FetchValuation { id, ticker }) => {
                            let response_tx = self.response_tx.clone();
                            let transport = Arc::clone(&self.transport);
                            let backend_url = self.backend_url.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, ticker = %ticker, backend = %backend_url, "Fetching valuation");
                                let result = execute_fetch(transport.as_ref(), &backend_url, &ticker, id).await;
                                tracing::info!(id, time_ms = result.time_ms(), "Valuation request completed");
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}
