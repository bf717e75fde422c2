//! Network actor - runs dispatches in the Tokio async runtime

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::dispatcher::{dispatch, InFlight};
use crate::network::transport::Transport;

/// Network actor that processes dispatch commands
pub struct NetworkActor {
    transport: Arc<dyn Transport>,
    in_flight: InFlight,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(
        transport: Arc<dyn Transport>,
        in_flight: InFlight,
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
    ) -> Self {
        NetworkActor {
            transport,
            in_flight,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Dispatch { id, request }) => {
                            let response_tx = self.response_tx.clone();
                            let transport = Arc::clone(&self.transport);
                            let in_flight = self.in_flight.clone();

                            self.active_requests.spawn(async move {
                                let start = Instant::now();
                                let envelope = dispatch(transport.as_ref(), &request, &in_flight).await;
                                let time_ms = start.elapsed().as_millis() as u64;
                                tracing::info!(id, status = envelope.status, success = envelope.success, time_ms, "Dispatch finished");
                                let _ = response_tx.send(NetworkResponse::Completed { id, envelope, time_ms });
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HttpMethod;
    use crate::network::transport::{TransportError, TransportResponse};
    use crate::validator::ValidatedRequest;
    use async_trait::async_trait;

    struct Unreachable;

    #[async_trait]
    impl Transport for Unreachable {
        async fn send(&self, _request: &ValidatedRequest) -> Result<TransportResponse, TransportError> {
            Err(TransportError::new("Connection failed: no route to host"))
        }
    }

    #[tokio::test]
    async fn test_dispatch_command_produces_failed_envelope() {
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let in_flight = InFlight::new();

        let actor = NetworkActor::new(Arc::new(Unreachable), in_flight.clone(), resp_tx);
        let handle = tokio::spawn(actor.run(cmd_rx));

        let request = ValidatedRequest {
            method: HttpMethod::GET,
            url: "https://unreachable.invalid".to_string(),
            headers: Vec::new(),
            body: None,
        };
        cmd_tx.send(NetworkCommand::Dispatch { id: 7, request }).unwrap();

        let NetworkResponse::Completed { id, envelope, .. } = resp_rx.recv().await.unwrap();
        assert_eq!(id, 7);
        assert!(!envelope.success);
        assert_eq!(envelope.status, 500);
        assert!(!in_flight.is_set());

        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
        handle.await.unwrap();
    }
}
