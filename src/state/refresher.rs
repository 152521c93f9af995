use crate::state::messages::NetworkRequest;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Re-probes backend health every 30 seconds for the connection indicator.
pub struct HealthRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
}

impl HealthRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>) -> Self {
        Self { network_requests }
    }

    pub async fn run(self) {
        let mut health_interval = interval(Duration::from_secs(30));
        // Skip the immediate first tick; startup already checks once.
        health_interval.tick().await;

        loop {
            health_interval.tick().await;
            if self
                .network_requests
                .send(NetworkRequest::CheckHealth)
                .await
                .is_err()
            {
                break;
            }
        }
    }
}
