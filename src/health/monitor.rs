//! Periodic health monitoring.
//!
//! Probe cadence is a deployment policy: the checker stays callable on
//! demand, and this monitor drives it on a timer when enabled.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

use crate::config::HealthCheckConfig;
use crate::health::checker::HealthChecker;
use crate::registry::ServerRegistry;

pub struct HealthMonitor {
    registry: Arc<ServerRegistry>,
    checker: HealthChecker,
    interval: Duration,
}

impl HealthMonitor {
    pub fn new(registry: Arc<ServerRegistry>, config: HealthCheckConfig) -> Self {
        let interval = Duration::from_secs(config.interval_secs);
        Self {
            registry,
            checker: HealthChecker::new(config),
            interval,
        }
    }

    /// Probe every registered backend on each tick until shutdown.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            backends = self.registry.len(),
            "Health monitor starting"
        );

        let mut ticker = time::interval(self.interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.check_all().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("Health monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    async fn check_all(&self) {
        for server in self.registry.servers() {
            self.checker.check(server).await;
        }
    }
}
