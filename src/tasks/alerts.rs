//! Alert Summary Poller
//!
//! Keeps the alert counters of one workshop fresh: fetches immediately,
//! then on every interval tick or explicit trigger, and publishes only
//! when the counters changed.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::models::AlertasResumen;
use crate::services::AlertService;

/// Handle to a running alert summary poller.
#[derive(Debug)]
pub struct AlertSummaryPoller {
    receiver: watch::Receiver<AlertasResumen>,
    refresh: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl AlertSummaryPoller {
    /// A receiver that wakes only when the summary changes.
    pub fn subscribe(&self) -> watch::Receiver<AlertasResumen> {
        self.receiver.clone()
    }

    /// Latest published summary.
    pub fn current(&self) -> AlertasResumen {
        *self.receiver.borrow()
    }

    /// Requests a refresh without waiting for the next tick.
    pub fn trigger(&self) {
        self.refresh.notify_one();
    }

    pub fn abort(&self) {
        self.handle.abort();
    }
}

impl Drop for AlertSummaryPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawns the poller for `taller_id`.
pub fn spawn_alert_summary_poller(
    service: AlertService,
    taller_id: u64,
    interval: Duration,
) -> AlertSummaryPoller {
    let (sender, receiver) = watch::channel(AlertasResumen::default());
    let refresh = Arc::new(Notify::new());
    let notified = refresh.clone();

    let handle = tokio::spawn(async move {
        info!(taller_id, "Starting alert summary poller");

        loop {
            let resumen = service.resumen(taller_id).await;
            let changed = sender.send_if_modified(|current| {
                if *current == resumen {
                    false
                } else {
                    *current = resumen;
                    true
                }
            });
            if changed {
                debug!(taller_id, ?resumen, "Alert summary changed");
            }

            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = notified.notified() => {
                    debug!(taller_id, "Alert summary refresh requested");
                }
            }
        }
    });

    AlertSummaryPoller {
        receiver,
        refresh,
        handle,
    }
}
