//! Shared application state for the presence gateway.
//!
//! Owns the single `PresenceStore` for the process, its expiry sweeper, the
//! loaded config, and the metrics registry. Cloned into every handler.

use std::sync::Arc;

use presence_core::{ExpirySweeper, PresenceStore};

use crate::config::GatewayConfig;
use crate::obs::{MetricKind, PresenceMetrics};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    store: Arc<PresenceStore>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    sweeper: ExpirySweeper,
    metrics: PresenceMetrics,
}

impl AppState {
    /// Build the store and start its sweeper. Must run inside a tokio runtime.
    pub fn new(cfg: GatewayConfig) -> Self {
        let store = Arc::new(PresenceStore::new());
        let sweeper = ExpirySweeper::spawn(Arc::clone(&store), cfg.presence.sweeper());

        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                sweeper,
                metrics: PresenceMetrics::default(),
            }),
            store,
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> &PresenceStore {
        &self.store
    }

    pub fn sweeper(&self) -> &ExpirySweeper {
        &self.inner.sweeper
    }

    pub fn metrics(&self) -> &PresenceMetrics {
        &self.inner.metrics
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }

    /// Values read from live state at scrape time.
    pub fn metrics_extra(&self) -> Vec<(&'static str, MetricKind, u64)> {
        let snap = self.store.snapshot();
        vec![
            ("presence_online_users", MetricKind::Gauge, snap.online.len() as u64),
            ("presence_typing_users", MetricKind::Gauge, snap.typing.len() as u64),
            (
                "presence_sweep_evictions_total",
                MetricKind::Counter,
                self.inner.sweeper.evicted_total(),
            ),
        ]
    }

    /// Flip readiness to draining and stop the sweeper, waiting for it to exit.
    /// Called once the shutdown signal arrives, before the listener drains.
    pub async fn shutdown(&self) {
        self.inner.metrics.set_draining();
        self.inner.sweeper.stop().await;
    }
}
