//! Background expiry of stale typing entries.
//!
//! The sweeper owns one tokio task that ticks on a fixed interval and evicts
//! typing entries older than the configured TTL. Lifecycle:
//! `Running` -> `Stopping` (stop requested) -> `Stopped` (task exited, ticker
//! dropped). Stop requests are idempotent; dropping the sweeper also requests
//! a stop so the task never outlives its owner.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

use crate::store::PresenceStore;

/// Shortest sweep interval `spawn` accepts; smaller values are raised to it.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Sweep cadence and typing TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweeperConfig {
    pub interval: Duration,
    pub ttl: Duration,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            ttl: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweeperState {
    Running,
    Stopping,
    Stopped,
}

/// Handle to the running sweep task.
pub struct ExpirySweeper {
    stop_tx: watch::Sender<bool>,
    stopped: Arc<AtomicBool>,
    evicted: Arc<AtomicU64>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ExpirySweeper {
    /// Spawn the sweep loop on the current tokio runtime.
    ///
    /// `cfg.interval` below `MIN_INTERVAL` is clamped up to it.
    pub fn spawn(store: Arc<PresenceStore>, mut cfg: SweeperConfig) -> Self {
        cfg.interval = cfg.interval.max(MIN_INTERVAL);
        let (stop_tx, stop_rx) = watch::channel(false);
        let stopped = Arc::new(AtomicBool::new(false));
        let evicted = Arc::new(AtomicU64::new(0));

        let task = tokio::spawn(run(
            store,
            cfg,
            stop_rx,
            Arc::clone(&stopped),
            Arc::clone(&evicted),
        ));
        tracing::info!(
            interval_ms = cfg.interval.as_millis() as u64,
            ttl_ms = cfg.ttl.as_millis() as u64,
            "typing sweeper started"
        );

        Self {
            stop_tx,
            stopped,
            evicted,
            task: Mutex::new(Some(task)),
        }
    }

    pub fn state(&self) -> SweeperState {
        if self.stopped.load(Ordering::Acquire) {
            SweeperState::Stopped
        } else if *self.stop_tx.borrow() {
            SweeperState::Stopping
        } else {
            SweeperState::Running
        }
    }

    /// Typing entries evicted since the sweeper started.
    pub fn evicted_total(&self) -> u64 {
        self.evicted.load(Ordering::Relaxed)
    }

    /// Signal the loop to stop without waiting. Returns `true` only for the
    /// call that actually issued the signal.
    pub fn request_stop(&self) -> bool {
        !self.stop_tx.send_replace(true)
    }

    /// Signal the loop and wait until it has exited. Safe to call repeatedly.
    pub async fn stop(&self) {
        if self.request_stop() {
            tracing::info!("typing sweeper stopping");
        }

        let task = self.task.lock().take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "typing sweeper task ended abnormally");
            }
        }
    }
}

impl Drop for ExpirySweeper {
    fn drop(&mut self) {
        self.request_stop();
    }
}

/// Marks the sweeper `Stopped` when the loop exits, including by panic or abort.
struct StoppedOnDrop(Arc<AtomicBool>);

impl Drop for StoppedOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

async fn run(
    store: Arc<PresenceStore>,
    cfg: SweeperConfig,
    mut stop_rx: watch::Receiver<bool>,
    stopped: Arc<AtomicBool>,
    evicted_total: Arc<AtomicU64>,
) {
    let _stopped = StoppedOnDrop(stopped);
    let mut ticker = interval_at(Instant::now() + cfg.interval, cfg.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            changed = stop_rx.changed() => {
                // Err: every sender is gone, nobody can stop us any more.
                if changed.is_err() || *stop_rx.borrow() {
                    break;
                }
            }

            _ = ticker.tick() => {
                let evicted = store.sweep_typing(Instant::now(), cfg.ttl);
                if evicted > 0 {
                    evicted_total.fetch_add(evicted as u64, Ordering::Relaxed);
                    tracing::debug!(evicted, "expired typing entries");
                }
            }
        }
    }

    drop(ticker);
    tracing::info!("typing sweeper stopped");
}
