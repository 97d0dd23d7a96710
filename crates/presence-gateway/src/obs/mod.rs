//! Lightweight in-process metrics.
//!
//! Request counters and latency histograms are kept as atomics and rendered
//! by the `/metrics` handler in Prometheus text format.

pub mod metrics;

pub use metrics::{MetricKind, PresenceMetrics};
