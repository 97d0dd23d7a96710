//! Minimal metrics registry for the presence gateway.
//!
//! Counters and histograms keyed by sorted label vectors in a `DashMap`, so
//! rendering order is stable per label set. Histogram buckets are fixed in
//! microseconds to keep the hot path integer-only.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_str(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{k}=\"{}\"", escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} counter");
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{name}{{{}}} {val}", label_str(r.key()));
        }
    }
}

// 100us, 500us, 1ms, 5ms, 10ms, 50ms, 100ms
const BUCKETS_MICROS: [u64; 7] = [100, 500, 1_000, 5_000, 10_000, 50_000, 100_000];

#[derive(Default)]
struct AtomicHistogram {
    count: AtomicU64,
    sum: AtomicU64,
    buckets: [AtomicU64; BUCKETS_MICROS.len()],
}

#[derive(Default)]
pub struct HistogramVec {
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// Observe a duration into cumulative buckets (microsecond scale).
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let hist = self.map.entry(label_key(labels)).or_default();
        let micros = duration.as_micros() as u64;

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum.fetch_add(micros, Ordering::Relaxed);
        for (bucket, &le) in hist.buckets.iter().zip(BUCKETS_MICROS.iter()) {
            if micros <= le {
                bucket.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} histogram");
        for r in self.map.iter() {
            let labels = label_str(r.key());
            let hist = r.value();
            let prefix = if labels.is_empty() { String::new() } else { format!("{labels},") };

            for (bucket, le) in hist.buckets.iter().zip(BUCKETS_MICROS.iter()) {
                let n = bucket.load(Ordering::Relaxed);
                let _ = writeln!(out, "{name}_bucket{{{prefix}le=\"{le}\"}} {n}");
            }
            let count = hist.count.load(Ordering::Relaxed);
            let sum = hist.sum.load(Ordering::Relaxed);
            let _ = writeln!(out, "{name}_bucket{{{prefix}le=\"+Inf\"}} {count}");
            let _ = writeln!(out, "{name}_sum{{{labels}}} {sum}");
            let _ = writeln!(out, "{name}_count{{{labels}}} {count}");
        }
    }
}

/// Prometheus type of a value sampled at scrape time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
}

impl MetricKind {
    fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
        }
    }
}

#[derive(Default)]
pub struct PresenceMetrics {
    pub requests: CounterVec,
    pub bad_requests: CounterVec,
    pub request_duration: HistogramVec, // micros
    draining: AtomicBool,
}

impl PresenceMetrics {
    pub fn set_draining(&self) {
        self.draining.store(true, Ordering::Relaxed);
    }

    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::Relaxed)
    }

    /// Render all metrics plus caller-supplied values read from live state.
    pub fn render(&self, extra: &[(&str, MetricKind, u64)]) -> String {
        let mut out = String::new();
        self.requests.render("presence_requests_total", &mut out);
        self.bad_requests.render("presence_bad_requests_total", &mut out);
        self.request_duration
            .render("presence_request_duration_micros", &mut out);

        let _ = writeln!(
            out,
            "# TYPE presence_draining gauge\npresence_draining {}",
            u8::from(self.is_draining())
        );
        for (name, kind, v) in extra {
            let _ = writeln!(out, "# TYPE {name} {}\n{name} {v}", kind.as_str());
        }
        out
    }
}
