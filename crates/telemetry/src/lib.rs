//! Logging and search metrics for fuzzyrank tools
//!
//! This crate provides:
//! - Structured logging with tracing
//! - Search counters and latency histograms
//! - Timers that record into the metrics registry

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Latency samples kept per registry; older samples are evicted first
pub const MAX_LATENCY_SAMPLES: usize = 1024;

/// Global search metrics
static METRICS: Lazy<SearchMetrics> = Lazy::new(SearchMetrics::new);

/// Initialize logging with default settings
pub fn init() -> anyhow::Result<()> {
    init_with_config(&TelemetryConfig::default())
}

/// Initialize logging with custom configuration
///
/// `RUST_LOG` takes precedence over `config.log_level` when set.
pub fn init_with_config(config: &TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry
            .with(fmt::layer().json().with_target(config.show_target).with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().compact().with_target(config.show_target).with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Telemetry initialized");

    Ok(())
}

/// Telemetry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Log filter directive, e.g. `info` or `fuzzyrank_search=debug`
    pub log_level: String,
    /// Emit JSON lines instead of compact text
    pub json: bool,
    /// Include the event target in output
    pub show_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json: false,
            show_target: false,
        }
    }
}

/// Counters and latency samples for search passes
///
/// Counters cover the whole process lifetime. Latency statistics cover the
/// most recent [`MAX_LATENCY_SAMPLES`] samples.
pub struct SearchMetrics {
    searches: AtomicU64,
    empty_queries: AtomicU64,
    candidates: AtomicU64,
    matches: AtomicU64,
    latencies_ms: Mutex<VecDeque<f64>>,
    start_time: Instant,
}

impl SearchMetrics {
    fn new() -> Self {
        Self {
            searches: AtomicU64::new(0),
            empty_queries: AtomicU64::new(0),
            candidates: AtomicU64::new(0),
            matches: AtomicU64::new(0),
            latencies_ms: Mutex::new(VecDeque::with_capacity(MAX_LATENCY_SAMPLES)),
            start_time: Instant::now(),
        }
    }

    /// Record one search pass
    ///
    /// Takes plain counts so callers decide what a pass is.
    pub fn record_search(&self, candidates: usize, matches: usize, empty_query: bool) {
        self.searches.fetch_add(1, Ordering::Relaxed);
        self.candidates.fetch_add(candidates as u64, Ordering::Relaxed);
        self.matches.fetch_add(matches as u64, Ordering::Relaxed);
        if empty_query {
            self.empty_queries.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a latency sample in milliseconds
    pub fn record_latency(&self, millis: f64) {
        if let Ok(mut samples) = self.latencies_ms.lock() {
            if samples.len() == MAX_LATENCY_SAMPLES {
                samples.pop_front();
            }
            samples.push_back(millis);
        }
    }

    /// Snapshot of the current counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        let latency = self
            .latencies_ms
            .lock()
            .map(|mut samples| LatencyStats::from_values(samples.make_contiguous()))
            .unwrap_or_default();

        MetricsSnapshot {
            uptime_secs: self.start_time.elapsed().as_secs(),
            searches: self.searches.load(Ordering::Relaxed),
            empty_queries: self.empty_queries.load(Ordering::Relaxed),
            candidates: self.candidates.load(Ordering::Relaxed),
            matches: self.matches.load(Ordering::Relaxed),
            latency_ms: latency,
        }
    }

    /// Export metrics as JSON
    pub fn export_json(&self) -> serde_json::Value {
        serde_json::to_value(self.snapshot()).unwrap_or(serde_json::Value::Null)
    }
}

/// Point-in-time view of [`SearchMetrics`]
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub uptime_secs: u64,
    pub searches: u64,
    pub empty_queries: u64,
    pub candidates: u64,
    pub matches: u64,
    pub latency_ms: LatencyStats,
}

impl MetricsSnapshot {
    /// Fraction of candidates that matched, 0 when nothing was searched
    pub fn match_rate(&self) -> f64 {
        if self.candidates == 0 {
            0.0
        } else {
            self.matches as f64 / self.candidates as f64
        }
    }
}

/// Latency statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LatencyStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
}

impl LatencyStats {
    fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let sum: f64 = sorted.iter().sum();

        Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean: sum / count as f64,
            p50: percentile(&sorted, 50.0),
            p95: percentile(&sorted, 95.0),
            p99: percentile(&sorted, 99.0),
        }
    }
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((p / 100.0) * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// Get the global metrics registry
pub fn metrics() -> &'static SearchMetrics {
    &METRICS
}

/// Timer for measuring a search pass
///
/// Records into [`metrics`] once, on [`Timer::stop`] or on drop.
pub struct Timer {
    name: &'static str,
    start: Instant,
    recorded: bool,
}

impl Timer {
    /// Start a new timer
    pub fn start(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
            recorded: false,
        }
    }

    /// Stop the timer and record the duration
    pub fn stop(mut self) -> Duration {
        self.record()
    }

    fn record(&mut self) -> Duration {
        let duration = self.start.elapsed();
        if !self.recorded {
            self.recorded = true;
            metrics().record_latency(duration.as_secs_f64() * 1000.0);
            tracing::debug!(
                timer = self.name,
                duration_ms = duration.as_millis() as u64,
                "Timer completed"
            );
        }
        duration
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.record();
    }
}
