//! Observability (metrics, tracing)

use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Counters for conversions performed by this process
#[derive(Debug, Default)]
pub struct Metrics {
    conversions_started: AtomicU64,
    conversions_succeeded: AtomicU64,
    conversions_failed: AtomicU64,
    validation_rejected: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversion_started(&self) {
        self.conversions_started.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "conversions_started", "Metric incremented");
    }

    pub fn conversion_succeeded(&self) {
        self.conversions_succeeded.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "conversions_succeeded", "Metric incremented");
    }

    pub fn conversion_failed(&self) {
        self.conversions_failed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "conversions_failed", "Metric incremented");
    }

    pub fn validation_rejected(&self) {
        self.validation_rejected.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "validation_rejected", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            conversions_started: self.conversions_started.load(Ordering::Relaxed),
            conversions_succeeded: self.conversions_succeeded.load(Ordering::Relaxed),
            conversions_failed: self.conversions_failed.load(Ordering::Relaxed),
            validation_rejected: self.validation_rejected.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub conversions_started: u64,
    pub conversions_succeeded: u64,
    pub conversions_failed: u64,
    pub validation_rejected: u64,
}

/// Install the global subscriber, honouring `RUST_LOG` (default `info`)
///
/// Logs go to stderr so downloaded bytes piped to stdout stay clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
