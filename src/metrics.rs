use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tracing::{Instrument, info_span};

const LOG_INTERVAL_SECS: u64 = 60;

/// Upstream call counters for one outbound client ("riot", "assistant").
#[derive(Debug)]
pub struct RequestMetrics {
    start: Instant,
    requests: AtomicU64,
    failures: AtomicU64,
    client: &'static str,
}

impl RequestMetrics {
    pub fn new(client: &'static str) -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            requests: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            client,
        })
    }

    pub fn inc(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// A call that reached a conclusion other than success or absence.
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Logs the running totals once a minute until the task is dropped.
    pub async fn log_loop(self: Arc<Self>) {
        let mut interval = tokio::time::interval(Duration::from_secs(LOG_INTERVAL_SECS));
        let span = info_span!("📊", client = self.client);

        async move {
            loop {
                interval.tick().await;
                let total = self.total();
                tracing::info!(
                    "{} upstream requests, {} failed (avg {:.2} req/min)",
                    total,
                    self.failures(),
                    per_minute(total, self.start.elapsed())
                );
            }
        }
        .instrument(span)
        .await
    }
}

fn per_minute(count: u64, elapsed: Duration) -> f64 {
    let minutes = elapsed.as_secs_f64() / 60.0;
    if minutes > 0.0 {
        count as f64 / minutes
    } else {
        0.0
    }
}
