use std::sync::Mutex;

/// Counters for the gateway's request handling.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    feeds: usize,
    lookups: usize,
    errors: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                feeds: 0,
                lookups: 0,
                errors: 0,
            }),
        }
    }

    pub fn record_feed(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.feeds += 1;
        }
    }

    pub fn record_lookup(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.lookups += 1;
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.errors += 1;
        }
    }

    /// (feeds served, lookups served, errors) snapshot.
    pub fn snapshot(&self) -> (usize, usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.feeds, metrics.lookups, metrics.errors)
        } else {
            (0, 0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
