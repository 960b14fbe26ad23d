use log::{debug, info};

/// Thin wrapper over the `log` facade so components carry one handle for
/// their diagnostics.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self, message: &str) {
        info!("{}", message);
    }

    /// Level-gated diagnostics, the replacement for the legacy viewer's
    /// console dumps. Record counts, never payload bodies.
    pub fn record_debug(&self, message: &str) {
        debug!("{}", message);
    }
}
