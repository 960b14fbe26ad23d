use crate::catalog::{ApproachRecord, ObjectEnvelope, OrbitRecord};
use crate::prelude::CatalogResult;
use crate::telemetry::LogManager;

/// Status text shown for any failed fetch cycle, regardless of cause.
pub const FETCH_FAILURE_MESSAGE: &str = "Error occurred";

/// Token tying an in-flight fetch to the cycle that started it.
///
/// Completions carrying a ticket from a superseded cycle are discarded, so
/// a slow response for a previous selection can never overwrite the state
/// of a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// View state for the selected object's detail panel.
///
/// `approaches`/`orbits` are `None` until a cycle completes successfully;
/// an empty-but-present vector still renders its (empty) container, which
/// is why the two cases are kept distinct.
#[derive(Debug, Default)]
pub struct ObjectView {
    approaches: Option<Vec<ApproachRecord>>,
    orbits: Option<Vec<OrbitRecord>>,
    loading: bool,
    message: String,
    identifier: Option<String>,
    generation: u64,
    logger: LogManager,
}

impl ObjectView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch cycle for `selection`.
    ///
    /// An absent or empty selection starts nothing and leaves any stale data
    /// in place. Otherwise prior data is cleared, `loading` is raised, and
    /// the returned ticket must accompany the eventual completion.
    pub fn begin_fetch(&mut self, selection: Option<&str>) -> Option<FetchTicket> {
        let selection = selection?;
        if selection.is_empty() {
            return None;
        }
        self.loading = true;
        self.approaches = None;
        self.orbits = None;
        self.identifier = None;
        self.generation += 1;
        Some(FetchTicket {
            generation: self.generation,
        })
    }

    /// Finish the cycle identified by `ticket`.
    ///
    /// Returns false when the ticket is stale and the completion was
    /// discarded. A current ticket always lowers `loading`; the outcome
    /// either populates the detail state or sets the generic failure
    /// message while the detail stays empty.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        outcome: CatalogResult<ObjectEnvelope>,
    ) -> bool {
        if ticket.generation != self.generation {
            self.logger.record_debug(&format!(
                "discarding stale completion for cycle {}",
                ticket.generation
            ));
            return false;
        }

        match outcome.and_then(|envelope| {
            let detail = envelope.decode()?;
            Ok((detail, envelope.message, envelope.identifier))
        }) {
            Ok((detail, message, identifier)) => {
                self.logger.record_debug(&format!(
                    "object {}: {} approaches, {} orbital solutions",
                    identifier,
                    detail.sorted_approaches.len(),
                    detail.orbital_data.len()
                ));
                self.approaches = Some(detail.sorted_approaches);
                self.orbits = Some(detail.orbital_data);
                self.message = message;
                self.identifier = Some(identifier);
            }
            Err(err) => {
                self.logger.record_debug(&format!("fetch cycle failed: {err}"));
                self.message = FETCH_FAILURE_MESSAGE.to_string();
            }
        }
        self.loading = false;
        true
    }

    /// Whether the detail panel has anything to render. True as soon as a
    /// cycle succeeded, even when both sequences are empty.
    pub fn has_data(&self) -> bool {
        self.approaches.is_some()
    }

    pub fn approaches(&self) -> &[ApproachRecord] {
        self.approaches.as_deref().unwrap_or_default()
    }

    pub fn orbits(&self) -> &[OrbitRecord] {
        self.orbits.as_deref().unwrap_or_default()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }
}
