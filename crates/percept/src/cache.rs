//! Hand-off point between whoever computes a positioning and whoever displays it.

use std::sync::Arc;

use crate::PositioningResult;

/// A published result and the revision of the input it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub revision: u64,
    pub result: Arc<PositioningResult>,
}

/// Latest published [`PositioningResult`], last-write-wins by input revision.
///
/// Recomputations may finish out of order; a result computed from an older revision than the
/// one already stored is discarded instead of replacing it.
#[derive(Debug, Clone, Default)]
pub struct ResultCache {
    latest: Option<Snapshot>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `result` unless a newer revision is already present. Returns whether it was stored.
    pub fn publish(&mut self, revision: u64, result: PositioningResult) -> bool {
        if let Some(current) = &self.latest {
            if revision < current.revision {
                tracing::debug!(
                    revision,
                    current = current.revision,
                    "discarding stale positioning result"
                );
                return false;
            }
        }
        self.latest = Some(Snapshot {
            revision,
            result: Arc::new(result),
        });
        true
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.latest.as_ref()
    }

    pub fn result(&self) -> Option<Arc<PositioningResult>> {
        self.latest.as_ref().map(|s| Arc::clone(&s.result))
    }

    pub fn revision(&self) -> Option<u64> {
        self.latest.as_ref().map(|s| s.revision)
    }

    pub fn clear(&mut self) {
        self.latest = None;
    }
}
