//! Bounded side-by-side comparison set.

use std::collections::VecDeque;

use tracing::debug;

use crate::domain::ConvenioId;

/// Maximum number of agreements that can be compared at once.
pub const COMPARADOR_CAPACITY: usize = 3;

/// Local selection of up to [`COMPARADOR_CAPACITY`] agreements.
///
/// Insertion order is kept explicitly: when a toggle would push the set past
/// capacity, the oldest member is evicted before the new id is added, so the
/// size never exceeds the capacity. Never persisted; the selection resets
/// when the session ends.
#[derive(Debug, Clone, Default)]
pub struct Comparador {
    ids: VecDeque<ConvenioId>,
}

impl Comparador {
    /// Create an empty comparison set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an agreement is currently selected for comparison.
    pub fn contains(&self, id: &ConvenioId) -> bool {
        self.ids.contains(id)
    }

    /// Toggle an agreement in or out of the comparison set.
    ///
    /// Present ids are removed. Absent ids are appended, evicting the
    /// oldest-inserted member first when the set is full. Purely local and
    /// synchronous; no remote call is ever made.
    pub fn toggle(&mut self, id: ConvenioId) {
        if let Some(pos) = self.ids.iter().position(|existing| existing == &id) {
            self.ids.remove(pos);
            return;
        }

        if self.ids.len() == COMPARADOR_CAPACITY {
            if let Some(evicted) = self.ids.pop_front() {
                debug!(evicted = %evicted, added = %id, "comparador full, evicting oldest");
            }
        }
        self.ids.push_back(id);
    }

    /// Selected ids, oldest insertion first.
    pub fn ids(&self) -> impl Iterator<Item = &ConvenioId> {
        self.ids.iter()
    }

    /// Number of selected agreements, always within `[0, COMPARADOR_CAPACITY]`.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
