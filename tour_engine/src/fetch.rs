//! Request-token discipline for boundary fetches. Content loads are the
//! only asynchrony around the engine; a token issued per target slot lets
//! a completion that lost the race be discarded instead of clobbering
//! fresher data, replacing any last-write-wins behavior.

use std::collections::BTreeMap;

use tour_content::{LayerId, ProjectId};

/// Identifies one outstanding fetch. Tokens increase monotonically across
/// the whole tracker, so a later `begin` always outranks an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// The slots a navigation target can be waiting on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FetchSlot {
    SceneGraph(ProjectId),
    Layer(LayerId),
}

/// Newest token issued per slot. Superseded results are ignored, not
/// aborted; transport-level cancellation stays optional.
#[derive(Debug, Default)]
pub struct FetchTracker {
    latest: BTreeMap<FetchSlot, u64>,
    counter: u64,
}

impl FetchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, slot: FetchSlot) -> RequestToken {
        self.counter += 1;
        self.latest.insert(slot, self.counter);
        RequestToken(self.counter)
    }

    pub fn is_current(&self, slot: &FetchSlot, token: RequestToken) -> bool {
        self.latest.get(slot).copied() == Some(token.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_request_supersedes_the_older_one() {
        let mut tracker = FetchTracker::new();
        let slot = FetchSlot::SceneGraph(ProjectId::new("p2"));

        let a = tracker.begin(slot.clone());
        let b = tracker.begin(slot.clone());

        // B resolves first and wins; A resolving later changes nothing.
        assert!(tracker.is_current(&slot, b));
        assert!(!tracker.is_current(&slot, a));
    }

    #[test]
    fn slots_are_tracked_independently() {
        let mut tracker = FetchTracker::new();
        let graphs = FetchSlot::SceneGraph(ProjectId::new("p1"));
        let layers = FetchSlot::Layer(LayerId(2));

        let g = tracker.begin(graphs.clone());
        let l = tracker.begin(layers.clone());

        assert!(tracker.is_current(&graphs, g));
        assert!(tracker.is_current(&layers, l));
    }
}
