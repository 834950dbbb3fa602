//! Hand-off of snapshots from a simulation thread to readers.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;

use crate::game::snapshot::Snapshot;

/// A double buffer: the simulation writes the back slot and then flips it to the front,
/// so readers always see a complete tick.
#[derive(Debug, Default)]
pub struct SnapshotBuffer {
    slots: [RwLock<Option<Snapshot>>; 2],
    front: AtomicUsize,
}

impl SnapshotBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a new snapshot, replacing the one readers currently see.
    pub fn publish(&self, snapshot: Snapshot) {
        let back = 1 - self.front.load(Ordering::Acquire);
        *self.slots[back].write() = Some(snapshot);
        self.front.store(back, Ordering::Release);
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> Option<Snapshot> {
        self.slots[self.front.load(Ordering::Acquire)].read().clone()
    }

    /// Runs `f` on the most recent snapshot without cloning it.
    pub fn with_latest<R>(&self, f: impl FnOnce(Option<&Snapshot>) -> R) -> R {
        let guard = self.slots[self.front.load(Ordering::Acquire)].read();
        f(guard.as_ref())
    }
}
