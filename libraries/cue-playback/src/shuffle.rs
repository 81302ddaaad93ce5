//! Shuffle projection over the master list
//!
//! The projection is a fresh Fisher-Yates permutation of the master list. It
//! is regenerated, never reused: turning shuffle off and on again yields a
//! new order.

use crate::catalogue::MasterList;
use crate::types::{TrackId, TrackRef};
use rand::seq::SliceRandom;
use rand::thread_rng;

/// Randomly permuted copy of a master list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffleProjection {
    order: Vec<TrackRef>,
}

impl ShuffleProjection {
    /// Generate a fresh permutation of `master`
    ///
    /// Each entry has equal probability of appearing at any position.
    pub fn generate(master: &MasterList) -> Self {
        let mut order = master.entries().to_vec();
        let mut rng = thread_rng();
        order.shuffle(&mut rng);
        Self { order }
    }

    /// Entries in traversal order
    pub fn entries(&self) -> &[TrackRef] {
        &self.order
    }

    /// Position of a track in traversal order
    pub fn position_of(&self, id: TrackId) -> Option<usize> {
        self.order.iter().position(|r| r.id == id)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the projection is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Index after `index` with wraparound
///
/// Returns `None` for an empty list.
pub fn next_index(index: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| (index + 1) % len)
}

/// Index before `index` with wraparound
///
/// Returns `None` for an empty list.
pub fn previous_index(index: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| (index % len + len - 1) % len)
}
