// SPDX-License-Identifier: GPL-3.0-only

use std::collections::BTreeSet;

/// In-memory registry of volume names this manager created.
///
/// Backed by an ordered set, so snapshots come out sorted and deduplicated
/// by construction. The tracker itself is plain state; the facade serializes
/// access to it.
#[derive(Debug, Default)]
pub struct VolumeTracker {
    volumes: BTreeSet<String>,
}

impl VolumeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a volume as created. Returns `false` if it was already
    /// tracked.
    pub fn record(&mut self, name: impl Into<String>) -> bool {
        self.volumes.insert(name.into())
    }

    /// Drop a volume from the registry. Returns `false` if it was not
    /// tracked.
    pub fn forget(&mut self, name: &str) -> bool {
        self.volumes.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.volumes.contains(name)
    }

    /// Current volume names, sorted ascending.
    pub fn snapshot(&self) -> Vec<String> {
        self.volumes.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_is_sorted_and_deduplicated() {
        let mut tracker = VolumeTracker::new();
        assert!(tracker.record("Gamma"));
        assert!(tracker.record("Alpha"));
        assert!(!tracker.record("Gamma"));

        assert_eq!(tracker.snapshot(), vec!["Alpha", "Gamma"]);
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn forget_reports_whether_the_name_was_tracked() {
        let mut tracker = VolumeTracker::new();
        tracker.record("Scratch");

        assert!(tracker.forget("Scratch"));
        assert!(!tracker.forget("Scratch"));
        assert!(tracker.is_empty());
    }
}
