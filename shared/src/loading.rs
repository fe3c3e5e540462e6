//! Bookkeeping for asynchronous asset loads.

use std::collections::BTreeMap;

use bevy_ecs::resource::Resource;
use bevy_log::{debug, error};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AssetStatus {
    #[default]
    Pending,
    Ready,
    Failed(String),
}

impl AssetStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, AssetStatus::Pending)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, AssetStatus::Ready)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, AssetStatus::Failed(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadCounts {
    pub pending: usize,
    pub ready: usize,
    pub failed: usize,
}

impl LoadCounts {
    pub fn total(&self) -> usize {
        self.pending + self.ready + self.failed
    }
}

/// Status of every tracked asset, keyed by a human readable name.
///
/// Statuses only ever leave `Pending`; a settled asset stays settled.
#[derive(Resource, Debug, Default)]
pub struct LoadLedger {
    entries: BTreeMap<String, AssetStatus>,
}

impl LoadLedger {
    /// Start tracking `name`. Re-registering a known name keeps its status.
    pub fn register(&mut self, name: impl Into<String>) {
        self.entries.entry(name.into()).or_default();
    }

    pub fn status(&self, name: &str) -> Option<&AssetStatus> {
        self.entries.get(name)
    }

    /// Record a new status. Returns `true` if this call settled the asset.
    pub fn settle(&mut self, name: &str, status: AssetStatus) -> bool {
        let Some(current) = self.entries.get_mut(name) else {
            debug!("Ignoring status for untracked asset {}", name);
            return false;
        };
        if !current.is_pending() || status.is_pending() {
            return false;
        }
        if let AssetStatus::Failed(reason) = &status {
            error!("Asset {} failed to load: {}", name, reason);
        }
        *current = status;
        true
    }

    pub fn counts(&self) -> LoadCounts {
        let mut counts = LoadCounts::default();
        for status in self.entries.values() {
            match status {
                AssetStatus::Pending => counts.pending += 1,
                AssetStatus::Ready => counts.ready += 1,
                AssetStatus::Failed(_) => counts.failed += 1,
            }
        }
        counts
    }

    pub fn is_settled(&self) -> bool {
        self.counts().pending == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(name, status)| match status {
            AssetStatus::Failed(reason) => Some((name.as_str(), reason.as_str())),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entries_are_pending() {
        let mut ledger = LoadLedger::default();
        ledger.register("goat");
        assert_eq!(ledger.status("goat"), Some(&AssetStatus::Pending));
        assert!(!ledger.is_settled());
    }

    #[test]
    fn test_counts_track_settlements() {
        let mut ledger = LoadLedger::default();
        for name in ["goat", "log", "canyon"] {
            ledger.register(name);
        }
        assert!(ledger.settle("goat", AssetStatus::Ready));
        assert!(ledger.settle("log", AssetStatus::Failed("not found".into())));
        assert_eq!(
            ledger.counts(),
            LoadCounts {
                pending: 1,
                ready: 1,
                failed: 1
            }
        );
        assert_eq!(ledger.failures().collect::<Vec<_>>(), vec![("log", "not found")]);
    }

    #[test]
    fn test_settled_status_is_final() {
        let mut ledger = LoadLedger::default();
        ledger.register("goat");
        assert!(ledger.settle("goat", AssetStatus::Failed("bad gltf".into())));
        assert!(!ledger.settle("goat", AssetStatus::Ready));
        assert!(!ledger.settle("goat", AssetStatus::Pending));
        assert!(ledger.status("goat").unwrap().is_failed());
    }

    #[test]
    fn test_reregistering_keeps_status() {
        let mut ledger = LoadLedger::default();
        ledger.register("goat");
        ledger.settle("goat", AssetStatus::Ready);
        ledger.register("goat");
        assert!(ledger.status("goat").unwrap().is_ready());
        assert_eq!(ledger.counts().total(), 1);
    }

    #[test]
    fn test_untracked_names_are_ignored() {
        let mut ledger = LoadLedger::default();
        assert!(!ledger.settle("ghost", AssetStatus::Ready));
        assert_eq!(ledger.counts().total(), 0);
    }
}
