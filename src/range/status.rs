//! Dispatch state for working ranges, owned outside any single snapshot.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::layout::node::ComponentInfo;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WorkingRangeStatus {
    #[default]
    Initial,
    Entered,
    Exited,
}

/// Receives enter/exit notifications.
pub trait WorkingRangeListener {
    fn on_entered_range(&self, name: &str, component: &ComponentInfo);
    fn on_exited_range(&self, name: &str, component: &ComponentInfo);
}

/// Status per (range name, component global key).
#[derive(Debug, Default)]
pub(crate) struct StatusTable {
    entries: HashMap<(String, String), WorkingRangeStatus>,
}

impl StatusTable {
    pub(crate) fn get(&self, name: &str, global_key: &str) -> WorkingRangeStatus {
        self.entries
            .get(&(name.to_string(), global_key.to_string()))
            .copied()
            .unwrap_or_default()
    }

    pub(crate) fn set(&mut self, name: &str, global_key: &str, status: WorkingRangeStatus) {
        self.entries
            .insert((name.to_string(), global_key.to_string()), status);
    }
}

/// Longer-lived store deduplicating enter/exit across snapshots of the same tree.
///
/// Shareable between threads; every check-fire-mark sequence runs under one lock.
#[derive(Debug, Default)]
pub struct WorkingRangeStatusHandler {
    table: Mutex<StatusTable>,
}

impl WorkingRangeStatusHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, name: &str, global_key: &str) -> WorkingRangeStatus {
        self.table.lock().get(name, global_key)
    }

    pub fn is_in_range(&self, name: &str, global_key: &str) -> bool {
        self.status(name, global_key) == WorkingRangeStatus::Entered
    }

    pub fn set_entered_range_status(&self, name: &str, global_key: &str) {
        self.table
            .lock()
            .set(name, global_key, WorkingRangeStatus::Entered);
    }

    pub fn set_exited_range_status(&self, name: &str, global_key: &str) {
        self.table
            .lock()
            .set(name, global_key, WorkingRangeStatus::Exited);
    }

    /// Forgets every range status of one component.
    pub fn clear_state_for(&self, global_key: &str) {
        self.table
            .lock()
            .entries
            .retain(|(_, key), _| key != global_key);
    }

    pub fn clear(&self) {
        self.table.lock().entries.clear();
    }

    pub(crate) fn transact<R>(&self, f: impl FnOnce(&mut StatusTable) -> R) -> R {
        let mut table = self.table.lock();
        f(&mut table)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/range/status.rs"]
mod tests;
