//! Working-range registrations collected during reduction and their dispatch.

use crate::{
    layout::node::ComponentInfo,
    range::status::{WorkingRangeListener, WorkingRangeStatus, WorkingRangeStatusHandler},
};

/// Index window reported by the scrolling container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VisibleWindow {
    pub first_visible: usize,
    pub last_visible: usize,
    pub first_fully_visible: usize,
    pub last_fully_visible: usize,
}

impl VisibleWindow {
    /// Window where every visible item is also fully visible.
    pub fn new(first_visible: usize, last_visible: usize) -> Self {
        Self {
            first_visible,
            last_visible,
            first_fully_visible: first_visible,
            last_fully_visible: last_visible,
        }
    }
}

/// Predicate deciding when a component enters or exits a working range.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkingRangeSpec {
    /// The owning item's position lies within the visible window widened by `offset`.
    Bounded { offset: usize },
    /// The visible window intersects `[first, last]`, independent of the item position.
    IndexWindow { first: usize, last: usize },
}

impl WorkingRangeSpec {
    pub fn is_in_range(&self, position: usize, window: &VisibleWindow) -> bool {
        match *self {
            Self::Bounded { offset } => {
                position >= window.first_visible.saturating_sub(offset)
                    && position <= window.last_visible.saturating_add(offset)
            }
            Self::IndexWindow { first, last } => {
                window.first_visible <= last && window.last_visible >= first
            }
        }
    }

    pub fn should_enter_range(&self, position: usize, window: &VisibleWindow) -> bool {
        self.is_in_range(position, window)
    }

    pub fn should_exit_range(&self, position: usize, window: &VisibleWindow) -> bool {
        !self.is_in_range(position, window)
    }
}

#[derive(Clone, Debug, PartialEq)]
struct RangeTuple {
    name: String,
    range: WorkingRangeSpec,
    components: Vec<ComponentInfo>,
}

/// Enter/exit callbacks fired by one dispatch call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub entered: usize,
    pub exited: usize,
}

/// Registrations grouped by range name and predicate, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkingRangeContainer {
    tuples: Vec<RangeTuple>,
}

impl WorkingRangeContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, range: WorkingRangeSpec, component: ComponentInfo) {
        match self
            .tuples
            .iter_mut()
            .find(|t| t.name == name && t.range == range)
        {
            Some(t) => t.components.push(component),
            None => self.tuples.push(RangeTuple {
                name: name.to_string(),
                range,
                components: vec![component],
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Number of (range, component) registrations.
    pub fn len(&self) -> usize {
        self.tuples.iter().map(|t| t.components.len()).sum()
    }

    pub fn registrations(&self) -> impl Iterator<Item = (&str, &WorkingRangeSpec, &ComponentInfo)> {
        self.tuples.iter().flat_map(|t| {
            t.components
                .iter()
                .map(move |c| (t.name.as_str(), &t.range, c))
        })
    }

    /// Fires enter for registrations that now match and are not entered, and exit for entered
    /// registrations that no longer match.
    ///
    /// Each registration is checked and marked under the status lock; callbacks fire after the
    /// lock is released, so `listener` may read or clear `status`.
    pub fn check_working_range_and_dispatch(
        &self,
        position: usize,
        window: &VisibleWindow,
        status: &WorkingRangeStatusHandler,
        listener: &dyn WorkingRangeListener,
    ) -> DispatchReport {
        let pending = status.transact(|table| {
            let mut pending = Vec::new();
            for t in &self.tuples {
                for c in &t.components {
                    let entered =
                        table.get(&t.name, &c.global_key) == WorkingRangeStatus::Entered;
                    if !entered && t.range.should_enter_range(position, window) {
                        table.set(&t.name, &c.global_key, WorkingRangeStatus::Entered);
                        pending.push((RangeEvent::Enter, t.name.as_str(), c));
                    } else if entered && t.range.should_exit_range(position, window) {
                        table.set(&t.name, &c.global_key, WorkingRangeStatus::Exited);
                        pending.push((RangeEvent::Exit, t.name.as_str(), c));
                    }
                }
            }
            pending
        });
        fire(pending, listener)
    }

    /// Fires exit for every registration still marked entered. Used on teardown.
    pub fn dispatch_on_exit_if_needed(
        &self,
        status: &WorkingRangeStatusHandler,
        listener: &dyn WorkingRangeListener,
    ) -> DispatchReport {
        let pending = status.transact(|table| {
            let mut pending = Vec::new();
            for t in &self.tuples {
                for c in &t.components {
                    if table.get(&t.name, &c.global_key) == WorkingRangeStatus::Entered {
                        table.set(&t.name, &c.global_key, WorkingRangeStatus::Exited);
                        pending.push((RangeEvent::Exit, t.name.as_str(), c));
                    }
                }
            }
            pending
        });
        fire(pending, listener)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RangeEvent {
    Enter,
    Exit,
}

fn fire(
    pending: Vec<(RangeEvent, &str, &ComponentInfo)>,
    listener: &dyn WorkingRangeListener,
) -> DispatchReport {
    let mut report = DispatchReport::default();
    for (event, name, c) in pending {
        match event {
            RangeEvent::Enter => {
                tracing::trace!(range = %name, component = %c.global_key, "enter");
                listener.on_entered_range(name, c);
                report.entered += 1;
            }
            RangeEvent::Exit => {
                tracing::trace!(range = %name, component = %c.global_key, "exit");
                listener.on_exited_range(name, c);
                report.exited += 1;
            }
        }
    }
    report
}

#[cfg(test)]
#[path = "../../tests/unit/range/working_range.rs"]
mod tests;
