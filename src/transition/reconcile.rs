//! Mount-time transition reconciliation against the previously mounted snapshot.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    foundation::ids::LayoutStateId,
    layout::node::ComponentInfo,
    state::layout_state::LayoutState,
    transition::{
        affinity::{AffinityGroup, AffinityRole, AnimatableItem},
        ids::TransitionId,
        model::{Transition, TransitionWithDependency},
    },
};

/// Receives transition-creation failures, scoped to the component hierarchy that raised them.
pub trait HierarchyErrorHandler {
    fn handle(&self, scope: &str, component: &ComponentInfo, error: anyhow::Error);
}

/// Logs failures and carries on.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingErrorHandler;

impl HierarchyErrorHandler for TracingErrorHandler {
    fn handle(&self, scope: &str, component: &ComponentInfo, error: anyhow::Error) {
        let message = format!("{error:#}");
        tracing::error!(
            scope,
            component = %component.name,
            global_key = %component.global_key,
            error = %message,
            "transition creation failed"
        );
    }
}

/// What reconciliation needs from the snapshot currently on screen.
#[derive(Clone, Debug, Default)]
pub struct MountedSnapshotData {
    pub layout_state_id: Option<LayoutStateId>,
    pub transitions_with_dependency: BTreeMap<String, TransitionWithDependency>,
    pub transition_id_mapping: BTreeMap<TransitionId, AffinityGroup<AnimatableItem>>,
}

impl MountedSnapshotData {
    pub fn from_layout_state(state: &LayoutState) -> Self {
        Self {
            layout_state_id: Some(state.id()),
            transitions_with_dependency: state
                .transition_data()
                .map(|d| d.transitions_with_dependency.clone())
                .unwrap_or_default(),
            transition_id_mapping: state.transition_id_mapping().clone(),
        }
    }

    pub fn transition_with_dependency(
        &self,
        identity_key: &str,
    ) -> Option<&TransitionWithDependency> {
        self.transitions_with_dependency.get(identity_key)
    }
}

/// Continuity of one role slot of a transition id between two snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdentityChange {
    /// Only in the new snapshot.
    New,
    /// Same role in both snapshots.
    Continuing,
    /// Only in the previous snapshot.
    Removed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionIdentityChange {
    pub id: TransitionId,
    pub role: AffinityRole,
    pub change: IdentityChange,
}

/// Classifies every (transition id, role) pair of both snapshots.
///
/// Slots are compared per role, so an item whose role changed shows up as `Removed` under the
/// old role and `New` under the new one. Output is sorted by id, then role.
pub fn diff_transition_ids(
    previous: &BTreeMap<TransitionId, AffinityGroup<AnimatableItem>>,
    current: &BTreeMap<TransitionId, AffinityGroup<AnimatableItem>>,
) -> Vec<TransitionIdentityChange> {
    let mut out = Vec::new();
    let ids = previous
        .keys()
        .chain(current.keys())
        .collect::<BTreeSet<_>>();
    for id in ids {
        let before = previous.get(id);
        let after = current.get(id);
        for role in AffinityRole::ALL {
            let change = match (
                before.and_then(|g| g.get(role)).is_some(),
                after.and_then(|g| g.get(role)).is_some(),
            ) {
                (true, true) => IdentityChange::Continuing,
                (false, true) => IdentityChange::New,
                (true, false) => IdentityChange::Removed,
                (false, false) => continue,
            };
            out.push(TransitionIdentityChange {
                id: id.clone(),
                role,
                change,
            });
        }
    }
    out
}

/// Result of [`collect_mount_time_transitions`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MountTimeTransitions {
    pub transitions: Vec<Transition>,
    pub identity_changes: Vec<TransitionIdentityChange>,
}

/// Builds the transitions to run when `state` is mounted over `mounted`.
///
/// Order: transitions created by components needing previous render data, then the pass's own
/// transitions, then `pending_state_updates` verbatim. When `mounted` is the snapshot `state` was
/// diffed against, the pass's optimistic transitions are reused as is; otherwise each
/// dependency-keyed transition is recreated from the mounted entry with the same key. Creation
/// failures go to `errors` and the failing component contributes nothing.
#[tracing::instrument(skip_all, fields(layout_state = %state.id()))]
pub fn collect_mount_time_transitions(
    state: &LayoutState,
    mounted: Option<&MountedSnapshotData>,
    pending_state_updates: &[Transition],
    errors: &dyn HierarchyErrorHandler,
) -> MountTimeTransitions {
    let mut transitions = Vec::new();

    for source in state.scoped_transition_sources() {
        match source.create_transition() {
            Ok(Some(t)) => transitions.push(t),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(component = %source.component.name, "scoped transition failed");
                errors.handle(&source.scope, &source.component, e);
            }
        }
    }

    if let Some(data) = state.transition_data().filter(|d| !d.is_empty()) {
        let mounted_id = mounted.and_then(|m| m.layout_state_id);
        if state.previous_layout_state_id() == mounted_id {
            tracing::debug!(
                count = data.optimistic_transitions.len(),
                "reusing optimistic transitions"
            );
            transitions.extend(data.optimistic_transitions.iter().cloned());
        } else {
            for twd in data.transitions_with_dependency.values() {
                let previous =
                    mounted.and_then(|m| m.transition_with_dependency(&twd.identity_key));
                match twd.create_transition(previous) {
                    Ok(Some(t)) => transitions.push(t),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!(key = %twd.identity_key, "dependency transition failed");
                        errors.handle(&twd.component.global_key, &twd.component, e);
                    }
                }
            }
        }
    }

    transitions.extend(pending_state_updates.iter().cloned());

    let empty = BTreeMap::new();
    let identity_changes = diff_transition_ids(
        mounted.map_or(&empty, |m| &m.transition_id_mapping),
        state.transition_id_mapping(),
    );
    MountTimeTransitions {
        transitions,
        identity_changes,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/reconcile.rs"]
mod tests;
