//! Transition descriptors handed over by component resolution.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::{layout::node::ComponentInfo, transition::ids::TransitionId};

/// Property animated by a transition.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AnimatedProperty {
    X,
    Y,
    Width,
    Height,
    Alpha,
    Scale,
    Rotation,
}

/// Which items a transition applies to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionTarget {
    Id(TransitionId),
    AllGlobal,
    Auto,
}

/// An animation request: target, properties and timing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transition {
    pub target: TransitionTarget,
    pub properties: SmallVec<[AnimatedProperty; 4]>,
    pub duration_ms: u32,
    /// Start value for appearing items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appear_from: Option<f64>,
    /// End value for disappearing items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disappear_to: Option<f64>,
}

impl Transition {
    pub fn new(target: TransitionTarget, properties: &[AnimatedProperty], duration_ms: u32) -> Self {
        Self {
            target,
            properties: properties.iter().copied().collect(),
            duration_ms,
            appear_from: None,
            disappear_to: None,
        }
    }

    pub fn for_id(id: TransitionId, properties: &[AnimatedProperty], duration_ms: u32) -> Self {
        Self::new(TransitionTarget::Id(id), properties, duration_ms)
    }

    pub fn appearing_from(mut self, v: f64) -> Self {
        self.appear_from = Some(v);
        self
    }

    pub fn disappearing_to(mut self, v: f64) -> Self {
        self.disappear_to = Some(v);
        self
    }
}

/// Root width or height animation configured before mount.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RootBoundsTransition {
    pub property: AnimatedProperty,
    pub transition: Option<Transition>,
    pub appear_from: Option<f64>,
}

/// Builds a transition from the dependency values of this pass and the previously mounted one.
///
/// `previous_deps` is `None` when the previously mounted snapshot has no entry for the
/// identity key.
pub trait DependencyTransitionCreator: Send + Sync {
    fn create(
        &self,
        previous_deps: Option<&serde_json::Value>,
        deps: &serde_json::Value,
    ) -> anyhow::Result<Option<Transition>>;
}

impl<F> DependencyTransitionCreator for F
where
    F: Fn(Option<&serde_json::Value>, &serde_json::Value) -> anyhow::Result<Option<Transition>>
        + Send
        + Sync,
{
    fn create(
        &self,
        previous_deps: Option<&serde_json::Value>,
        deps: &serde_json::Value,
    ) -> anyhow::Result<Option<Transition>> {
        self(previous_deps, deps)
    }
}

/// A transition whose creation depends on values carried over from the mounted snapshot.
#[derive(Clone)]
pub struct TransitionWithDependency {
    pub identity_key: String,
    pub component: ComponentInfo,
    pub deps: serde_json::Value,
    creator: Arc<dyn DependencyTransitionCreator>,
}

impl TransitionWithDependency {
    pub fn new(
        identity_key: impl Into<String>,
        component: ComponentInfo,
        deps: serde_json::Value,
        creator: impl DependencyTransitionCreator + 'static,
    ) -> Self {
        Self {
            identity_key: identity_key.into(),
            component,
            deps,
            creator: Arc::new(creator),
        }
    }

    pub fn create_transition(
        &self,
        previous: Option<&TransitionWithDependency>,
    ) -> anyhow::Result<Option<Transition>> {
        self.creator
            .create(previous.map(|p| &p.deps), &self.deps)
    }
}

impl fmt::Debug for TransitionWithDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionWithDependency")
            .field("identity_key", &self.identity_key)
            .field("component", &self.component.name)
            .field("deps", &self.deps)
            .finish_non_exhaustive()
    }
}

/// Transitions collected while resolving components for one pass.
#[derive(Clone, Debug, Default)]
pub struct TransitionData {
    /// Every transition declared in this pass.
    pub transitions: Vec<Transition>,
    /// Transitions computed assuming the diffed-against snapshot is the one mounted.
    pub optimistic_transitions: Vec<Transition>,
    pub transitions_with_dependency: BTreeMap<String, TransitionWithDependency>,
}

impl TransitionData {
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
            && self.optimistic_transitions.is_empty()
            && self.transitions_with_dependency.is_empty()
    }

    pub fn add_transition(&mut self, t: Transition) {
        self.transitions.push(t);
    }

    pub fn add_optimistic(&mut self, t: Transition) {
        self.transitions.push(t.clone());
        self.optimistic_transitions.push(t);
    }

    pub fn add_with_dependency(&mut self, twd: TransitionWithDependency) {
        self.transitions_with_dependency
            .insert(twd.identity_key.clone(), twd);
    }
}

/// Component-level transition creation run at mount time.
pub trait ComponentTransitionCreator: Send + Sync {
    fn create_transition(&self, component: &ComponentInfo) -> anyhow::Result<Option<Transition>>;
}

impl<F> ComponentTransitionCreator for F
where
    F: Fn(&ComponentInfo) -> anyhow::Result<Option<Transition>> + Send + Sync,
{
    fn create_transition(&self, component: &ComponentInfo) -> anyhow::Result<Option<Transition>> {
        self(component)
    }
}

/// A component that needs previous render data to create its mount-time transition.
#[derive(Clone)]
pub struct ScopedTransitionSource {
    /// Hierarchy scope used when routing errors, usually the owner's global key.
    pub scope: String,
    pub component: ComponentInfo,
    creator: Arc<dyn ComponentTransitionCreator>,
}

impl ScopedTransitionSource {
    pub fn new(
        scope: impl Into<String>,
        component: ComponentInfo,
        creator: impl ComponentTransitionCreator + 'static,
    ) -> Self {
        Self {
            scope: scope.into(),
            component,
            creator: Arc::new(creator),
        }
    }

    pub fn create_transition(&self) -> anyhow::Result<Option<Transition>> {
        self.creator.create_transition(&self.component)
    }
}

impl fmt::Debug for ScopedTransitionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedTransitionSource")
            .field("scope", &self.scope)
            .field("component", &self.component.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/model.rs"]
mod tests;
