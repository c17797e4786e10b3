//! Reduced snapshot: a pending form writable by its owner, and the committed form.
//!
//! [`PendingLayoutState`] exposes the few fields that may still change before commit.
//! [`PendingLayoutState::commit`] consumes it and returns the immutable [`LayoutState`], which is
//! `Send + Sync` and read from any thread.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, OnceLock};

use crate::{
    foundation::{
        core::{MeasuredSize, Rect},
        ids::{LayoutStateId, RenderUnitId},
        measure::{SizeConstraints, SizeSpec},
    },
    layout::{
        node::ComponentInfo,
        request::{ReduceOpts, RenderSource},
    },
    range::{
        status::{WorkingRangeListener, WorkingRangeStatusHandler},
        working_range::{DispatchReport, VisibleWindow, WorkingRangeContainer},
    },
    reduce::output::{IncrementalMountOutput, RenderUnit, TestOutput, VisibilityOutput},
    state::render_tree::RenderTree,
    transition::{
        affinity::{AffinityGroup, AnimatableItem},
        ids::TransitionId,
        model::{RootBoundsTransition, ScopedTransitionSource, TransitionData},
    },
};

#[derive(Debug)]
pub(crate) struct LayoutStateData {
    pub(crate) id: LayoutStateId,
    pub(crate) previous_layout_state_id: Option<LayoutStateId>,
    pub(crate) component_tree_id: u32,
    pub(crate) root_component: ComponentInfo,
    pub(crate) source: RenderSource,
    pub(crate) size_constraints: SizeConstraints,
    pub(crate) measured: MeasuredSize,
    pub(crate) root_bounds: Rect,
    pub(crate) opts: ReduceOpts,

    pub(crate) units: Vec<RenderUnit>,
    pub(crate) incremental_outputs: Vec<IncrementalMountOutput>,
    pub(crate) id_to_position: Arc<HashMap<RenderUnitId, usize>>,
    pub(crate) by_top: Vec<usize>,
    pub(crate) by_bottom: Vec<usize>,
    pub(crate) has_excluded_units: bool,

    pub(crate) visibility_outputs: Vec<VisibilityOutput>,
    pub(crate) test_outputs: Vec<TestOutput>,

    pub(crate) animatable_items: HashMap<RenderUnitId, AnimatableItem>,
    pub(crate) transition_id_mapping: BTreeMap<TransitionId, AffinityGroup<AnimatableItem>>,
    pub(crate) root_transition_id: Option<TransitionId>,
    pub(crate) transition_data: Option<TransitionData>,
    pub(crate) scoped_transition_sources: Vec<ScopedTransitionSource>,

    pub(crate) working_ranges: WorkingRangeContainer,
    pub(crate) component_key_to_bounds: BTreeMap<String, Rect>,
    pub(crate) component_handle_to_bounds: BTreeMap<String, Rect>,
    pub(crate) units_hosting_render_trees: BTreeSet<RenderUnitId>,

    pub(crate) should_process_visibility_outputs: bool,
    pub(crate) root_width_animation: Option<RootBoundsTransition>,
    pub(crate) root_height_animation: Option<RootBoundsTransition>,
    pub(crate) needs_to_rerun_transitions: bool,
}

/// Snapshot between reduction and commit. Only its owner holds it.
#[derive(Debug)]
pub struct PendingLayoutState {
    data: LayoutStateData,
}

impl PendingLayoutState {
    pub(crate) fn new(data: LayoutStateData) -> Self {
        Self { data }
    }

    pub fn id(&self) -> LayoutStateId {
        self.data.id
    }

    pub fn is_committed(&self) -> bool {
        false
    }

    pub fn mountable_output_count(&self) -> usize {
        self.data.units.len()
    }

    pub fn set_should_process_visibility_outputs(&mut self, value: bool) {
        self.data.should_process_visibility_outputs = value;
    }

    /// Forces the mount of this snapshot to run transitions again, e.g. after a remount.
    pub fn set_needs_to_rerun_transitions(&mut self, value: bool) {
        self.data.needs_to_rerun_transitions = value;
    }

    /// Root width/height animations picked up by the first mount of this snapshot.
    pub fn set_initial_root_bounds_for_animation(
        &mut self,
        width: Option<RootBoundsTransition>,
        height: Option<RootBoundsTransition>,
    ) {
        self.data.root_width_animation = width;
        self.data.root_height_animation = height;
    }

    /// Freezes the snapshot.
    #[tracing::instrument(skip_all, fields(layout_state = %self.data.id))]
    pub fn commit(self) -> LayoutState {
        tracing::debug!("commit");
        LayoutState {
            data: self.data,
            render_tree: OnceLock::new(),
        }
    }
}

/// Committed, immutable snapshot.
#[derive(Debug)]
pub struct LayoutState {
    pub(crate) data: LayoutStateData,
    render_tree: OnceLock<Arc<RenderTree>>,
}

impl LayoutState {
    /// Committing a committed snapshot changes nothing.
    pub fn commit(self) -> Self {
        self
    }

    pub fn is_committed(&self) -> bool {
        true
    }

    pub fn id(&self) -> LayoutStateId {
        self.data.id
    }

    pub fn previous_layout_state_id(&self) -> Option<LayoutStateId> {
        self.data.previous_layout_state_id
    }

    pub fn component_tree_id(&self) -> u32 {
        self.data.component_tree_id
    }

    pub fn root_component(&self) -> &ComponentInfo {
        &self.data.root_component
    }

    pub fn root_name(&self) -> &str {
        &self.data.root_component.name
    }

    /// Whether the root component is the empty placeholder.
    pub fn is_empty(&self) -> bool {
        self.data.root_component.is_empty
    }

    pub fn render_source(&self) -> RenderSource {
        self.data.source
    }

    pub fn opts(&self) -> &ReduceOpts {
        &self.data.opts
    }

    pub fn width(&self) -> u32 {
        self.data.measured.width
    }

    pub fn height(&self) -> u32 {
        self.data.measured.height
    }

    pub fn measured(&self) -> MeasuredSize {
        self.data.measured
    }

    pub fn root_bounds(&self) -> Rect {
        self.data.root_bounds
    }

    pub fn size_constraints(&self) -> SizeConstraints {
        self.data.size_constraints
    }

    pub fn width_spec(&self) -> SizeSpec {
        self.data.size_constraints.width
    }

    pub fn height_spec(&self) -> SizeSpec {
        self.data.size_constraints.height
    }

    // Mount sequence.

    pub fn mountable_output_count(&self) -> usize {
        self.data.units.len()
    }

    /// # Panics
    /// If `index` is out of bounds.
    pub fn mountable_output_at(&self, index: usize) -> &RenderUnit {
        &self.data.units[index]
    }

    pub fn mountable_outputs(&self) -> &[RenderUnit] {
        &self.data.units
    }

    pub fn is_root_render_unit(&self, index: usize) -> bool {
        index == 0 && self.data.units.first().is_some_and(|u| u.id.is_root_host())
    }

    /// Position of `id` in the mount sequence.
    ///
    /// # Panics
    /// If `id` is not part of this snapshot.
    pub fn position_for_id(&self, id: RenderUnitId) -> usize {
        match self.try_position_for_id(id) {
            Some(p) => p,
            None => panic!(
                "render unit {id:?} not found in layout state {} ({} units)",
                self.data.id,
                self.data.units.len()
            ),
        }
    }

    pub fn try_position_for_id(&self, id: RenderUnitId) -> Option<usize> {
        self.data.id_to_position.get(&id).copied()
    }

    pub fn render_unit_ids_to_positions(&self) -> &HashMap<RenderUnitId, usize> {
        &self.data.id_to_position
    }

    // Visibility and end-to-end testing.

    pub fn visibility_output_count(&self) -> usize {
        self.data.visibility_outputs.len()
    }

    pub fn visibility_output_at(&self, index: usize) -> &VisibilityOutput {
        &self.data.visibility_outputs[index]
    }

    pub fn visibility_outputs(&self) -> &[VisibilityOutput] {
        &self.data.visibility_outputs
    }

    pub fn should_process_visibility_outputs(&self) -> bool {
        self.data.should_process_visibility_outputs
    }

    pub fn needs_to_rerun_transitions(&self) -> bool {
        self.data.needs_to_rerun_transitions
    }

    pub fn test_outputs(&self) -> &[TestOutput] {
        &self.data.test_outputs
    }

    // Transitions.

    pub fn transition_id_mapping(&self) -> &BTreeMap<TransitionId, AffinityGroup<AnimatableItem>> {
        &self.data.transition_id_mapping
    }

    pub fn animatable_items_for(&self, id: &TransitionId) -> Option<&AffinityGroup<AnimatableItem>> {
        self.data.transition_id_mapping.get(id)
    }

    pub fn animatable_item(&self, id: RenderUnitId) -> Option<&AnimatableItem> {
        self.data.animatable_items.get(&id)
    }

    pub fn animatable_root_item(&self) -> Option<&AnimatableItem> {
        self.data
            .units
            .first()
            .and_then(|root| self.data.animatable_items.get(&root.id))
    }

    pub fn root_transition_id(&self) -> Option<&TransitionId> {
        self.data.root_transition_id.as_ref()
    }

    pub fn transition_data(&self) -> Option<&TransitionData> {
        self.data.transition_data.as_ref()
    }

    pub fn scoped_transition_sources(&self) -> &[ScopedTransitionSource] {
        &self.data.scoped_transition_sources
    }

    pub fn root_width_animation(&self) -> Option<&RootBoundsTransition> {
        self.data.root_width_animation.as_ref()
    }

    pub fn root_height_animation(&self) -> Option<&RootBoundsTransition> {
        self.data.root_height_animation.as_ref()
    }

    // Component lookups.

    pub fn component_key_to_bounds(&self) -> &BTreeMap<String, Rect> {
        &self.data.component_key_to_bounds
    }

    pub fn component_handle_to_bounds(&self) -> &BTreeMap<String, Rect> {
        &self.data.component_handle_to_bounds
    }

    pub fn component_handles(&self) -> impl Iterator<Item = &str> {
        self.data.component_handle_to_bounds.keys().map(String::as_str)
    }

    pub fn render_unit_with_id_hosts_render_trees(&self, id: RenderUnitId) -> bool {
        self.data.units_hosting_render_trees.contains(&id)
    }

    // Compatibility.

    /// Whether this snapshot can be reused for a request of `width` x `height`.
    pub fn is_compatible_spec(&self, width: SizeSpec, height: SizeSpec) -> bool {
        self.data
            .size_constraints
            .is_compatible(self.data.measured, width, height)
    }

    pub fn is_compatible_size(&self, width: u32, height: u32) -> bool {
        self.data.measured == MeasuredSize::new(width, height)
    }

    pub fn is_for_component_id(&self, component_id: u32) -> bool {
        self.data.root_component.id == component_id
    }

    pub fn is_compatible_component_and_spec(
        &self,
        component_id: u32,
        width: SizeSpec,
        height: SizeSpec,
    ) -> bool {
        self.is_for_component_id(component_id) && self.is_compatible_spec(width, height)
    }

    // Working ranges.

    /// The registrations of this snapshot; `None` when no node declared a working range.
    pub fn working_range_container(&self) -> Option<&WorkingRangeContainer> {
        (!self.data.working_ranges.is_empty()).then_some(&self.data.working_ranges)
    }

    pub fn check_working_range_and_dispatch(
        &self,
        position: usize,
        window: &VisibleWindow,
        status: &WorkingRangeStatusHandler,
        listener: &dyn WorkingRangeListener,
    ) -> DispatchReport {
        self.working_range_container()
            .map(|c| c.check_working_range_and_dispatch(position, window, status, listener))
            .unwrap_or_default()
    }

    pub fn dispatch_on_exit_range_if_needed(
        &self,
        status: &WorkingRangeStatusHandler,
        listener: &dyn WorkingRangeListener,
    ) -> DispatchReport {
        self.working_range_container()
            .map(|c| c.dispatch_on_exit_if_needed(status, listener))
            .unwrap_or_default()
    }

    // Render tree.

    /// Derived render tree. Computed on first call; later calls return the same instance.
    pub fn render_tree(&self) -> Arc<RenderTree> {
        Arc::clone(
            self.render_tree
                .get_or_init(|| Arc::new(RenderTree::build(&self.data))),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/layout_state.rs"]
mod tests;
