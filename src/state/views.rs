//! Narrow read-only views of a committed snapshot, one per consumer.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    foundation::{core::Rect, ids::RenderUnitId},
    reduce::output::{IncrementalMountOutput, RenderUnit, TestOutput, VisibilityOutput},
    state::layout_state::LayoutState,
    transition::{
        affinity::{AffinityGroup, AnimatableItem},
        ids::TransitionId,
        model::{RootBoundsTransition, Transition},
    },
};

impl LayoutState {
    pub fn incremental_mount_view(&self) -> IncrementalMountView<'_> {
        IncrementalMountView { state: self }
    }

    pub fn visibility_view(&self) -> VisibilityView<'_> {
        VisibilityView { state: self }
    }

    pub fn transition_view(&self) -> TransitionView<'_> {
        TransitionView { state: self }
    }

    pub fn test_output_view(&self) -> TestOutputView<'_> {
        TestOutputView { state: self }
    }
}

/// What incremental mount reads: sweep orders, outputs by id and the exclusion flag.
#[derive(Clone, Copy, Debug)]
pub struct IncrementalMountView<'a> {
    state: &'a LayoutState,
}

impl<'a> IncrementalMountView<'a> {
    pub fn output_count(&self) -> usize {
        self.state.data.incremental_outputs.len()
    }

    pub fn outputs_ordered_by_top_bounds(
        &self,
    ) -> impl Iterator<Item = &'a IncrementalMountOutput> + use<'a> {
        let data = &self.state.data;
        data.by_top.iter().map(|&i| &data.incremental_outputs[i])
    }

    pub fn outputs_ordered_by_bottom_bounds(
        &self,
    ) -> impl Iterator<Item = &'a IncrementalMountOutput> + use<'a> {
        let data = &self.state.data;
        data.by_bottom.iter().map(|&i| &data.incremental_outputs[i])
    }

    pub fn incremental_output_for_id(&self, id: RenderUnitId) -> Option<&'a IncrementalMountOutput> {
        self.state
            .try_position_for_id(id)
            .map(|p| &self.state.data.incremental_outputs[p])
    }

    pub fn render_unit_for(&self, output: &IncrementalMountOutput) -> &'a RenderUnit {
        self.state.mountable_output_at(output.index)
    }

    /// At least one unit must be mounted regardless of the visible rect.
    pub fn has_excluded_units(&self) -> bool {
        self.state.data.has_excluded_units
    }

    pub fn width(&self) -> u32 {
        self.state.width()
    }

    pub fn height(&self) -> u32 {
        self.state.height()
    }

    /// Mount-sequence positions to mount for `visible`, in mount order.
    ///
    /// Includes every unit overlapping `visible`, every excluded unit, and the hosts enclosing
    /// them.
    pub fn mount_candidates(&self, visible: Rect) -> Vec<usize> {
        let data = &self.state.data;
        let mut picked = BTreeSet::new();
        for output in self.outputs_ordered_by_top_bounds() {
            if output.top() >= visible.y1 {
                break;
            }
            let b = output.bounds;
            if b.y1 > visible.y0 && b.x0 < visible.x1 && b.x1 > visible.x0 {
                picked.insert(output.index);
            }
        }
        if data.has_excluded_units {
            picked.extend(
                data.incremental_outputs
                    .iter()
                    .filter(|o| o.excluded)
                    .map(|o| o.index),
            );
        }

        let mut with_hosts = BTreeSet::new();
        for index in picked {
            let mut cursor = Some(index);
            while let Some(i) = cursor {
                if !with_hosts.insert(i) {
                    break;
                }
                cursor = data.units[i].parent;
            }
        }
        with_hosts.into_iter().collect()
    }
}

/// What visibility tracking reads.
#[derive(Clone, Copy, Debug)]
pub struct VisibilityView<'a> {
    state: &'a LayoutState,
}

impl<'a> VisibilityView<'a> {
    pub fn visibility_output_count(&self) -> usize {
        self.state.visibility_output_count()
    }

    pub fn visibility_output_at(&self, index: usize) -> &'a VisibilityOutput {
        self.state.visibility_output_at(index)
    }

    pub fn visibility_outputs(&self) -> &'a [VisibilityOutput] {
        self.state.visibility_outputs()
    }

    pub fn should_process_visibility_outputs(&self) -> bool {
        self.state.should_process_visibility_outputs()
    }
}

/// What the animation subsystem reads.
#[derive(Clone, Copy, Debug)]
pub struct TransitionView<'a> {
    state: &'a LayoutState,
}

impl<'a> TransitionView<'a> {
    pub fn transition_id_mapping(&self) -> &'a BTreeMap<TransitionId, AffinityGroup<AnimatableItem>> {
        self.state.transition_id_mapping()
    }

    pub fn animatable_items_for(&self, id: &TransitionId) -> Option<&'a AffinityGroup<AnimatableItem>> {
        self.state.animatable_items_for(id)
    }

    pub fn animatable_item(&self, id: RenderUnitId) -> Option<&'a AnimatableItem> {
        self.state.animatable_item(id)
    }

    pub fn animatable_root_item(&self) -> Option<&'a AnimatableItem> {
        self.state.animatable_root_item()
    }

    pub fn root_transition_id(&self) -> Option<&'a TransitionId> {
        self.state.root_transition_id()
    }

    /// Every transition declared in the pass that produced this snapshot.
    pub fn transitions(&self) -> &'a [Transition] {
        self.state
            .transition_data()
            .map(|d| d.transitions.as_slice())
            .unwrap_or_default()
    }

    pub fn root_width_animation(&self) -> Option<&'a RootBoundsTransition> {
        self.state.root_width_animation()
    }

    pub fn root_height_animation(&self) -> Option<&'a RootBoundsTransition> {
        self.state.root_height_animation()
    }

    /// True when the snapshot was flagged to rerun transitions or has any to run.
    pub fn needs_to_run_transitions(&self) -> bool {
        self.state.needs_to_rerun_transitions()
            || !self.state.transition_id_mapping().is_empty()
            || self.root_width_animation().is_some()
            || self.root_height_animation().is_some()
    }
}

/// What end-to-end tests read.
#[derive(Clone, Copy, Debug)]
pub struct TestOutputView<'a> {
    state: &'a LayoutState,
}

impl<'a> TestOutputView<'a> {
    pub fn test_output_count(&self) -> usize {
        self.state.test_outputs().len()
    }

    pub fn test_output_at(&self, index: usize) -> &'a TestOutput {
        &self.state.test_outputs()[index]
    }

    pub fn find_test_outputs(
        &self,
        test_key: &'a str,
    ) -> impl Iterator<Item = &'a TestOutput> + use<'a> {
        self.state
            .test_outputs()
            .iter()
            .filter(move |o| o.test_key == test_key)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/views.rs"]
mod tests;
