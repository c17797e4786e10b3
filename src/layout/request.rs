use std::fmt;

use crate::{
    foundation::{ids::LayoutStateId, measure::SizeConstraints},
    layout::node::{ComponentInfo, LayoutNode},
    transition::model::{ScopedTransitionSource, TransitionData},
};

/// Gates for debug-only and end-to-end-test-only outputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub debug_mode: bool,
    pub end_to_end_test_run: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            debug_mode: cfg!(debug_assertions),
            end_to_end_test_run: false,
        }
    }
}

impl DiagnosticsConfig {
    /// Debug dumps are allowed in debug mode and in end-to-end test runs.
    pub fn allows_debug_dump(self) -> bool {
        self.debug_mode || self.end_to_end_test_run
    }
}

/// Options controlling one reduction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReduceOpts {
    /// Accessible nodes get their own host unit.
    pub accessibility_enabled: bool,
    /// Hand the id-to-position map to derived render trees instead of rebuilding it.
    pub reuse_id_to_position_map: bool,
    pub diagnostics: DiagnosticsConfig,
}

/// What triggered a layout computation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderSource {
    #[default]
    None,
    Test,
    SetRootSync,
    SetRootAsync,
    SetSizeSpecSync,
    SetSizeSpecAsync,
    UpdateStateSync,
    UpdateStateAsync,
    MeasureSetSizeSpec,
    MeasureSetSizeSpecAsync,
}

impl RenderSource {
    pub fn is_from_sync_layout(self) -> bool {
        matches!(
            self,
            Self::MeasureSetSizeSpec
                | Self::SetRootSync
                | Self::UpdateStateSync
                | Self::SetSizeSpecSync
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SetRootSync => "setRootSync",
            Self::SetSizeSpecSync => "setSizeSpecSync",
            Self::UpdateStateSync => "updateStateSync",
            Self::SetRootAsync => "setRootAsync",
            Self::SetSizeSpecAsync => "setSizeSpecAsync",
            Self::UpdateStateAsync => "updateStateAsync",
            Self::MeasureSetSizeSpec => "measure_setSizeSpecSync",
            Self::MeasureSetSizeSpecAsync => "measure_setSizeSpecAsync",
            Self::Test => "test",
            Self::None => "none",
        }
    }
}

impl fmt::Display for RenderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the Reduction Builder consumes for one pass.
#[derive(Clone, Debug)]
pub struct ReduceRequest<'a> {
    pub root: &'a LayoutNode,
    /// Root component of the resolved tree.
    pub root_component: ComponentInfo,
    /// Id of the component tree that produced `root`.
    pub component_tree_id: u32,
    pub size_constraints: SizeConstraints,
    /// Snapshot this pass was diffed against, if any.
    pub previous_layout_state_id: Option<LayoutStateId>,
    pub source: RenderSource,
    pub transition_data: Option<TransitionData>,
    /// Components that create transitions at mount time from previous render data.
    pub scoped_transition_sources: Vec<ScopedTransitionSource>,
    pub opts: ReduceOpts,
}

impl<'a> ReduceRequest<'a> {
    pub fn new(
        root: &'a LayoutNode,
        root_component: ComponentInfo,
        component_tree_id: u32,
        size_constraints: SizeConstraints,
    ) -> Self {
        Self {
            root,
            root_component,
            component_tree_id,
            size_constraints,
            previous_layout_state_id: None,
            source: RenderSource::None,
            transition_data: None,
            scoped_transition_sources: Vec::new(),
            opts: ReduceOpts::default(),
        }
    }

    pub fn with_opts(mut self, opts: ReduceOpts) -> Self {
        self.opts = opts;
        self
    }

    pub fn with_previous(mut self, id: LayoutStateId) -> Self {
        self.previous_layout_state_id = Some(id);
        self
    }

    pub fn with_source(mut self, source: RenderSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_transition_data(mut self, data: TransitionData) -> Self {
        self.transition_data = Some(data);
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/request.rs"]
mod tests;
