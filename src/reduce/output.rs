//! Flattened output records produced by one reduction pass.

use crate::{
    foundation::{
        core::Rect,
        ids::{OutputUnitType, RenderUnitId},
    },
    layout::node::{ComponentInfo, VisibilityDecl},
    transition::ids::TransitionId,
};

/// One mountable unit of the mount sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderUnit {
    pub id: RenderUnitId,
    pub unit_type: OutputUnitType,
    /// Position of the enclosing host in the mount sequence. `None` only for the root host.
    pub parent: Option<usize>,
    /// Bounds in root coordinates.
    pub bounds: Rect,
    /// Bounds relative to the enclosing host.
    pub host_relative_bounds: Rect,
    pub component: Option<ComponentInfo>,
    pub transition_id: Option<TransitionId>,
    pub hosts_render_tree: bool,
}

impl RenderUnit {
    pub fn component_name(&self) -> &str {
        self.component.as_ref().map_or("", |c| c.name.as_str())
    }

    pub fn is_host(&self) -> bool {
        self.unit_type == OutputUnitType::Host
    }
}

/// Bounds-indexed entry used by incremental mount sweeps.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct IncrementalMountOutput {
    pub id: RenderUnitId,
    /// Position in the mount sequence.
    pub index: usize,
    pub bounds: Rect,
    pub host_index: Option<usize>,
    pub excluded: bool,
}

impl IncrementalMountOutput {
    pub fn top(&self) -> f64 {
        self.bounds.y0
    }

    pub fn bottom(&self) -> f64 {
        self.bounds.y1
    }
}

/// A unit that requested visibility callbacks.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct VisibilityOutput {
    /// Unit the callbacks are attached to, when the node produced one.
    pub render_unit_id: Option<RenderUnitId>,
    pub component: ComponentInfo,
    pub bounds: Rect,
    pub decl: VisibilityDecl,
}

impl VisibilityOutput {
    pub fn visible_height_ratio(&self) -> f32 {
        self.decl.visible_height_ratio
    }

    pub fn visible_width_ratio(&self) -> f32 {
        self.decl.visible_width_ratio
    }
}

/// End-to-end testing record for a node carrying a test key.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TestOutput {
    pub test_key: String,
    pub bounds: Rect,
    pub render_unit_id: Option<RenderUnitId>,
    pub host_id: RenderUnitId,
}
