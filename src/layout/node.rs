//! Hierarchical layout tree handed over by the measurement phase.
//!
//! Bounds are relative to the parent node. The tree is read-only to reduction.

use crate::{
    foundation::core::Rect,
    range::working_range::WorkingRangeSpec,
    transition::ids::TransitionKeyType,
};

/// Component metadata attached to a layout node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ComponentInfo {
    /// Component instance id.
    pub id: u32,
    /// Simple (type) name, used in dumps.
    pub name: String,
    /// Global key, unique within one component tree.
    pub global_key: String,
    /// Optional explicit handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    /// Marks the empty placeholder component.
    #[serde(default)]
    pub is_empty: bool,
}

impl ComponentInfo {
    pub fn new(id: u32, name: impl Into<String>, global_key: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            global_key: global_key.into(),
            handle: None,
            is_empty: false,
        }
    }

    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }
}

/// Transition key declared by a component.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TransitionKeyDecl {
    pub key: String,
    #[serde(default)]
    pub key_type: TransitionKeyType,
}

/// Visibility callbacks requested by a component.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisibilityDecl {
    /// Fraction of the height that must be visible before the unit counts as visible.
    #[serde(default)]
    pub visible_height_ratio: f32,
    /// Fraction of the width that must be visible before the unit counts as visible.
    #[serde(default)]
    pub visible_width_ratio: f32,
    #[serde(default)]
    pub on_visible: bool,
    #[serde(default)]
    pub on_invisible: bool,
    #[serde(default)]
    pub on_focused: bool,
    #[serde(default)]
    pub on_full_impression: bool,
}

impl Default for VisibilityDecl {
    fn default() -> Self {
        Self {
            visible_height_ratio: 0.0,
            visible_width_ratio: 0.0,
            on_visible: true,
            on_invisible: false,
            on_focused: false,
            on_full_impression: false,
        }
    }
}

/// Working range requested by a component.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct WorkingRangeDecl {
    pub name: String,
    pub range: WorkingRangeSpec,
}

/// One node of the computed layout tree.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutNode {
    /// Bounds relative to the parent node.
    pub bounds: Rect,
    pub component: Option<ComponentInfo>,
    /// Produces a content unit (the mount content of the component).
    pub has_content: bool,
    /// Requires its own host unit for content and children.
    pub needs_host: bool,
    /// Draws a border decoration unit.
    pub border: bool,
    /// Gets a host when accessibility is enabled.
    pub accessible: bool,
    /// Host id carried over from a previous pass.
    pub pinned_host_id: Option<u64>,
    pub transition_key: Option<TransitionKeyDecl>,
    /// Derive a transition id from the global key when no key is declared.
    pub autogenerate_transition_id: bool,
    pub visibility: Option<VisibilityDecl>,
    pub exclude_from_incremental_mount: bool,
    /// End-to-end testing key.
    pub test_key: Option<String>,
    /// The host of this node renders a nested render tree.
    pub hosts_render_tree: bool,
    pub working_ranges: Vec<WorkingRangeDecl>,
    pub children: Vec<LayoutNode>,
    /// Independently computed sub-tree that replaces this node in the output.
    pub nested_tree: Option<Box<LayoutNode>>,
}

impl LayoutNode {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    pub fn with_component(mut self, component: ComponentInfo) -> Self {
        self.component = Some(component);
        self
    }

    pub fn with_child(mut self, child: LayoutNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn content(mut self) -> Self {
        self.has_content = true;
        self
    }

    pub fn hosted(mut self) -> Self {
        self.needs_host = true;
        self
    }

    pub fn with_transition_key(mut self, key: impl Into<String>, key_type: TransitionKeyType) -> Self {
        self.transition_key = Some(TransitionKeyDecl {
            key: key.into(),
            key_type,
        });
        self
    }

    pub fn delegating_to(mut self, nested: LayoutNode) -> Self {
        self.nested_tree = Some(Box::new(nested));
        self
    }

    pub fn is_nested_tree_holder(&self) -> bool {
        self.nested_tree.is_some()
    }

    /// Follows nested-tree delegation until a node that produces output itself.
    pub fn resolve_nested(&self) -> &LayoutNode {
        let mut node = self;
        while let Some(nested) = node.nested_tree.as_deref() {
            node = nested;
        }
        node
    }

    /// Whether `candidate` is the node that produces the root output of the tree rooted here.
    ///
    /// A root nested-tree holder is transparent: its delegate is the layout root.
    pub fn is_layout_root(&self, candidate: &LayoutNode) -> bool {
        std::ptr::eq(self.resolve_nested(), candidate)
    }

    pub fn global_key(&self) -> Option<&str> {
        self.component.as_ref().map(|c| c.global_key.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/node.rs"]
mod tests;
