//! Tree-shaped view of a mount sequence, derived once per committed snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    foundation::{
        core::Rect,
        ids::{LayoutStateId, RenderUnitId},
        measure::SizeConstraints,
    },
    state::layout_state::LayoutStateData,
};

#[derive(Clone, Debug, PartialEq)]
pub struct RenderTreeNode {
    pub id: RenderUnitId,
    /// Position of the parent node; `None` for the root.
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub absolute_bounds: Rect,
    /// Bounds relative to the parent node.
    pub relative_bounds: Rect,
}

/// Render units arranged by host, in mount order.
#[derive(Debug)]
pub struct RenderTree {
    nodes: Vec<RenderTreeNode>,
    id_to_position: Arc<HashMap<RenderUnitId, usize>>,
    layout_state_id: LayoutStateId,
    size_constraints: SizeConstraints,
}

impl RenderTree {
    #[tracing::instrument(skip_all, fields(layout_state = %data.id, units = data.units.len()))]
    pub(crate) fn build(data: &LayoutStateData) -> Self {
        debug_assert!(
            data.units.first().is_some_and(|u| u.id.is_root_host()),
            "mount sequence must start with the root host"
        );

        let mut nodes = data
            .units
            .iter()
            .map(|u| RenderTreeNode {
                id: u.id,
                parent: u.parent,
                children: Vec::new(),
                absolute_bounds: u.bounds,
                relative_bounds: u.host_relative_bounds,
            })
            .collect::<Vec<_>>();
        for (i, unit) in data.units.iter().enumerate() {
            if let Some(p) = unit.parent {
                nodes[p].children.push(i);
            }
        }

        let id_to_position = if data.opts.reuse_id_to_position_map {
            Arc::clone(&data.id_to_position)
        } else {
            Arc::new(nodes.iter().enumerate().map(|(i, n)| (n.id, i)).collect())
        };

        Self {
            nodes,
            id_to_position,
            layout_state_id: data.id,
            size_constraints: data.size_constraints,
        }
    }

    pub fn root(&self) -> &RenderTreeNode {
        &self.nodes[0]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_at(&self, position: usize) -> &RenderTreeNode {
        &self.nodes[position]
    }

    pub fn node_for_id(&self, id: RenderUnitId) -> Option<&RenderTreeNode> {
        self.id_to_position.get(&id).map(|&p| &self.nodes[p])
    }

    pub fn children_of(&self, position: usize) -> impl Iterator<Item = &RenderTreeNode> {
        self.nodes[position].children.iter().map(|&c| &self.nodes[c])
    }

    pub fn layout_state_id(&self) -> LayoutStateId {
        self.layout_state_id
    }

    pub fn size_constraints(&self) -> SizeConstraints {
        self.size_constraints
    }

    pub fn id_to_position(&self) -> &HashMap<RenderUnitId, usize> {
        &self.id_to_position
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/render_tree.rs"]
mod tests;
