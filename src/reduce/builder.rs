//! Single-pass reduction of a layout tree into a pending snapshot.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use smallvec::SmallVec;

use crate::{
    foundation::{
        core::{MeasuredSize, Rect, Vec2},
        error::{MountPlanError, MountPlanResult},
        ids::{LayoutStateId, LayoutStateIdGenerator, OutputUnitType, ROOT_HOST_ID, RenderUnitId},
        math::Fnv1a64,
    },
    layout::{
        node::LayoutNode,
        request::{ReduceOpts, ReduceRequest},
    },
    range::working_range::WorkingRangeContainer,
    reduce::output::{IncrementalMountOutput, RenderUnit, TestOutput, VisibilityOutput},
    state::layout_state::{LayoutStateData, PendingLayoutState},
    transition::{
        affinity::{AffinityGroup, AffinityRole, AnimatableItem},
        ids::TransitionId,
    },
};

/// Reduces `req.root` into a pending snapshot, drawing its id from the process-wide generator.
pub fn reduce(req: &ReduceRequest<'_>) -> MountPlanResult<PendingLayoutState> {
    reduce_with_ids(req, LayoutStateIdGenerator::global())
}

/// Same as [`reduce`] with an explicit snapshot-id source.
#[tracing::instrument(
    skip_all,
    fields(tree = req.component_tree_id, source = %req.source, root = %req.root_component.name)
)]
pub fn reduce_with_ids(
    req: &ReduceRequest<'_>,
    ids: &LayoutStateIdGenerator,
) -> MountPlanResult<PendingLayoutState> {
    let mut b = ReductionBuilder::new(req.opts);
    b.reserve_pinned_ids(req.root, true)?;
    b.visit(req.root, Vec2::ZERO, None, &mut Vec::new())?;

    let data = b.finish(req, ids.next_id())?;
    tracing::debug!(
        layout_state = %data.id,
        units = data.units.len(),
        visibility_outputs = data.visibility_outputs.len(),
        transition_ids = data.transition_id_mapping.len(),
        has_excluded_units = data.has_excluded_units,
        "reduced layout tree"
    );
    Ok(PendingLayoutState::new(data))
}

/// Follows nested-tree delegation, accumulating each holder's offset.
fn resolve_delegation(node: &LayoutNode, origin: Vec2) -> (&LayoutNode, Vec2) {
    let mut node = node;
    let mut origin = origin;
    while let Some(nested) = node.nested_tree.as_deref() {
        origin += node.bounds.origin().to_vec2();
        node = nested;
    }
    (node, origin)
}

/// Id seed for nodes without a component: `0` for the root, then `.i` per child index.
fn positional_key(path: &[usize]) -> String {
    let mut key = String::from("0");
    for i in path {
        key.push('.');
        key.push_str(&i.to_string());
    }
    key
}

fn sweep_order(
    outputs: &[IncrementalMountOutput],
    edge: fn(&IncrementalMountOutput) -> f64,
) -> Vec<usize> {
    let mut order = (0..outputs.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| {
        edge(&outputs[a])
            .total_cmp(&edge(&outputs[b]))
            .then(a.cmp(&b))
    });
    order
}

struct ReductionBuilder {
    opts: ReduceOpts,
    reserved_ids: HashSet<RenderUnitId>,
    assigned_ids: HashSet<RenderUnitId>,
    seen_transition_ids: HashSet<TransitionId>,

    units: Vec<RenderUnit>,
    incremental_outputs: Vec<IncrementalMountOutput>,
    has_excluded_units: bool,
    visibility_outputs: Vec<VisibilityOutput>,
    test_outputs: Vec<TestOutput>,
    animatable_items: HashMap<RenderUnitId, AnimatableItem>,
    transition_id_mapping: BTreeMap<TransitionId, AffinityGroup<AnimatableItem>>,
    root_transition_id: Option<TransitionId>,
    working_ranges: WorkingRangeContainer,
    component_key_to_bounds: BTreeMap<String, Rect>,
    component_handle_to_bounds: BTreeMap<String, Rect>,
    units_hosting_render_trees: BTreeSet<RenderUnitId>,
}

impl ReductionBuilder {
    fn new(opts: ReduceOpts) -> Self {
        let mut assigned_ids = HashSet::new();
        assigned_ids.insert(ROOT_HOST_ID);
        Self {
            opts,
            reserved_ids: HashSet::new(),
            assigned_ids,
            seen_transition_ids: HashSet::new(),
            units: Vec::new(),
            incremental_outputs: Vec::new(),
            has_excluded_units: false,
            visibility_outputs: Vec::new(),
            test_outputs: Vec::new(),
            animatable_items: HashMap::new(),
            transition_id_mapping: BTreeMap::new(),
            root_transition_id: None,
            working_ranges: WorkingRangeContainer::new(),
            component_key_to_bounds: BTreeMap::new(),
            component_handle_to_bounds: BTreeMap::new(),
            units_hosting_render_trees: BTreeSet::new(),
        }
    }

    /// Collects pinned host ids up front so generated ids never take one of them.
    fn reserve_pinned_ids(&mut self, node: &LayoutNode, is_root: bool) -> MountPlanResult<()> {
        let node = node.resolve_nested();
        if let (false, Some(raw)) = (is_root, node.pinned_host_id) {
            let id = RenderUnitId(raw);
            if id.is_root_host() {
                return Err(MountPlanError::validation(format!(
                    "node {:?} claims the root host id",
                    node.global_key().unwrap_or("<anonymous>")
                )));
            }
            if !self.reserved_ids.insert(id) {
                return Err(MountPlanError::validation(format!(
                    "host id {id} is pinned by more than one node"
                )));
            }
        }
        for child in &node.children {
            self.reserve_pinned_ids(child, false)?;
        }
        Ok(())
    }

    fn generated_id(&mut self, unit_type: OutputUnitType, key: &str) -> RenderUnitId {
        let mut h = Fnv1a64::new_default();
        h.write_str(key);
        let mut seq = h.finish_u32();
        loop {
            let id = RenderUnitId::new(unit_type, seq);
            if seq != 0 && !self.reserved_ids.contains(&id) && self.assigned_ids.insert(id) {
                return id;
            }
            seq = seq.wrapping_add(1);
        }
    }

    fn host_id(&mut self, node: &LayoutNode, key: &str) -> RenderUnitId {
        match node.pinned_host_id {
            Some(raw) => {
                let id = RenderUnitId(raw);
                self.assigned_ids.insert(id);
                id
            }
            None => self.generated_id(OutputUnitType::Host, key),
        }
    }

    fn push_unit(
        &mut self,
        node: &LayoutNode,
        id: RenderUnitId,
        unit_type: OutputUnitType,
        bounds: Rect,
        parent: Option<usize>,
        transition_id: &Option<TransitionId>,
    ) -> usize {
        let index = self.units.len();
        let host_relative_bounds = match parent {
            Some(p) => bounds - self.units[p].bounds.origin().to_vec2(),
            None => bounds,
        };
        self.units.push(RenderUnit {
            id,
            unit_type,
            parent,
            bounds,
            host_relative_bounds,
            component: node.component.clone(),
            transition_id: transition_id.clone(),
            hosts_render_tree: false,
        });
        self.incremental_outputs.push(IncrementalMountOutput {
            id,
            index,
            bounds,
            host_index: parent,
            excluded: node.exclude_from_incremental_mount,
        });
        self.has_excluded_units |= node.exclude_from_incremental_mount;
        index
    }

    /// Pre-order visit. `host` is the enclosing host unit, `None` only for the root. `path` holds
    /// the child indices leading to `node`.
    fn visit(
        &mut self,
        node: &LayoutNode,
        origin: Vec2,
        host: Option<usize>,
        path: &mut Vec<usize>,
    ) -> MountPlanResult<()> {
        let (node, origin) = resolve_delegation(node, origin);
        let bounds = node.bounds + origin;
        let is_root = host.is_none();
        let key = match node.global_key() {
            Some(key) => Cow::Borrowed(key),
            None => Cow::Owned(positional_key(path)),
        };
        let transition_id = TransitionId::for_node(node);

        let mut node_units: SmallVec<[usize; 3]> = SmallVec::new();
        let mut child_host = host;
        if is_root || node.needs_host || (node.accessible && self.opts.accessibility_enabled) {
            let id = if is_root {
                ROOT_HOST_ID
            } else {
                self.host_id(node, &key)
            };
            let index = self.push_unit(node, id, OutputUnitType::Host, bounds, host, &transition_id);
            node_units.push(index);
            child_host = Some(index);
        }
        if node.has_content {
            let id = self.generated_id(OutputUnitType::Content, &key);
            node_units.push(self.push_unit(
                node,
                id,
                OutputUnitType::Content,
                bounds,
                child_host,
                &transition_id,
            ));
        }
        if node.border {
            let id = self.generated_id(OutputUnitType::Border, &key);
            node_units.push(self.push_unit(
                node,
                id,
                OutputUnitType::Border,
                bounds,
                child_host,
                &transition_id,
            ));
        }

        if node.hosts_render_tree
            && let Some(&first) = node_units.first()
        {
            self.units[first].hosts_render_tree = true;
            self.units_hosting_render_trees.insert(self.units[first].id);
        }

        self.record_animatable_items(node, transition_id.as_ref(), &node_units)?;
        if is_root {
            self.root_transition_id = transition_id;
        }

        let primary_id = node_units.first().map(|&i| self.units[i].id);
        if let Some(component) = &node.component {
            if let Some(decl) = &node.visibility {
                self.visibility_outputs.push(VisibilityOutput {
                    render_unit_id: primary_id,
                    component: component.clone(),
                    bounds,
                    decl: decl.clone(),
                });
            }
            for decl in &node.working_ranges {
                self.working_ranges
                    .register(&decl.name, decl.range.clone(), component.clone());
            }
            self.component_key_to_bounds
                .insert(component.global_key.clone(), bounds);
            if let Some(handle) = &component.handle {
                self.component_handle_to_bounds.insert(handle.clone(), bounds);
            }
        }
        if self.opts.diagnostics.end_to_end_test_run
            && let Some(test_key) = &node.test_key
        {
            let host_id = child_host.map_or(ROOT_HOST_ID, |h| self.units[h].id);
            self.test_outputs.push(TestOutput {
                test_key: test_key.clone(),
                bounds,
                render_unit_id: primary_id,
                host_id,
            });
        }

        let child_origin = bounds.origin().to_vec2();
        for (i, child) in node.children.iter().enumerate() {
            path.push(i);
            self.visit(child, child_origin, child_host, path)?;
            path.pop();
        }
        Ok(())
    }

    fn record_animatable_items(
        &mut self,
        node: &LayoutNode,
        transition_id: Option<&TransitionId>,
        node_units: &[usize],
    ) -> MountPlanResult<()> {
        if let Some(tid) = transition_id
            && !node_units.is_empty()
            && !self.seen_transition_ids.insert(tid.clone())
        {
            return Err(MountPlanError::validation(format!(
                "transition id {tid} is defined multiple times in the same layout (at {:?})",
                node.global_key().unwrap_or("<anonymous>")
            )));
        }
        for &index in node_units {
            let unit = &self.units[index];
            let item = AnimatableItem {
                id: unit.id,
                absolute_bounds: unit.bounds,
                unit_type: unit.unit_type,
                transition_id: transition_id.cloned(),
            };
            if let Some(tid) = transition_id {
                self.transition_id_mapping
                    .entry(tid.clone())
                    .or_default()
                    .add(AffinityRole::for_unit_type(unit.unit_type), item.clone())?;
            }
            self.animatable_items.insert(unit.id, item);
        }
        Ok(())
    }

    fn finish(self, req: &ReduceRequest<'_>, id: LayoutStateId) -> MountPlanResult<LayoutStateData> {
        let root_bounds = self
            .units
            .first()
            .filter(|u| u.id.is_root_host())
            .map(|u| u.bounds)
            .ok_or_else(|| MountPlanError::consistency("mount sequence does not start with the root host"))?;

        let id_to_position = self
            .units
            .iter()
            .enumerate()
            .map(|(i, u)| (u.id, i))
            .collect::<HashMap<_, _>>();
        if id_to_position.len() != self.units.len() {
            return Err(MountPlanError::consistency(
                "render unit ids are not unique within the mount sequence",
            ));
        }

        let by_top = sweep_order(&self.incremental_outputs, IncrementalMountOutput::top);
        let by_bottom = sweep_order(&self.incremental_outputs, IncrementalMountOutput::bottom);

        Ok(LayoutStateData {
            id,
            previous_layout_state_id: req.previous_layout_state_id,
            component_tree_id: req.component_tree_id,
            root_component: req.root_component.clone(),
            source: req.source,
            size_constraints: req.size_constraints,
            measured: MeasuredSize::from_rect(root_bounds),
            root_bounds,
            opts: req.opts,
            units: self.units,
            incremental_outputs: self.incremental_outputs,
            id_to_position: Arc::new(id_to_position),
            by_top,
            by_bottom,
            has_excluded_units: self.has_excluded_units,
            visibility_outputs: self.visibility_outputs,
            test_outputs: self.test_outputs,
            animatable_items: self.animatable_items,
            transition_id_mapping: self.transition_id_mapping,
            root_transition_id: self.root_transition_id,
            transition_data: req.transition_data.clone(),
            scoped_transition_sources: req.scoped_transition_sources.clone(),
            working_ranges: self.working_ranges,
            component_key_to_bounds: self.component_key_to_bounds,
            component_handle_to_bounds: self.component_handle_to_bounds,
            units_hosting_render_trees: self.units_hosting_render_trees,
            should_process_visibility_outputs: true,
            root_width_animation: None,
            root_height_animation: None,
            needs_to_rerun_transitions: false,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reduce/builder.rs"]
mod tests;
