//! Role-tagged grouping of animatable items that share one transition id.

use crate::{
    foundation::{
        core::Rect,
        error::{MountPlanError, MountPlanResult},
        ids::{OutputUnitType, RenderUnitId},
    },
    transition::ids::TransitionId,
};

/// Slot of an item inside an [`AffinityGroup`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AffinityRole {
    Content,
    Host,
    Border,
}

impl AffinityRole {
    pub const ALL: [Self; 3] = [Self::Content, Self::Host, Self::Border];

    pub fn for_unit_type(unit_type: OutputUnitType) -> Self {
        match unit_type {
            OutputUnitType::Content => Self::Content,
            OutputUnitType::Host => Self::Host,
            OutputUnitType::Border => Self::Border,
        }
    }

    fn slot(self) -> usize {
        match self {
            Self::Content => 0,
            Self::Host => 1,
            Self::Border => 2,
        }
    }
}

/// Per-unit state snapshot used to compute transitions.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AnimatableItem {
    pub id: RenderUnitId,
    /// Bounds in root coordinates.
    pub absolute_bounds: Rect,
    pub unit_type: OutputUnitType,
    pub transition_id: Option<TransitionId>,
}

/// Up to one item per [`AffinityRole`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AffinityGroup<T> {
    slots: [Option<T>; 3],
}

impl<T> Default for AffinityGroup<T> {
    fn default() -> Self {
        Self {
            slots: [None, None, None],
        }
    }
}

impl<T> AffinityGroup<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `item` into `role`. A role holds at most one item.
    pub fn add(&mut self, role: AffinityRole, item: T) -> MountPlanResult<()> {
        let slot = &mut self.slots[role.slot()];
        if slot.is_some() {
            return Err(MountPlanError::validation(format!(
                "affinity group already holds a {role:?} item"
            )));
        }
        *slot = Some(item);
        Ok(())
    }

    pub fn get(&self, role: AffinityRole) -> Option<&T> {
        self.slots[role.slot()].as_ref()
    }

    /// Any item, preferring content, then host, then border.
    pub fn most_relevant(&self) -> Option<&T> {
        self.slots.iter().flatten().next()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (AffinityRole, &T)> {
        AffinityRole::ALL
            .into_iter()
            .filter_map(|role| self.get(role).map(|item| (role, item)))
    }

    pub fn roles(&self) -> impl Iterator<Item = AffinityRole> + '_ {
        self.iter().map(|(role, _)| role)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/affinity.rs"]
mod tests;
