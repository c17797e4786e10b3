//! Render-unit and snapshot identity.
//!
//! Render-unit ids are 64-bit values: the high 32 bits carry an [`OutputUnitType`] tag and the
//! low 32 bits a sequence derived during reduction. Snapshot ids come from a monotonic counter.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

const TYPE_MASK: u64 = 0xFFFF_FFFF_0000_0000;

/// Role of a render unit within the node that produced it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputUnitType {
    Content,
    Host,
    Border,
}

impl OutputUnitType {
    pub const fn tag(self) -> u32 {
        match self {
            Self::Content => 0,
            Self::Host => 3,
            Self::Border => 4,
        }
    }

    pub const fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(Self::Content),
            3 => Some(Self::Host),
            4 => Some(Self::Border),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Host => "host",
            Self::Border => "border",
        }
    }
}

/// Type-tagged 64-bit render-unit identifier.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct RenderUnitId(pub u64);

/// Id of the synthetic root host unit. Every mount sequence starts with it.
pub const ROOT_HOST_ID: RenderUnitId = RenderUnitId(0);

impl RenderUnitId {
    pub const fn new(unit_type: OutputUnitType, sequence: u32) -> Self {
        Self(((unit_type.tag() as u64) << 32) | sequence as u64)
    }

    /// Raw type tag stored in the high 32 bits.
    pub const fn type_tag(self) -> u32 {
        ((self.0 & TYPE_MASK) >> 32) as u32
    }

    /// Unit type encoded in the id. The root host carries no tag bits but is always a host.
    pub const fn unit_type(self) -> Option<OutputUnitType> {
        if self.is_root_host() {
            return Some(OutputUnitType::Host);
        }
        OutputUnitType::from_tag(self.type_tag())
    }

    pub const fn sequence(self) -> u32 {
        (self.0 & !TYPE_MASK) as u32
    }

    pub const fn is_root_host(self) -> bool {
        self.0 == ROOT_HOST_ID.0
    }
}

impl fmt::Debug for RenderUnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RenderUnitId({:#x}:{})", self.type_tag(), self.sequence())
    }
}

impl fmt::Display for RenderUnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extracts the raw type tag from a render-unit id. Returns 0 for [`ROOT_HOST_ID`].
pub fn type_from_id(id: u64) -> u32 {
    RenderUnitId(id).type_tag()
}

/// Identifier of one reduced snapshot.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct LayoutStateId(pub u32);

impl fmt::Display for LayoutStateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic snapshot-id source.
///
/// [`LayoutStateIdGenerator::global`] is shared by every tree reduced in the process; tests
/// construct their own instance to stay isolated from each other.
#[derive(Debug)]
pub struct LayoutStateIdGenerator {
    next: AtomicU32,
}

static GLOBAL_LAYOUT_STATE_IDS: LayoutStateIdGenerator = LayoutStateIdGenerator::new();

impl LayoutStateIdGenerator {
    pub const fn new() -> Self {
        Self {
            next: AtomicU32::new(1),
        }
    }

    /// Process-wide generator shared across all trees.
    pub fn global() -> &'static Self {
        &GLOBAL_LAYOUT_STATE_IDS
    }

    pub fn next_id(&self) -> LayoutStateId {
        LayoutStateId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Restarts the sequence at 1.
    pub fn reset(&self) {
        self.next.store(1, Ordering::Relaxed);
    }
}

impl Default for LayoutStateIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/ids.rs"]
mod tests;
