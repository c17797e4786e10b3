//! mountplan reduces a computed layout tree into the flat, indexed mount plan consumed by
//! mounting, incremental mount, visibility tracking and animations.
//!
//! The flow is one way:
//!
//! - build a [`ReduceRequest`] around a [`LayoutNode`] tree
//! - [`reduce`] it into a [`PendingLayoutState`]
//! - [`PendingLayoutState::commit`] it into an immutable [`LayoutState`]
//! - read it through the per-consumer views, check it for reuse with the compatibility
//!   predicates, and reconcile transitions with [`collect_mount_time_transitions`]
#![forbid(unsafe_code)]

mod foundation;
mod layout;
mod range;
mod reduce;
mod state;
mod transition;

pub use crate::foundation::core::{MeasuredSize, Point, Rect, Size, Vec2};
pub use crate::foundation::error::{MountPlanError, MountPlanResult};
pub use crate::foundation::ids::{
    LayoutStateId, LayoutStateIdGenerator, OutputUnitType, ROOT_HOST_ID, RenderUnitId,
    type_from_id,
};
pub use crate::foundation::measure::{SizeConstraints, SizeSpec, is_measure_spec_compatible};
pub use crate::layout::document::TreeDocument;
pub use crate::layout::node::{
    ComponentInfo, LayoutNode, TransitionKeyDecl, VisibilityDecl, WorkingRangeDecl,
};
pub use crate::layout::request::{DiagnosticsConfig, ReduceOpts, ReduceRequest, RenderSource};
pub use crate::range::status::{
    WorkingRangeListener, WorkingRangeStatus, WorkingRangeStatusHandler,
};
pub use crate::range::working_range::{
    DispatchReport, VisibleWindow, WorkingRangeContainer, WorkingRangeSpec,
};
pub use crate::reduce::builder::{reduce, reduce_with_ids};
pub use crate::reduce::output::{
    IncrementalMountOutput, RenderUnit, TestOutput, VisibilityOutput,
};
pub use crate::state::layout_state::{LayoutState, PendingLayoutState};
pub use crate::state::render_tree::{RenderTree, RenderTreeNode};
pub use crate::state::views::{
    IncrementalMountView, TestOutputView, TransitionView, VisibilityView,
};
pub use crate::transition::affinity::{AffinityGroup, AffinityRole, AnimatableItem};
pub use crate::transition::ids::{TransitionId, TransitionIdKind, TransitionKeyType};
pub use crate::transition::model::{
    AnimatedProperty, ComponentTransitionCreator, DependencyTransitionCreator,
    RootBoundsTransition, ScopedTransitionSource, Transition, TransitionData, TransitionTarget,
    TransitionWithDependency,
};
pub use crate::transition::reconcile::{
    HierarchyErrorHandler, IdentityChange, MountTimeTransitions, MountedSnapshotData,
    TracingErrorHandler, TransitionIdentityChange, collect_mount_time_transitions,
    diff_transition_ids,
};
