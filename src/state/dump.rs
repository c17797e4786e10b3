use std::fmt::Write as _;

use crate::{
    foundation::error::{MountPlanError, MountPlanResult},
    state::layout_state::LayoutState,
};

impl LayoutState {
    /// Human-readable listing of the mount sequence.
    ///
    /// Only available in debug mode or end-to-end test runs.
    pub fn dump_mount_sequence(&self) -> MountPlanResult<String> {
        if !self.opts().diagnostics.allows_debug_dump() {
            return Err(MountPlanError::usage(
                "mount sequence dump requires debug mode or an end-to-end test run",
            ));
        }

        let units = self.mountable_outputs();
        let mut out = format!(
            "LayoutState w/ {} mountable outputs, root: {}\n",
            units.len(),
            self.root_name()
        );
        for (i, unit) in units.iter().enumerate() {
            let host = unit
                .parent
                .map_or_else(|| "-1".to_string(), |p| units[p].id.to_string());
            let _ = writeln!(
                out,
                "  [{i}] id: {}, host: {host}, component: {}",
                unit.id,
                unit.component_name()
            );
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/dump.rs"]
mod tests;
