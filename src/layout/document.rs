use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    foundation::{
        error::{MountPlanError, MountPlanResult},
        measure::SizeConstraints,
    },
    layout::{
        node::{ComponentInfo, LayoutNode},
        request::{ReduceOpts, ReduceRequest, RenderSource},
    },
};

/// JSON-facing bundle of one reduce request: the layout tree plus how it was measured.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TreeDocument {
    pub root_component: ComponentInfo,
    #[serde(default)]
    pub component_tree_id: u32,
    #[serde(default)]
    pub size_constraints: SizeConstraints,
    #[serde(default)]
    pub source: RenderSource,
    #[serde(default)]
    pub opts: ReduceOpts,
    pub root: LayoutNode,
}

impl TreeDocument {
    /// Parse a tree document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> MountPlanResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| MountPlanError::validation(format!("parse tree document JSON: {e}")))
    }

    /// Parse a tree document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> MountPlanResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MountPlanError::validation(format!("open tree document '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn request(&self) -> ReduceRequest<'_> {
        ReduceRequest::new(
            &self.root,
            self.root_component.clone(),
            self.component_tree_id,
            self.size_constraints,
        )
        .with_opts(self.opts)
        .with_source(self.source)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/document.rs"]
mod tests;
