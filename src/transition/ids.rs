use std::fmt;

use crate::layout::node::LayoutNode;

/// Scope of a declared transition key.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKeyType {
    /// Unique across the whole tree.
    Global,
    /// Unique among the components owned by the same parent.
    #[default]
    Local,
}

/// Kind of a resolved [`TransitionId`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TransitionIdKind {
    Global,
    Scoped,
    Autogenerated,
}

/// Stable logical key of an animatable entity across layout passes.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TransitionId {
    pub kind: TransitionIdKind,
    pub reference: String,
    /// Owner scope for scoped ids.
    pub extension: Option<String>,
}

impl TransitionId {
    pub fn global(reference: impl Into<String>) -> Self {
        Self {
            kind: TransitionIdKind::Global,
            reference: reference.into(),
            extension: None,
        }
    }

    pub fn scoped(reference: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            kind: TransitionIdKind::Scoped,
            reference: reference.into(),
            extension: Some(owner.into()),
        }
    }

    pub fn autogenerated(global_key: impl Into<String>) -> Self {
        Self {
            kind: TransitionIdKind::Autogenerated,
            reference: global_key.into(),
            extension: None,
        }
    }

    /// Resolves the transition id a layout node declares, if any.
    ///
    /// Local keys are scoped by the owner, i.e. the global key minus its last segment.
    pub fn for_node(node: &LayoutNode) -> Option<Self> {
        if let Some(decl) = &node.transition_key {
            return Some(match decl.key_type {
                TransitionKeyType::Global => Self::global(decl.key.clone()),
                TransitionKeyType::Local => {
                    let owner = node
                        .global_key()
                        .map(owner_scope)
                        .unwrap_or_default();
                    Self::scoped(decl.key.clone(), owner)
                }
            });
        }
        if node.autogenerate_transition_id {
            return node.global_key().map(Self::autogenerated);
        }
        None
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            TransitionIdKind::Global => "global",
            TransitionIdKind::Scoped => "scoped",
            TransitionIdKind::Autogenerated => "auto",
        };
        match &self.extension {
            Some(ext) => write!(f, "{kind}:{ext}/{}", self.reference),
            None => write!(f, "{kind}:{}", self.reference),
        }
    }
}

fn owner_scope(global_key: &str) -> String {
    match global_key.rfind(',') {
        Some(i) => global_key[..i].to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/ids.rs"]
mod tests;
