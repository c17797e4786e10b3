//! Measurement requirements and the reuse-compatibility rule.

use std::fmt;
use std::str::FromStr;

use crate::foundation::{
    core::MeasuredSize,
    error::{MountPlanError, MountPlanResult},
};

/// A single-axis measurement requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", content = "size", rename_all = "snake_case")]
pub enum SizeSpec {
    /// The result must be exactly this many pixels.
    Exactly(u32),
    /// The result may be at most this many pixels.
    AtMost(u32),
    /// No constraint.
    Unspecified,
}

impl SizeSpec {
    /// Whether a previously measured extent satisfies this requirement.
    pub fn accepts(self, measured: u32) -> bool {
        match self {
            Self::Exactly(size) => measured == size,
            Self::AtMost(size) => measured <= size,
            Self::Unspecified => true,
        }
    }

    pub fn size(self) -> Option<u32> {
        match self {
            Self::Exactly(size) | Self::AtMost(size) => Some(size),
            Self::Unspecified => None,
        }
    }
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(size) => write!(f, "EXACTLY {size}"),
            Self::AtMost(size) => write!(f, "AT_MOST {size}"),
            Self::Unspecified => write!(f, "UNSPECIFIED"),
        }
    }
}

/// Parses `exactly:<px>`, `at_most:<px>` or `unspecified`.
impl FromStr for SizeSpec {
    type Err = MountPlanError;

    fn from_str(s: &str) -> MountPlanResult<Self> {
        let (mode, size) = match s.split_once(':') {
            Some((mode, size)) => (mode, Some(size)),
            None => (s, None),
        };
        let px = || -> MountPlanResult<u32> {
            let size = size.ok_or_else(|| {
                MountPlanError::validation(format!("size spec '{s}' is missing a size"))
            })?;
            size.trim().parse().map_err(|e| {
                MountPlanError::validation(format!("size spec '{s}' has an invalid size: {e}"))
            })
        };
        match mode.trim().to_ascii_lowercase().as_str() {
            "exactly" => Ok(Self::Exactly(px()?)),
            "at_most" | "atmost" => Ok(Self::AtMost(px()?)),
            "unspecified" if size.is_none() => Ok(Self::Unspecified),
            _ => Err(MountPlanError::validation(format!("unknown size spec '{s}'"))),
        }
    }
}

/// Whether a result measured under `old_spec` (producing `old_measured`) can be reused for a
/// request of `new_spec`.
pub fn is_measure_spec_compatible(old_spec: SizeSpec, new_spec: SizeSpec, old_measured: u32) -> bool {
    old_spec == new_spec || new_spec.accepts(old_measured)
}

/// Width and height requirements of one layout request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SizeConstraints {
    pub width: SizeSpec,
    pub height: SizeSpec,
}

impl SizeConstraints {
    pub fn new(width: SizeSpec, height: SizeSpec) -> Self {
        Self { width, height }
    }

    pub fn exactly(width: u32, height: u32) -> Self {
        Self::new(SizeSpec::Exactly(width), SizeSpec::Exactly(height))
    }

    pub fn unspecified() -> Self {
        Self::new(SizeSpec::Unspecified, SizeSpec::Unspecified)
    }

    /// Applies [`is_measure_spec_compatible`] to both axes.
    pub fn is_compatible(self, measured: MeasuredSize, width: SizeSpec, height: SizeSpec) -> bool {
        is_measure_spec_compatible(self.width, width, measured.width)
            && is_measure_spec_compatible(self.height, height, measured.height)
    }
}

impl Default for SizeConstraints {
    fn default() -> Self {
        Self::unspecified()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/measure.rs"]
mod tests;
