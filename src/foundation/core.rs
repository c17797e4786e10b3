pub use kurbo::{Point, Rect, Size, Vec2};

/// Rounds a layout extent to whole pixels, clamping negatives and NaN to zero.
pub fn extent_to_px(v: f64) -> u32 {
    if !v.is_finite() || v <= 0.0 {
        return 0;
    }
    v.round().min(f64::from(u32::MAX)) as u32
}

/// Measured pixel size of a reduced tree.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct MeasuredSize {
    pub width: u32,
    pub height: u32,
}

impl MeasuredSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn from_rect(r: Rect) -> Self {
        Self {
            width: extent_to_px(r.width()),
            height: extent_to_px(r.height()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
