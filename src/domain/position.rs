//! Normalized trigger positions and the drag-to-position transform.
//!
//! Drag gestures report a pixel displacement relative to the centre of the
//! container. [`normalize`] turns that displacement into a [`Position`]
//! expressed as a percentage of the usable travel range, so the stored
//! position is independent of the editor's screen resolution.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Value used for an axis whose travel range is zero.
pub const DEGENERATE_AXIS_PERCENT: f64 = 50.0;

/// Trigger position as a percentage offset from the container's top-left
/// corner. Both axes are in `[0, 100]` when produced by [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Position {
    /// Horizontal offset in percent of the container width.
    pub x: f64,
    /// Vertical offset in percent of the container height.
    pub y: f64,
}

impl Position {
    /// Creates a position from raw percentages.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Top-left corner of the container.
    #[must_use]
    pub const fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// Raw drag displacement in pixels, measured from the container centre.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragOffset {
    /// Horizontal displacement.
    pub dx: f64,
    /// Vertical displacement.
    pub dy: f64,
}

/// Width and height of a laid-out box in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle of the given size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Converts a drag displacement into a normalized [`Position`].
///
/// The offset is first re-based onto the container origin by adding half the
/// container size, then divided by the travel range (`container - element`)
/// and clamped to `[0, 100]`. An axis with no travel range resolves to
/// [`DEGENERATE_AXIS_PERCENT`].
#[must_use]
pub fn normalize(offset: DragOffset, container: Rect, element: Rect) -> Position {
    Position {
        x: normalize_axis(offset.dx, container.width, element.width),
        y: normalize_axis(offset.dy, container.height, element.height),
    }
}

fn normalize_axis(delta: f64, container: f64, element: f64) -> f64 {
    let pixel = delta + container / 2.0;
    let range = container - element;
    if range == 0.0 {
        return DEGENERATE_AXIS_PERCENT;
    }
    let percent = pixel / range * 100.0;
    // A NaN offset would slip through `clamp` unchanged.
    if percent.is_nan() {
        return DEGENERATE_AXIS_PERCENT;
    }
    percent.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_offset_maps_past_midpoint_by_element_share() {
        // 400px container, 100px element: centre is pixel 200 over a 300px range.
        let pos = normalize(
            DragOffset { dx: 0.0, dy: 0.0 },
            Rect::new(400.0, 400.0),
            Rect::new(100.0, 100.0),
        );
        assert!((pos.x - 200.0 / 300.0 * 100.0).abs() < 1e-9);
        assert!((pos.y - pos.x).abs() < 1e-9);
    }

    #[test]
    fn far_left_clamps_to_zero() {
        let pos = normalize(
            DragOffset { dx: -500.0, dy: -200.0 },
            Rect::new(400.0, 400.0),
            Rect::new(50.0, 50.0),
        );
        assert_eq!(pos, Position::origin());
    }

    #[test]
    fn far_right_clamps_to_hundred() {
        let pos = normalize(
            DragOffset { dx: 900.0, dy: 900.0 },
            Rect::new(400.0, 200.0),
            Rect::new(50.0, 50.0),
        );
        assert_eq!(pos, Position::new(100.0, 100.0));
    }

    #[test]
    fn zero_range_axis_is_midpoint() {
        let pos = normalize(
            DragOffset { dx: 37.0, dy: 10.0 },
            Rect::new(120.0, 400.0),
            Rect::new(120.0, 40.0),
        );
        assert_eq!(pos.x, DEGENERATE_AXIS_PERCENT);
        assert!(pos.y.is_finite());
    }

    #[test]
    fn fully_degenerate_geometry_never_yields_nan() {
        let pos = normalize(DragOffset::default(), Rect::default(), Rect::default());
        assert_eq!(pos, Position::new(50.0, 50.0));
    }

    #[test]
    fn output_stays_in_bounds_across_a_sweep() {
        let container = Rect::new(640.0, 1382.0);
        let element = Rect::new(96.0, 96.0);
        let mut dx = -1000.0;
        while dx <= 1000.0 {
            let pos = normalize(DragOffset { dx, dy: -dx }, container, element);
            assert!((0.0..=100.0).contains(&pos.x), "x out of range for dx={dx}");
            assert!((0.0..=100.0).contains(&pos.y), "y out of range for dx={dx}");
            dx += 37.5;
        }
    }

    #[test]
    fn element_wider_than_container_still_bounded() {
        let pos = normalize(
            DragOffset { dx: 10.0, dy: 0.0 },
            Rect::new(100.0, 100.0),
            Rect::new(150.0, 10.0),
        );
        assert!((0.0..=100.0).contains(&pos.x));
    }
}
