//! Drawer placement math.
//!
//! Maps the continuous slide offset (0 = fully hidden, 1 = fully revealed)
//! to the drawer's left pixel and back. `offset_for_left` is the exact
//! inverse of `left_for_offset` up to the rounding applied during placement.

use crate::HorizontalEdge;

/// Left pixel of a fully hidden drawer.
pub fn closed_left(edge: HorizontalEdge, container_width: f32, drawer_width: f32) -> f32 {
    match edge {
        HorizontalEdge::Left => -drawer_width,
        HorizontalEdge::Right => container_width,
    }
}

/// Left pixel of a fully revealed drawer.
pub fn opened_left(edge: HorizontalEdge, container_width: f32, drawer_width: f32) -> f32 {
    match edge {
        HorizontalEdge::Left => 0.0,
        HorizontalEdge::Right => container_width - drawer_width,
    }
}

/// Left pixel for the given slide offset, rounded to whole pixels.
pub fn left_for_offset(
    edge: HorizontalEdge,
    container_width: f32,
    drawer_width: f32,
    offset: f32,
) -> f32 {
    match edge {
        HorizontalEdge::Left => -drawer_width + (drawer_width * offset).round(),
        HorizontalEdge::Right => container_width - (drawer_width * offset).round(),
    }
}

/// Slide offset for the given left pixel. Inverse of `left_for_offset`.
pub fn offset_for_left(
    edge: HorizontalEdge,
    container_width: f32,
    drawer_width: f32,
    left: f32,
) -> f32 {
    if drawer_width <= 0.0 {
        return 0.0;
    }
    match edge {
        HorizontalEdge::Left => (drawer_width + left) / drawer_width,
        HorizontalEdge::Right => (container_width - left) / drawer_width,
    }
}

/// Clamps a dragged left pixel to the drawer's legal travel range.
pub fn clamp_left(edge: HorizontalEdge, container_width: f32, drawer_width: f32, left: f32) -> f32 {
    match edge {
        HorizontalEdge::Left => left.clamp(-drawer_width, 0.0),
        HorizontalEdge::Right => left.clamp(container_width - drawer_width, container_width),
    }
}
