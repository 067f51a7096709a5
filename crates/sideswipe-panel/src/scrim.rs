//! Scrim and content-clip calculation for the draw pass.
//!
//! The container does no rendering itself; the host asks for a clip rect
//! when drawing the content child and for a scrim layer to composite above
//! it, both derived from the drawer's current position.

use sideswipe_core::{HorizontalEdge, Rect};

use crate::container::{SideSwipeLayout, DRAWER_INDEX};

/// A solid fill the host composites over the content child.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrimLayer {
    pub rect: Rect,
    /// Premixed 0xAARRGGBB: the configured scrim color with its alpha scaled
    /// by the drawer's slide offset.
    pub color: u32,
}

/// Scales the alpha channel of `base` by `opacity`, leaving RGB untouched.
pub fn scrim_argb(base: u32, opacity: f32) -> u32 {
    let base_alpha = (base >> 24) as f32;
    let alpha = (base_alpha * opacity.clamp(0.0, 1.0)) as u32;
    (alpha << 24) | (base & 0x00FF_FFFF)
}

impl SideSwipeLayout {
    /// Scrim strength over the content, 0 (clear) to 1 (full scrim color).
    /// Tracks the drawer's slide offset directly.
    pub fn scrim_opacity(&self) -> f32 {
        self.state
            .children
            .get(DRAWER_INDEX)
            .map(|c| c.params.on_screen)
            .unwrap_or(0.0)
    }

    /// Region the content child should be clipped to while drawing, or
    /// `None` when nothing occludes it. An opaque drawer covers part of the
    /// content, so pixels under it need not be drawn at all.
    pub fn content_clip(&self) -> Option<Rect> {
        let drawer = self.state.children.get(DRAWER_INDEX)?;
        if !drawer.visible || !drawer.opaque_background {
            return None;
        }
        let container = self.state.container_size;
        let mut clip_left = 0.0f32;
        let mut clip_right = container.width;
        match self.state.drawer_edge() {
            // Anchored left: content starts where the drawer ends.
            HorizontalEdge::Left => {
                clip_left = clip_left.max(drawer.frame.right());
            }
            HorizontalEdge::Right => {
                clip_right = clip_right.min(drawer.frame.x);
            }
        }
        Some(Rect::new(
            clip_left,
            0.0,
            (clip_right - clip_left).max(0.0),
            container.height,
        ))
    }

    /// The scrim to draw over the content this frame, or `None` when the
    /// drawer is fully closed.
    pub fn scrim_layer(&self) -> Option<ScrimLayer> {
        let opacity = self.scrim_opacity();
        if opacity <= 0.0 {
            return None;
        }
        let container = self.state.container_size;
        let rect = self.content_clip().unwrap_or(Rect::new(
            0.0,
            0.0,
            container.width,
            container.height,
        ));
        Some(ScrimLayer {
            rect,
            color: scrim_argb(self.state.scrim_color, opacity),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::DEFAULT_SCRIM_COLOR;

    #[test]
    fn scrim_alpha_scales_with_opacity() {
        assert_eq!(scrim_argb(DEFAULT_SCRIM_COLOR, 0.0), 0x0000_0000);
        assert_eq!(scrim_argb(DEFAULT_SCRIM_COLOR, 1.0), DEFAULT_SCRIM_COLOR);
        let half = scrim_argb(DEFAULT_SCRIM_COLOR, 0.5);
        assert_eq!(half >> 24, 0x99 / 2);
        assert_eq!(half & 0x00FF_FFFF, 0x00_0000);
    }

    #[test]
    fn scrim_preserves_rgb_channels() {
        let tinted = scrim_argb(0xFF33_6699, 0.25);
        assert_eq!(tinted & 0x00FF_FFFF, 0x0033_6699);
        assert_eq!(tinted >> 24, 0x3F);
    }

    #[test]
    fn opacity_out_of_range_is_clamped() {
        assert_eq!(scrim_argb(DEFAULT_SCRIM_COLOR, 2.0), DEFAULT_SCRIM_COLOR);
        assert_eq!(scrim_argb(DEFAULT_SCRIM_COLOR, -1.0), 0);
    }
}
