//! Measure and layout passes for the container.

use std::error::Error;
use std::fmt;

use sideswipe_core::{placement, Constraints, Rect, Size, VerticalGravity};

use crate::container::{SideSwipeLayout, CONTENT_INDEX, DRAWER_INDEX};
use crate::params::Dimension;

/// Fallback extent used under non-exact constraints in preview mode.
const PREVIEW_FALLBACK_SIZE: f32 = 300.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The container demands exact constraints outside preview mode.
    UnboundedConstraints,
    /// The container holds exactly two children: content, then drawer.
    WrongChildCount(usize),
    /// The drawer child carries no edge gravity.
    MissingDrawerGravity,
    /// The drag range needs a concrete drawer width up front.
    WrapContentDrawerWidth,
    /// Scrim and clip math assume the drawer fully covers what is under it.
    TranslucentDrawer,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::UnboundedConstraints => {
                write!(f, "panel container must be measured with exact constraints")
            }
            LayoutError::WrongChildCount(count) => {
                write!(
                    f,
                    "panel container requires exactly 2 children (content, drawer), got {count}"
                )
            }
            LayoutError::MissingDrawerGravity => {
                write!(f, "drawer child must declare an edge gravity")
            }
            LayoutError::WrapContentDrawerWidth => {
                write!(f, "drawer child must not request wrap-content width")
            }
            LayoutError::TranslucentDrawer => {
                write!(f, "drawer child must have an opaque background")
            }
        }
    }
}

impl Error for LayoutError {}

impl SideSwipeLayout {
    /// Measure pass. The container insists on exact constraints; in preview
    /// mode loose or unbounded axes fall back to a fixed size instead so
    /// design surfaces can still render something.
    pub fn measure(&mut self, constraints: Constraints) -> Result<Size, LayoutError> {
        let (width, height) = if constraints.is_tight() {
            (constraints.max_width, constraints.max_height)
        } else if self.state.preview_mode {
            let width = if constraints.has_bounded_width() {
                constraints.max_width
            } else {
                PREVIEW_FALLBACK_SIZE
            };
            let height = if constraints.has_bounded_height() {
                constraints.max_height
            } else {
                PREVIEW_FALLBACK_SIZE
            };
            (width, height)
        } else {
            return Err(LayoutError::UnboundedConstraints);
        };

        let count = self.state.children.len();
        if count != 2 {
            return Err(LayoutError::WrongChildCount(count));
        }
        {
            let drawer = &self.state.children[DRAWER_INDEX];
            if drawer.params.gravity.is_none() {
                return Err(LayoutError::MissingDrawerGravity);
            }
            if drawer.params.width == Dimension::WrapContent {
                return Err(LayoutError::WrapContentDrawerWidth);
            }
            if !drawer.opaque_background {
                return Err(LayoutError::TranslucentDrawer);
            }
        }

        self.state.container_size = Size::new(width, height);

        {
            let content = &mut self.state.children[CONTENT_INDEX];
            let margins = content.params.margins;
            content.measured = Size::new(
                (width - margins.horizontal_sum()).max(0.0),
                (height - margins.vertical_sum()).max(0.0),
            );
        }

        let min_margin = self.state.min_drawer_margin;
        {
            let drawer = &mut self.state.children[DRAWER_INDEX];
            let margins = drawer.params.margins;
            // The drawer never spans the full container: the minimum margin
            // keeps a strip of content reachable next to an open drawer, and
            // even an exact request is capped to it.
            let available_width = (width - min_margin - margins.horizontal_sum()).max(0.0);
            let measured_width = match drawer.params.width {
                Dimension::Exact(w) => w.min(available_width),
                Dimension::MatchParent | Dimension::WrapContent => available_width,
            };
            let available_height = (height - margins.vertical_sum()).max(0.0);
            let measured_height = match drawer.params.height {
                Dimension::Exact(h) => h,
                Dimension::MatchParent | Dimension::WrapContent => available_height,
            };
            drawer.measured = Size::new(measured_width, measured_height);
        }

        // Gravity is validated above, so the resolved edge is now stable
        // and the gesture tracker can arm it.
        self.drag.set_tracked_edge(self.state.drawer_edge());

        Ok(Size::new(width, height))
    }

    /// Layout pass: places both children from their measured sizes and the
    /// drawer's current slide offset.
    pub fn layout(&mut self) -> Result<(), LayoutError> {
        let count = self.state.children.len();
        if count != 2 {
            return Err(LayoutError::WrongChildCount(count));
        }
        self.state.in_layout = true;
        let container = self.state.container_size;

        {
            let content = &mut self.state.children[CONTENT_INDEX];
            let margins = content.params.margins;
            content.frame = Rect::from_origin_size(
                sideswipe_core::Point::new(margins.left, margins.top),
                content.measured,
            );
        }

        let edge = self.state.drawer_edge();
        let placed_offset;
        {
            let drawer = &mut self.state.children[DRAWER_INDEX];
            let margins = drawer.params.margins;
            let measured = drawer.measured;
            let offset = drawer.params.on_screen;

            let left =
                placement::left_for_offset(edge, container.width, measured.width, offset);

            let vertical = drawer
                .params
                .gravity
                .map(|g| g.vertical)
                .unwrap_or(VerticalGravity::Top);
            let top = match vertical {
                VerticalGravity::Top => margins.top,
                VerticalGravity::Bottom => container.height - measured.height - margins.bottom,
                VerticalGravity::CenterVertical => {
                    // Margins still win over centering at the extremes.
                    let centered = (container.height - measured.height) / 2.0;
                    let lowest = container.height - measured.height - margins.bottom;
                    centered.min(lowest).max(margins.top)
                }
            };

            drawer.frame = Rect::new(left, top, measured.width, measured.height);

            // Placement rounds to whole pixels; the offset is re-derived from
            // the pixel actually used so the two never drift apart.
            placed_offset =
                placement::offset_for_left(edge, container.width, measured.width, left);
            drawer.visible = placed_offset > 0.0;
        }
        self.state.set_drawer_view_offset(placed_offset);

        self.state.in_layout = false;
        self.state.first_layout = false;
        self.state.needs_layout = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::PanelConfig;
    use crate::params::ChildParams;
    use sideswipe_core::{EdgeGravity, PanelGravity};

    fn panel() -> SideSwipeLayout {
        let mut panel = SideSwipeLayout::new(PanelConfig::default());
        panel.add_child(ChildParams::content(), false);
        panel.add_child(
            ChildParams::drawer(
                PanelGravity::new(EdgeGravity::Left),
                Dimension::Exact(300.0),
            ),
            true,
        );
        panel
    }

    #[test]
    fn measure_rejects_loose_constraints() {
        let mut panel = panel();
        assert_eq!(
            panel.measure(Constraints::loose(1000.0, 600.0)),
            Err(LayoutError::UnboundedConstraints)
        );
    }

    #[test]
    fn preview_mode_falls_back_instead_of_failing() {
        let mut panel = SideSwipeLayout::new(PanelConfig {
            preview_mode: true,
            ..PanelConfig::default()
        });
        panel.add_child(ChildParams::content(), false);
        panel.add_child(
            ChildParams::drawer(
                PanelGravity::new(EdgeGravity::Left),
                Dimension::Exact(300.0),
            ),
            true,
        );
        let size = panel.measure(Constraints::unbounded()).unwrap();
        assert_eq!(size, Size::new(300.0, 300.0));
    }

    #[test]
    fn measure_rejects_wrong_child_count() {
        let mut panel = SideSwipeLayout::new(PanelConfig::default());
        panel.add_child(ChildParams::content(), false);
        assert_eq!(
            panel.measure(Constraints::tight(1000.0, 600.0)),
            Err(LayoutError::WrongChildCount(1))
        );
    }

    #[test]
    fn measure_rejects_drawer_without_gravity() {
        let mut panel = SideSwipeLayout::new(PanelConfig::default());
        panel.add_child(ChildParams::content(), false);
        panel.add_child(ChildParams::content(), true);
        assert_eq!(
            panel.measure(Constraints::tight(1000.0, 600.0)),
            Err(LayoutError::MissingDrawerGravity)
        );
    }

    #[test]
    fn layout_rejects_wrong_child_count() {
        let mut panel = SideSwipeLayout::new(PanelConfig::default());
        panel.add_child(ChildParams::content(), false);
        assert_eq!(
            panel.measure(Constraints::tight(1000.0, 600.0)),
            Err(LayoutError::WrongChildCount(1))
        );
        // The placement pass fails the same way instead of indexing blindly.
        assert_eq!(panel.layout(), Err(LayoutError::WrongChildCount(1)));
    }

    #[test]
    fn measure_rejects_wrap_content_drawer_width() {
        let mut panel = SideSwipeLayout::new(PanelConfig::default());
        panel.add_child(ChildParams::content(), false);
        panel.add_child(
            ChildParams::drawer(
                PanelGravity::new(EdgeGravity::Left),
                Dimension::WrapContent,
            ),
            true,
        );
        assert_eq!(
            panel.measure(Constraints::tight(1000.0, 600.0)),
            Err(LayoutError::WrapContentDrawerWidth)
        );
    }

    #[test]
    fn measure_rejects_translucent_drawer() {
        let mut panel = SideSwipeLayout::new(PanelConfig::default());
        panel.add_child(ChildParams::content(), false);
        panel.add_child(
            ChildParams::drawer(
                PanelGravity::new(EdgeGravity::Left),
                Dimension::Exact(300.0),
            ),
            false,
        );
        assert_eq!(
            panel.measure(Constraints::tight(1000.0, 600.0)),
            Err(LayoutError::TranslucentDrawer)
        );
    }

    #[test]
    fn oversized_exact_drawer_width_is_capped() {
        let mut panel = SideSwipeLayout::new(PanelConfig::default());
        panel.add_child(ChildParams::content(), false);
        panel.add_child(
            ChildParams::drawer(
                PanelGravity::new(EdgeGravity::Left),
                Dimension::Exact(2000.0),
            ),
            true,
        );
        panel.measure(Constraints::tight(1000.0, 600.0)).unwrap();
        panel.layout().unwrap();
        assert_eq!(panel.child_frame(DRAWER_INDEX).width, 1000.0 - 64.0);
    }

    #[test]
    fn closed_drawer_lays_out_off_screen() {
        let mut panel = panel();
        panel.measure(Constraints::tight(1000.0, 600.0)).unwrap();
        panel.layout().unwrap();
        assert_eq!(panel.child_frame(DRAWER_INDEX), Rect::new(-300.0, 0.0, 300.0, 600.0));
        assert_eq!(panel.child_frame(CONTENT_INDEX), Rect::new(0.0, 0.0, 1000.0, 600.0));
        assert!(!panel.child_visible(DRAWER_INDEX));
    }

    #[test]
    fn drawer_opened_before_first_layout_lays_out_on_screen() {
        let mut panel = panel();
        panel.open_drawer(true);
        panel.measure(Constraints::tight(1000.0, 600.0)).unwrap();
        panel.layout().unwrap();
        assert_eq!(panel.child_frame(DRAWER_INDEX).x, 0.0);
        assert!(panel.child_visible(DRAWER_INDEX));
        assert!(panel.is_drawer_open());
    }

    #[test]
    fn match_parent_drawer_keeps_min_margin() {
        let mut panel = SideSwipeLayout::new(PanelConfig::default());
        panel.add_child(ChildParams::content(), false);
        panel.add_child(
            ChildParams::drawer(
                PanelGravity::new(EdgeGravity::Left),
                Dimension::MatchParent,
            ),
            true,
        );
        panel.measure(Constraints::tight(1000.0, 600.0)).unwrap();
        panel.layout().unwrap();
        assert_eq!(panel.child_frame(DRAWER_INDEX).width, 1000.0 - 64.0);
    }
}
