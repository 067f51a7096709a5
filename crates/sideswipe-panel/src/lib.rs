//! Single-drawer, edge-swipe panel container.
//!
//! A two-child layout surface: `content` (index 0) is the primary child and
//! `drawer` (index 1) is a panel anchored to the left or right edge, driven
//! by pointer gestures and programmatic open/close calls. The container owns
//! the gesture-to-layout state machine; rendering and host event dispatch
//! stay outside. The host feeds [`PointerEvent`]s in, ticks
//! [`SideSwipeLayout::on_frame`] while animations run, and reads back child
//! frames, clip rects and scrim colors each pass.

mod container;
mod drag_helper;
mod events;
mod layout;
mod params;
mod saved_state;
mod scrim;
mod velocity;

pub use container::*;
pub use drag_helper::*;
pub use events::*;
pub use layout::*;
pub use params::*;
pub use saved_state::*;
pub use scrim::*;
pub use velocity::*;

pub use sideswipe_core::{
    Constraints, Dp, EdgeGravity, EdgeInsets, HorizontalEdge, LayoutDirection, PanelGravity,
    Point, Rect, Size, VerticalGravity,
};
