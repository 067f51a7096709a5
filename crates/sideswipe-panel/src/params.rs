//! Per-child layout parameters.

use sideswipe_core::{EdgeInsets, PanelGravity};

/// Requested extent of a child along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Dimension {
    #[default]
    MatchParent,
    WrapContent,
    Exact(f32),
}

/// Where the drawer is in its open/close lifecycle.
///
/// `Opening`/`Closing` are set while an animated transition is in flight;
/// the terminal states are only entered when the drawer actually reaches
/// offset 1 or 0 at gesture-idle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OpenState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

/// Layout parameters attached to each child of the container.
///
/// The continuous slide offset (`on_screen`), the open lifecycle state and
/// the peek flag are owned by the container's state machine; hosts read them
/// through the accessors but never mutate them directly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChildParams {
    pub gravity: Option<PanelGravity>,
    pub width: Dimension,
    pub height: Dimension,
    pub margins: EdgeInsets,
    pub(crate) on_screen: f32,
    pub(crate) open_state: OpenState,
    pub(crate) is_peeking: bool,
}

impl ChildParams {
    /// Parameters for the primary content child: fills the container.
    pub fn content() -> Self {
        Self {
            gravity: None,
            width: Dimension::MatchParent,
            height: Dimension::MatchParent,
            margins: EdgeInsets::default(),
            on_screen: 0.0,
            open_state: OpenState::Closed,
            is_peeking: false,
        }
    }

    /// Parameters for the drawer child anchored by `gravity`.
    pub fn drawer(gravity: PanelGravity, width: Dimension) -> Self {
        Self {
            gravity: Some(gravity),
            width,
            ..Self::content()
        }
    }

    pub fn with_margins(mut self, margins: EdgeInsets) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_height(mut self, height: Dimension) -> Self {
        self.height = height;
        self
    }

    /// Continuous slide offset: 0 = fully hidden, 1 = fully revealed.
    pub fn on_screen(&self) -> f32 {
        self.on_screen
    }

    pub fn open_state(&self) -> OpenState {
        self.open_state
    }

    /// True while an edge touch has partially revealed the drawer without a
    /// committed drag.
    pub fn is_peeking(&self) -> bool {
        self.is_peeking
    }
}
