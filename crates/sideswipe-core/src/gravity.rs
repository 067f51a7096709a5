//! Edge gravity and its resolution against the layout direction.
//!
//! Start/End are relative and must be resolved to an absolute Left/Right
//! before any pixel math happens. Resolution is an explicit pure function
//! taking the direction as a parameter; there is no ambient lookup.

/// Horizontal layout direction of the container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Which physical side of the container the drawer is anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizontalEdge {
    Left,
    Right,
}

impl HorizontalEdge {
    pub fn opposite(self) -> Self {
        match self {
            HorizontalEdge::Left => HorizontalEdge::Right,
            HorizontalEdge::Right => HorizontalEdge::Left,
        }
    }
}

impl std::fmt::Display for HorizontalEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HorizontalEdge::Left => f.write_str("LEFT"),
            HorizontalEdge::Right => f.write_str("RIGHT"),
        }
    }
}

/// Declared horizontal gravity of the drawer child.
///
/// `Start`/`End` depend on the layout direction; `Left`/`Right` are absolute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeGravity {
    Left,
    Right,
    Start,
    End,
}

impl EdgeGravity {
    /// Resolves this gravity to an absolute edge for the given direction.
    pub fn resolve(self, direction: LayoutDirection) -> HorizontalEdge {
        match (self, direction) {
            (EdgeGravity::Left, _) => HorizontalEdge::Left,
            (EdgeGravity::Right, _) => HorizontalEdge::Right,
            (EdgeGravity::Start, LayoutDirection::Ltr) => HorizontalEdge::Left,
            (EdgeGravity::Start, LayoutDirection::Rtl) => HorizontalEdge::Right,
            (EdgeGravity::End, LayoutDirection::Ltr) => HorizontalEdge::Right,
            (EdgeGravity::End, LayoutDirection::Rtl) => HorizontalEdge::Left,
        }
    }
}

/// Vertical placement of the drawer within the container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VerticalGravity {
    #[default]
    Top,
    Bottom,
    CenterVertical,
}

/// Full gravity declaration for the drawer child.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelGravity {
    pub edge: EdgeGravity,
    pub vertical: VerticalGravity,
}

impl PanelGravity {
    pub fn new(edge: EdgeGravity) -> Self {
        Self {
            edge,
            vertical: VerticalGravity::Top,
        }
    }

    pub fn with_vertical(mut self, vertical: VerticalGravity) -> Self {
        self.vertical = vertical;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_gravities_ignore_direction() {
        assert_eq!(
            EdgeGravity::Left.resolve(LayoutDirection::Rtl),
            HorizontalEdge::Left
        );
        assert_eq!(
            EdgeGravity::Right.resolve(LayoutDirection::Rtl),
            HorizontalEdge::Right
        );
    }

    #[test]
    fn start_end_follow_direction() {
        assert_eq!(
            EdgeGravity::Start.resolve(LayoutDirection::Ltr),
            HorizontalEdge::Left
        );
        assert_eq!(
            EdgeGravity::Start.resolve(LayoutDirection::Rtl),
            HorizontalEdge::Right
        );
        assert_eq!(
            EdgeGravity::End.resolve(LayoutDirection::Ltr),
            HorizontalEdge::Right
        );
        assert_eq!(
            EdgeGravity::End.resolve(LayoutDirection::Rtl),
            HorizontalEdge::Left
        );
    }
}
