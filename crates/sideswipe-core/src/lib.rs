//! Layout contracts & math for the sideswipe drawer panel.

mod constraints;
mod geometry;
mod gravity;
pub mod placement;
mod unit;

pub use constraints::*;
pub use geometry::*;
pub use gravity::*;
pub use unit::*;
