mod color;
mod enums;
mod geometry;
mod thickness;

pub use color::{Color, ColorPair, ColorPoint};
pub use enums::{Border, Dock, HorizontalAlignment, Orientation, TextAlign, VerticalAlignment};
pub use geometry::{Point, Rect, Size};
pub use thickness::Thickness;
