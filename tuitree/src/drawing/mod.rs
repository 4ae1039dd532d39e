mod context;
mod grid;

pub use context::{DrawingContext, CONTINUATION};
pub use grid::Grid;
