//! Primitive widgets: backgrounds, text and bordered frames.

mod frame;
mod label;
mod panel;

pub use frame::Frame;
pub use label::Label;
pub use panel::Panel;
