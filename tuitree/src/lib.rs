pub mod console;
pub mod control;
pub mod drawing;
pub mod error;
pub mod focus;
pub mod layout;
pub mod render;
pub mod text;
pub mod types;
pub mod widgets;

pub use console::{
    Console, ConsoleOp, CrosstermConsole, KeyCode, KeyEvent, KeyModifiers, MemoryConsole,
};
pub use control::{
    ChildPlacement, ControlEvent, ControlId, ControlNode, ControlTree, Focusable, Measurable,
    PaintScope, Paintable, Widget,
};
pub use drawing::{DrawingContext, CONTINUATION};
pub use error::{Error, Result};
pub use focus::{collect_focusable, FocusState};
pub use layout::{update_layout, GridCell, GridDefinition, Layout, TrackSize};
pub use render::{FrameStats, InvalidateParameters, RenderSessionId, Renderer};
pub use types::*;
