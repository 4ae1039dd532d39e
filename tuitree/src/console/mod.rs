//! Terminal I/O providers.

mod memory;
mod terminal;

use std::io;
use std::time::Duration;

pub use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub use memory::{ConsoleOp, MemoryConsole};
pub use terminal::CrosstermConsole;

use crate::types::{Color, Size};

/// The screen the renderer writes to and the loop reads keys from.
///
/// Colour setters treat `None` as "leave the current colour alone".
pub trait Console {
    fn set_cursor_position(&mut self, x: i32, y: i32) -> io::Result<()>;

    fn write(&mut self, text: &str) -> io::Result<()>;

    fn clear(&mut self) -> io::Result<()>;

    fn set_background_color(&mut self, color: Option<Color>) -> io::Result<()>;

    fn set_foreground_color(&mut self, color: Option<Color>) -> io::Result<()>;

    fn window_size(&self) -> io::Result<Size>;

    /// Wait up to `timeout` for input.
    fn key_available(&mut self, timeout: Duration) -> io::Result<bool>;

    /// Next key press, or `None` when the pending event was not a key.
    fn read_key(&mut self) -> io::Result<Option<KeyEvent>>;

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;
}
