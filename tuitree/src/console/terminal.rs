use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    queue,
    style::{
        Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal,
};

use super::Console;
use crate::types::{Color, Size};

/// Real terminal in raw mode on the alternate screen.
///
/// Commands are queued and reach the terminal on [`Console::flush`]. The
/// terminal is restored when the console is dropped.
pub struct CrosstermConsole {
    stdout: io::Stdout,
}

impl CrosstermConsole {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetAttribute(Attribute::Reset)
        )?;
        stdout.flush()?;

        Ok(Self { stdout })
    }
}

fn to_crossterm(color: Color) -> CtColor {
    match color {
        Color::Black => CtColor::Black,
        Color::DarkBlue => CtColor::DarkBlue,
        Color::DarkGreen => CtColor::DarkGreen,
        Color::DarkCyan => CtColor::DarkCyan,
        Color::DarkRed => CtColor::DarkRed,
        Color::DarkMagenta => CtColor::DarkMagenta,
        Color::DarkYellow => CtColor::DarkYellow,
        Color::Gray => CtColor::Grey,
        Color::DarkGray => CtColor::DarkGrey,
        Color::Blue => CtColor::Blue,
        Color::Green => CtColor::Green,
        Color::Cyan => CtColor::Cyan,
        Color::Red => CtColor::Red,
        Color::Magenta => CtColor::Magenta,
        Color::Yellow => CtColor::Yellow,
        Color::White => CtColor::White,
        Color::Rgb { r, g, b } => CtColor::Rgb { r, g, b },
    }
}

fn to_u16(value: i32) -> u16 {
    value.clamp(0, i32::from(u16::MAX)) as u16
}

impl Console for CrosstermConsole {
    fn set_cursor_position(&mut self, x: i32, y: i32) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(to_u16(x), to_u16(y)))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        queue!(self.stdout, Print(text))
    }

    fn clear(&mut self) -> io::Result<()> {
        queue!(self.stdout, terminal::Clear(terminal::ClearType::All))
    }

    fn set_background_color(&mut self, color: Option<Color>) -> io::Result<()> {
        match color {
            Some(color) => queue!(self.stdout, SetBackgroundColor(to_crossterm(color))),
            None => Ok(()),
        }
    }

    fn set_foreground_color(&mut self, color: Option<Color>) -> io::Result<()> {
        match color {
            Some(color) => queue!(self.stdout, SetForegroundColor(to_crossterm(color))),
            None => Ok(()),
        }
    }

    fn window_size(&self) -> io::Result<Size> {
        let (width, height) = terminal::size()?;
        Ok(Size::saturating(i32::from(width), i32::from(height)))
    }

    fn key_available(&mut self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    fn read_key(&mut self) -> io::Result<Option<KeyEvent>> {
        match event::read()? {
            // Release and repeat events arrive on some platforms; only presses count.
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            _ => Ok(None),
        }
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            queue!(self.stdout, cursor::Show)
        } else {
            queue!(self.stdout, cursor::Hide)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

impl Drop for CrosstermConsole {
    fn drop(&mut self) {
        let _ = queue!(
            self.stdout,
            SetAttribute(Attribute::Reset),
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = self.stdout.flush();
        let _ = terminal::disable_raw_mode();
    }
}
