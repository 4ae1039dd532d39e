use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::KeyEvent;
use unicode_width::UnicodeWidthChar;

use super::Console;
use crate::drawing::{Grid, CONTINUATION};
use crate::types::{Color, ColorPoint, Point, Size};

/// One call made against a [`MemoryConsole`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleOp {
    MoveTo(i32, i32),
    Write(String),
    Clear,
    Background(Color),
    Foreground(Color),
    CursorVisible(bool),
    Flush,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ScreenCell {
    ch: char,
    colors: ColorPoint,
}

const BLANK: ScreenCell = ScreenCell {
    ch: ' ',
    colors: ColorPoint::new(None, None),
};

/// In-memory terminal that keeps a screen image and a log of every call.
#[derive(Debug, Clone)]
pub struct MemoryConsole {
    screen: Grid<ScreenCell>,
    cursor: Point,
    colors: ColorPoint,
    cursor_visible: bool,
    ops: Vec<ConsoleOp>,
    keys: VecDeque<KeyEvent>,
}

impl MemoryConsole {
    pub fn new(width: i32, height: i32) -> Self {
        let size = Size::saturating(width, height);
        Self {
            screen: Grid::new(size.width(), size.height(), BLANK),
            cursor: Point::ORIGIN,
            colors: ColorPoint::default(),
            cursor_visible: true,
            ops: Vec::new(),
            keys: VecDeque::new(),
        }
    }

    /// Change the window size; the screen image is blanked.
    pub fn resize(&mut self, width: i32, height: i32) {
        let size = Size::saturating(width, height);
        self.screen = Grid::new(size.width(), size.height(), BLANK);
    }

    pub fn ops(&self) -> &[ConsoleOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<ConsoleOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn write_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, ConsoleOp::Write(_)))
            .count()
    }

    pub fn clear_count(&self) -> usize {
        self.ops.iter().filter(|op| **op == ConsoleOp::Clear).count()
    }

    /// Queue a key for [`Console::read_key`].
    pub fn push_key(&mut self, key: KeyEvent) {
        self.keys.push_back(key);
    }

    pub fn char_at(&self, x: i32, y: i32) -> Option<char> {
        self.screen.get(x, y).map(|cell| cell.ch)
    }

    pub fn colors_at(&self, x: i32, y: i32) -> Option<ColorPoint> {
        self.screen.get(x, y).map(|cell| cell.colors)
    }

    /// Text of one screen row, without continuation cells.
    pub fn row_text(&self, y: i32) -> String {
        (0..self.screen.width())
            .filter_map(|x| self.char_at(x, y))
            .filter(|ch| *ch != CONTINUATION)
            .collect()
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }
}

impl Console for MemoryConsole {
    fn set_cursor_position(&mut self, x: i32, y: i32) -> io::Result<()> {
        self.ops.push(ConsoleOp::MoveTo(x, y));
        self.cursor = Point::new(x, y);
        Ok(())
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.ops.push(ConsoleOp::Write(text.to_string()));
        for ch in text.chars() {
            let width = ch.width().unwrap_or(0) as i32;
            if width == 0 {
                continue;
            }
            let colors = self.colors;
            self.screen.set(self.cursor.x, self.cursor.y, ScreenCell { ch, colors });
            if width == 2 {
                let ch = CONTINUATION;
                self.screen
                    .set(self.cursor.x + 1, self.cursor.y, ScreenCell { ch, colors });
            }
            self.cursor.x += width;
        }
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.ops.push(ConsoleOp::Clear);
        self.screen.fill(BLANK);
        Ok(())
    }

    fn set_background_color(&mut self, color: Option<Color>) -> io::Result<()> {
        if let Some(color) = color {
            self.ops.push(ConsoleOp::Background(color));
            self.colors.background = Some(color);
        }
        Ok(())
    }

    fn set_foreground_color(&mut self, color: Option<Color>) -> io::Result<()> {
        if let Some(color) = color {
            self.ops.push(ConsoleOp::Foreground(color));
            self.colors.foreground = Some(color);
        }
        Ok(())
    }

    fn window_size(&self) -> io::Result<Size> {
        Ok(Size::saturating(self.screen.width(), self.screen.height()))
    }

    fn key_available(&mut self, _timeout: Duration) -> io::Result<bool> {
        Ok(!self.keys.is_empty())
    }

    fn read_key(&mut self) -> io::Result<Option<KeyEvent>> {
        Ok(self.keys.pop_front())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.ops.push(ConsoleOp::CursorVisible(visible));
        self.cursor_visible = visible;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.ops.push(ConsoleOp::Flush);
        Ok(())
    }
}
