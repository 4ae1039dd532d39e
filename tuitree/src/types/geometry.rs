use std::ops::{Add, Sub};

use crate::error::{Error, Result};

use super::Thickness;

/// A position on the character grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

/// A non-negative extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    width: i32,
    height: i32,
}

impl Size {
    pub const EMPTY: Self = Self {
        width: 0,
        height: 0,
    };

    /// Build a size, failing on a negative dimension.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width < 0 || height < 0 {
            return Err(Error::InvalidGeometry { width, height });
        }
        Ok(Self { width, height })
    }

    /// Build a size from derived arithmetic, clamping negatives to zero.
    pub const fn saturating(width: i32, height: i32) -> Self {
        Self {
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    pub fn set_width(&mut self, width: i32) -> Result<()> {
        *self = Self::new(width, self.height)?;
        Ok(())
    }

    pub fn set_height(&mut self, height: i32) -> Result<()> {
        *self = Self::new(self.width, height)?;
        Ok(())
    }

    pub const fn has_empty_dimension(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Component-wise minimum.
    pub fn min(self, other: Size) -> Size {
        Size::saturating(self.width.min(other.width), self.height.min(other.height))
    }

    /// Component-wise maximum.
    pub fn max(self, other: Size) -> Size {
        Size::saturating(self.width.max(other.width), self.height.max(other.height))
    }

    /// Grow by a thickness, as when adding margin back around content.
    pub fn inflate(self, thickness: Thickness) -> Size {
        Size::saturating(
            self.width.saturating_add(thickness.horizontal()),
            self.height.saturating_add(thickness.vertical()),
        )
    }

    /// Shrink by a thickness, saturating at zero.
    pub fn deflate(self, thickness: Thickness) -> Size {
        Size::saturating(
            self.width.saturating_sub(thickness.horizontal()),
            self.height.saturating_sub(thickness.vertical()),
        )
    }
}

/// An axis-aligned rectangle with a non-negative size.
///
/// `right` and `bottom` are exclusive edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Rect {
    pub const EMPTY: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Result<Self> {
        let size = Size::new(width, height)?;
        Ok(Self::at(Point::new(x, y), size))
    }

    pub const fn at(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    pub const fn from_size(size: Size) -> Self {
        Self::at(Point::ORIGIN, size)
    }

    pub const fn x(&self) -> i32 {
        self.x
    }

    pub const fn y(&self) -> i32 {
        self.y
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    pub const fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    pub const fn left(&self) -> i32 {
        self.x
    }

    pub const fn top(&self) -> i32 {
        self.y
    }

    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub const fn top_left(&self) -> Point {
        Point::new(self.left(), self.top())
    }

    pub const fn top_right(&self) -> Point {
        Point::new(self.right(), self.top())
    }

    pub const fn bottom_left(&self) -> Point {
        Point::new(self.left(), self.bottom())
    }

    pub const fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn set_width(&mut self, width: i32) -> Result<()> {
        let size = Size::new(width, self.height)?;
        self.width = size.width;
        Ok(())
    }

    pub fn set_height(&mut self, height: i32) -> Result<()> {
        let size = Size::new(self.width, height)?;
        self.height = size.height;
        Ok(())
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Translate by `delta`, keeping the size.
    pub fn offset(&self, delta: Point) -> Rect {
        Rect::at(self.top_left() + delta, self.size())
    }

    /// Peel a thickness off all four edges.
    ///
    /// Never produces a negative size, however large the thickness.
    pub fn reduce(&self, thickness: Thickness) -> Rect {
        let left = self.x.saturating_add(thickness.left());
        let top = self.y.saturating_add(thickness.top());
        let right = self.right().saturating_sub(thickness.right());
        let bottom = self.bottom().saturating_sub(thickness.bottom());
        Rect {
            x: left,
            y: top,
            width: right.saturating_sub(left).max(0),
            height: bottom.saturating_sub(top).max(0),
        }
    }

    /// All cells of the rectangle, row-major.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (self.top()..self.bottom())
            .flat_map(move |y| (self.left()..self.right()).map(move |x| Point::new(x, y)))
    }
}
