use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Repr {
    Uniform(i32),
    Sides {
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
    },
}

/// Edge widths for margin, padding and borders.
///
/// Equal sides collapse to a single uniform value, so equality is by value
/// regardless of how the thickness was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Thickness(Repr);

impl Default for Thickness {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Thickness {
    pub const EMPTY: Self = Self(Repr::Uniform(0));

    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        if left == top && top == right && right == bottom {
            Self(Repr::Uniform(left))
        } else {
            Self(Repr::Sides {
                left,
                top,
                right,
                bottom,
            })
        }
    }

    pub const fn uniform(value: i32) -> Self {
        Self(Repr::Uniform(value))
    }

    pub const fn symmetric(horizontal: i32, vertical: i32) -> Self {
        Self::new(horizontal, vertical, horizontal, vertical)
    }

    pub const fn is_uniform(&self) -> bool {
        matches!(self.0, Repr::Uniform(_))
    }

    pub const fn left(&self) -> i32 {
        match self.0 {
            Repr::Uniform(v) => v,
            Repr::Sides { left, .. } => left,
        }
    }

    pub const fn top(&self) -> i32 {
        match self.0 {
            Repr::Uniform(v) => v,
            Repr::Sides { top, .. } => top,
        }
    }

    pub const fn right(&self) -> i32 {
        match self.0 {
            Repr::Uniform(v) => v,
            Repr::Sides { right, .. } => right,
        }
    }

    pub const fn bottom(&self) -> i32 {
        match self.0 {
            Repr::Uniform(v) => v,
            Repr::Sides { bottom, .. } => bottom,
        }
    }

    pub const fn horizontal(&self) -> i32 {
        match self.0 {
            Repr::Uniform(v) => v.saturating_mul(2),
            Repr::Sides { left, right, .. } => left.saturating_add(right),
        }
    }

    pub const fn vertical(&self) -> i32 {
        match self.0 {
            Repr::Uniform(v) => v.saturating_mul(2),
            Repr::Sides { top, bottom, .. } => top.saturating_add(bottom),
        }
    }
}

impl Add for Thickness {
    type Output = Thickness;

    fn add(self, rhs: Thickness) -> Thickness {
        match (self.0, rhs.0) {
            (Repr::Uniform(a), Repr::Uniform(b)) => Thickness::uniform(a.saturating_add(b)),
            _ => Thickness::new(
                self.left().saturating_add(rhs.left()),
                self.top().saturating_add(rhs.top()),
                self.right().saturating_add(rhs.right()),
                self.bottom().saturating_add(rhs.bottom()),
            ),
        }
    }
}

impl Sub for Thickness {
    type Output = Thickness;

    fn sub(self, rhs: Thickness) -> Thickness {
        match (self.0, rhs.0) {
            (Repr::Uniform(a), Repr::Uniform(b)) => Thickness::uniform(a.saturating_sub(b)),
            _ => Thickness::new(
                self.left().saturating_sub(rhs.left()),
                self.top().saturating_sub(rhs.top()),
                self.right().saturating_sub(rhs.right()),
                self.bottom().saturating_sub(rhs.bottom()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_sides_collapse_to_uniform() {
        let t = Thickness::new(2, 2, 2, 2);
        assert!(t.is_uniform());
        assert_eq!(t, Thickness::uniform(2));
        assert_eq!(t.horizontal(), 4);
    }

    #[test]
    fn composition() {
        let margin = Thickness::uniform(1);
        let padding = Thickness::new(0, 2, 0, 0);
        let sum = margin + padding;
        assert_eq!(sum, Thickness::new(1, 3, 1, 1));
        assert_eq!(sum.vertical(), 4);
        assert_eq!(sum - padding, margin);
    }
}
