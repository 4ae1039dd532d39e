/// A terminal colour: one of the 16 console colours or a 24-bit value.
///
/// Unset colours are modelled as `Option<Color>::None` everywhere; they
/// inherit from the parent control at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    Gray,
    DarkGray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }

    /// Convert a perceptual OKLCH colour to its nearest sRGB value.
    pub fn oklch(l: f32, c: f32, h: f32) -> Self {
        let rgb = oklch_to_rgb(l, c, h);
        Self::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

/// A (background, foreground) pair as stored in a drawing context.
///
/// Either component may be unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorPoint {
    pub background: Option<Color>,
    pub foreground: Option<Color>,
}

impl ColorPoint {
    pub const fn new(background: Option<Color>, foreground: Option<Color>) -> Self {
        Self {
            background,
            foreground,
        }
    }

    pub const fn is_resolved(&self) -> bool {
        self.background.is_some() && self.foreground.is_some()
    }

    /// Fill unset components from `fallback`, component by component.
    pub fn or(self, fallback: ColorPoint) -> ColorPoint {
        ColorPoint {
            background: self.background.or(fallback.background),
            foreground: self.foreground.or(fallback.foreground),
        }
    }
}

/// A fully resolved colour pair, the unit of run batching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorPair {
    pub background: Color,
    pub foreground: Color,
}

impl ColorPair {
    pub const fn new(background: Color, foreground: Color) -> Self {
        Self {
            background,
            foreground,
        }
    }
}

impl Default for ColorPair {
    fn default() -> Self {
        Self::new(Color::Black, Color::White)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rgb8 {
    r: u8,
    g: u8,
    b: u8,
}

fn oklch_to_rgb(l: f32, c: f32, h: f32) -> Rgb8 {
    use palette::{IntoColor, Oklch, Srgb};

    let oklch = Oklch::new(l, c, h);
    let srgb: Srgb = oklch.into_color();
    let (r, g, b) = srgb.into_format::<u8>().into_components();

    Rgb8 { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_component_wise() {
        let own = ColorPoint::new(None, Some(Color::Yellow));
        let parent = ColorPoint::new(Some(Color::DarkBlue), Some(Color::White));
        assert_eq!(
            own.or(parent),
            ColorPoint::new(Some(Color::DarkBlue), Some(Color::Yellow))
        );
    }

    #[test]
    fn oklch_produces_rgb() {
        assert!(matches!(Color::oklch(0.3, 0.1, 250.0), Color::Rgb { .. }));
    }
}
