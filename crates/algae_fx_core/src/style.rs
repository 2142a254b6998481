//! Color palette for the aquatic brand look.
//!
//! Teal and cyan accents over white, translucent gradients for cells and
//! bubbles.

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Deep teal, used for headings and tooltip titles (#006064).
    pub const DEEP_TEAL: Self = Self::rgba(0.0, 0.376, 0.392, 1.0);
    /// Brand green-teal (#38B09D).
    pub const ALGAE: Self = Self::rgba(0.220, 0.690, 0.616, 1.0);
    /// Light aqua (#80DEEA).
    pub const AQUA: Self = Self::rgba(0.502, 0.871, 0.918, 1.0);
    /// Body text charcoal (#263238).
    pub const CHARCOAL: Self = Self::rgba(0.149, 0.196, 0.220, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from a 0xRRGGBB value and an alpha (0-1).
    #[must_use]
    pub fn hex(rgb: u32, alpha: f32) -> Self {
        let channel = |shift: u32| ((rgb >> shift) & 0xFF) as f32 / 255.0;
        Self::rgba(channel(16), channel(8), channel(0), alpha)
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Returns the color with its alpha multiplied by `factor`.
    #[must_use]
    pub fn fade(self, factor: f32) -> Self {
        self.with_alpha(self.a * factor.clamp(0.0, 1.0))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A two-stop diagonal gradient (top-left to bottom-right).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    /// Color at the top-left corner.
    pub from: Color,
    /// Color at the bottom-right corner.
    pub to: Color,
}

impl Gradient {
    /// Creates a gradient.
    #[must_use]
    pub const fn new(from: Color, to: Color) -> Self {
        Self { from, to }
    }

    /// Returns the gradient with both stops faded by `factor`.
    #[must_use]
    pub fn fade(self, factor: f32) -> Self {
        Self::new(self.from.fade(factor), self.to.fade(factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_matches_named_constant() {
        let aqua = Color::hex(0x80_DE_EA, 1.0);
        assert!((aqua.r - Color::AQUA.r).abs() < 0.002);
        assert!((aqua.g - Color::AQUA.g).abs() < 0.002);
        assert!((aqua.b - Color::AQUA.b).abs() < 0.002);
    }

    #[test]
    fn test_fade_clamps() {
        let c = Color::WHITE.with_alpha(0.5).fade(3.0);
        assert!((c.a - 0.5).abs() < f32::EPSILON);
    }
}
