//! Green to yellow to red gradient used to color chart glyphs.

use serde::{Deserialize, Serialize};

/// A 24-bit terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Wrap a glyph in a truecolor foreground escape followed by a reset.
    pub fn paint(&self, glyph: char) -> String {
        format!("\x1b[38;2;{};{};{}m{}\x1b[0m", self.r, self.g, self.b, glyph)
    }
}

/// Map a normalized value to a color on the green, yellow, red gradient.
///
/// Inputs outside `[0, 1]` are clamped; NaN is treated as 0.
pub fn gradient_color(t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

    if t <= 0.5 {
        Rgb::new(channel(255.0 * 2.0 * t), 255, 0)
    } else {
        let u = 2.0 * (t - 0.5);
        Rgb::new(255, channel(255.0 * (1.0 - u)), 0)
    }
}

fn channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
