//! Colors

use serde::{Deserialize, Serialize};

/// Color as Red, Green, Blue
///
/// Deserializes from and serializes to a `[r, g, b]` triple, which is how
/// colors are written in render configuration files.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb8 {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Rgb8 {
    /// White Color (255,255,255)
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);
    /// Black Color (0,0,0)
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);

    /// Create new color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb8 { r, g, b }
    }
    /// White Color (255,255,255)
    pub fn white() -> Self {
        Self::WHITE
    }
    /// Black Color (0,0,0)
    pub fn black() -> Self {
        Self::BLACK
    }
    /// Gray scale color with all components set to `g`
    pub fn gray(g: u8) -> Self {
        Self::new(g, g, g)
    }
    /// Components as an array, in red, green, blue order
    pub fn components(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from(c: [u8; 3]) -> Rgb8 {
        Rgb8::new(c[0], c[1], c[2])
    }
}
impl From<Rgb8> for [u8; 3] {
    fn from(c: Rgb8) -> [u8; 3] {
        c.components()
    }
}
impl From<(u8, u8, u8)> for Rgb8 {
    fn from(c: (u8, u8, u8)) -> Rgb8 {
        Rgb8::new(c.0, c.1, c.2)
    }
}
