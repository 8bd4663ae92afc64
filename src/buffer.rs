//! Rendering buffer

use crate::color::Rgb8;
use crate::math::lerp_u8;

/// Number of color components stored per pixel (red, green, blue)
pub const BPP: usize = 3;

/// Rendering Buffer
///
/// Data is stored as row-major order (C-format), three bytes per pixel.
/// Row 0 is the top of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderingBuffer {
    /// Pixel / Component level data of Image
    pub data: Vec<u8>,
    /// Image Width in pixels
    pub width: usize,
    /// Image Height in pixels
    pub height: usize,
}

impl RenderingBuffer {
    /// Create a new buffer of width, height
    ///
    /// Data for the Image is allocated and set to white
    pub fn new(width: usize, height: usize) -> Self {
        RenderingBuffer {
            width,
            height,
            data: vec![255u8; width * height * BPP],
        }
    }
    /// Size of underlying Rendering Buffer in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }
    /// Buffer holds no pixels
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    /// Set every pixel to `color`
    pub fn fill(&mut self, color: Rgb8) {
        let c = color.components();
        for px in self.data.chunks_exact_mut(BPP) {
            px.copy_from_slice(&c);
        }
    }
    /// Color of pixel at (`x`,`y`)
    ///
    /// # Panics
    ///
    /// If (`x`,`y`) lies outside of the buffer
    pub fn pixel(&self, x: usize, y: usize) -> Rgb8 {
        assert!(x < self.width, "request {} >= {} width :: pixel", x, self.width);
        assert!(y < self.height, "request {} >= {} height :: pixel", y, self.height);
        let i = self.offset(x, y);
        Rgb8::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }
    /// Count pixels which differ from `color`
    pub fn count_not(&self, color: Rgb8) -> usize {
        let c = color.components();
        self.data.chunks_exact(BPP).filter(|px| *px != c).count()
    }
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * BPP
    }
    fn blend_pix(&mut self, i: usize, c: &[u8; 3], cover: u8) {
        if cover == 255 {
            self.data[i..i + BPP].copy_from_slice(c);
        } else {
            for k in 0..BPP {
                self.data[i + k] = lerp_u8(self.data[i + k], c[k], cover);
            }
        }
    }
    /// Blend pixels starting at (`x`,`y`) toward `color`, one coverage
    /// value per pixel
    ///
    /// Pixels outside of the buffer are ignored
    pub fn blend_solid_hspan(&mut self, x: i64, y: i64, color: Rgb8, covers: &[u8]) {
        if y < 0 || y >= self.height as i64 {
            return;
        }
        let c = color.components();
        for (k, &cover) in covers.iter().enumerate() {
            let xi = x + k as i64;
            if xi < 0 || cover == 0 {
                continue;
            }
            if xi >= self.width as i64 {
                break;
            }
            let i = self.offset(xi as usize, y as usize);
            self.blend_pix(i, &c, cover);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_and_read_back() {
        let mut buf = RenderingBuffer::new(3, 2);
        assert_eq!(buf.len(), 18);
        assert_eq!(buf.pixel(2, 1), Rgb8::white());
        buf.fill(Rgb8::new(1, 2, 3));
        assert_eq!(buf.pixel(0, 0), Rgb8::new(1, 2, 3));
        assert_eq!(buf.count_not(Rgb8::new(1, 2, 3)), 0);
    }

    #[test]
    fn blend_clips_to_buffer() {
        let mut buf = RenderingBuffer::new(4, 1);
        buf.blend_solid_hspan(-2, 0, Rgb8::black(), &[255; 10]);
        assert_eq!(buf.count_not(Rgb8::black()), 0);
        buf.blend_solid_hspan(0, 5, Rgb8::white(), &[255; 10]);
        buf.blend_solid_hspan(0, -1, Rgb8::white(), &[255; 10]);
        assert_eq!(buf.count_not(Rgb8::black()), 0);
    }

    #[test]
    fn partial_cover_blends() {
        let mut buf = RenderingBuffer::new(3, 1);
        buf.blend_solid_hspan(-1, 0, Rgb8::black(), &[255, 255, 0, 128]);
        assert_eq!(buf.pixel(0, 0), Rgb8::black());
        assert_eq!(buf.pixel(1, 0), Rgb8::white());
        assert_eq!(buf.pixel(2, 0), Rgb8::gray(127));
    }
}
