//! Scanlines
//!
//! A scanline is one pixel row of rasterizer output: runs of pixels and
//! the coverage for each of them.

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Span {
    /// First pixel of the run
    pub x: i64,
    /// Coverage, one value per pixel
    pub covers: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct ScanlineU8 {
    last_x: Option<i64>,
    pub spans: Vec<Span>,
    pub y: i64,
}

impl ScanlineU8 {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn reset_spans(&mut self) {
        self.last_x = None;
        self.spans.clear();
    }
    pub fn finalize(&mut self, y: i64) {
        self.y = y;
    }
    pub fn num_spans(&self) -> usize {
        self.spans.len()
    }
    fn extends_last(&self, x: i64) -> bool {
        self.last_x == Some(x - 1) && !self.spans.is_empty()
    }
    /// Add `len` pixels starting at `x`, all with the same `cover`
    pub fn add_span(&mut self, x: i64, len: i64, cover: u8) {
        if len <= 0 {
            return;
        }
        if self.extends_last(x) {
            if let Some(cur) = self.spans.last_mut() {
                cur.covers.extend(std::iter::repeat(cover).take(len as usize));
            }
        } else {
            self.spans.push(Span { x, covers: vec![cover; len as usize] });
        }
        self.last_x = Some(x + len - 1);
    }
    /// Add a single pixel at `x`
    pub fn add_cell(&mut self, x: i64, cover: u8) {
        self.add_span(x, 1, cover);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_cells_merge_into_one_span() {
        let mut sl = ScanlineU8::new();
        sl.add_cell(3, 10);
        sl.add_span(4, 3, 255);
        sl.add_cell(7, 20);
        sl.add_cell(9, 30);
        assert_eq!(sl.num_spans(), 2);
        assert_eq!(sl.spans[0].x, 3);
        assert_eq!(sl.spans[0].covers, vec![10, 255, 255, 255, 20]);
        assert_eq!(sl.spans[1].x, 9);
        sl.reset_spans();
        assert_eq!(sl.num_spans(), 0);
    }
}
