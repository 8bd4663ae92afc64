//! Clipping Region
//!
//! Segments are clipped with Liang-Barsky, see
//! <https://en.wikipedia.org/wiki/Liang-Barsky_algorithm>. Polygon edges
//! entering the rasterizer are clipped by [`Clip`].

use crate::cell::RasterizerCell;
use crate::raster::upscale;

/// Inside Region
const INSIDE: u8 = 0b0000;
/// Left of Region
const LEFT: u8 = 0b0001;
/// Right of Region
const RIGHT: u8 = 0b0010;
/// Below Region
const BOTTOM: u8 = 0b0100;
/// Above Region
const TOP: u8 = 0b1000;

/// Rectangle
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rectangle {
    /// Minimum x value
    pub x1: f64,
    /// Minimum y value
    pub y1: f64,
    /// Maximum x value
    pub x2: f64,
    /// Maximum y value
    pub y2: f64,
}

impl Rectangle {
    /// Create a new Rectangle
    ///
    /// Values are sorted before storing
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let (x1, x2) = if x1 > x2 { (x2, x1) } else { (x1, x2) };
        let (y1, y2) = if y1 > y2 { (y2, y1) } else { (y1, y2) };
        Self { x1, y1, x2, y2 }
    }
    /// Position of (`x`,`y`) relative to the rectangle
    fn clip_flags(&self, x: f64, y: f64) -> u8 {
        let mut code = INSIDE;
        if x < self.x1 {
            code |= LEFT;
        }
        if x > self.x2 {
            code |= RIGHT;
        }
        if y < self.y1 {
            code |= BOTTOM;
        }
        if y > self.y2 {
            code |= TOP;
        }
        code
    }
    /// Grow the rectangle by `d` on every side
    pub fn expand(&self, d: f64) -> Self {
        Self::new(self.x1 - d, self.y1 - d, self.x2 + d, self.y2 + d)
    }
    /// Clip the segment (`x0`,`y0`) -> (`x1`,`y1`) to the rectangle
    ///
    /// Returns `None` if no part of the segment lies inside
    ///
    ///     use linemap::clip::Rectangle;
    ///
    ///     let r = Rectangle::new(0.0, 0.0, 10.0, 10.0);
    ///     assert_eq!(r.clip_segment(-5.0, 5.0, 5.0, 5.0), Some((0.0, 5.0, 5.0, 5.0)));
    ///     assert_eq!(r.clip_segment(-5.0, -1.0, 20.0, -1.0), None);
    ///
    pub fn clip_segment(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> Option<(f64, f64, f64, f64)> {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;
        let edges = [
            (-dx, x0 - self.x1),
            (dx, self.x2 - x0),
            (-dy, y0 - self.y1),
            (dy, self.y2 - y0),
        ];
        for &(p, q) in &edges {
            if p == 0.0 {
                // Parallel to this edge
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
        let a = if t0 > 0.0 { (x0 + t0 * dx, y0 + t0 * dy) } else { (x0, y0) };
        let b = if t1 < 1.0 { (x0 + t1 * dx, y0 + t1 * dy) } else { (x1, y1) };
        Some((a.0, a.1, b.0, b.1))
    }
}

/// Clip Region
///
/// Clipping of polygon edges for the rasterizer. Edges above or below the
/// region are dropped; edges left or right of it are moved onto its border,
/// so the winding of everything inside is kept. Coordinates are pixels and
/// only clipped edges are converted to subpixel units.
#[derive(Debug, Default)]
pub struct Clip {
    /// Current x Point
    x1: f64,
    /// Current y Point
    y1: f64,
    /// Rectangle to clip on
    clip_box: Option<Rectangle>,
    /// Clip flags of the current point
    clip_flag: u8,
}

impl Clip {
    pub fn new() -> Self {
        Self::default()
    }
    /// Define the clipping region
    pub fn clip_box(&mut self, r: Rectangle) {
        self.clip_box = Some(r);
    }
    /// Move to point (`x`,`y`)
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x1 = x;
        self.y1 = y;
        self.clip_flag = self.clip_box.map(|b| b.clip_flags(x, y)).unwrap_or(INSIDE);
    }
    /// Add the edge from the current point to (`x2`,`y2`) to `ras`
    pub fn line_to(&mut self, ras: &mut RasterizerCell, x2: f64, y2: f64) {
        let (x1, y1, f1) = (self.x1, self.y1, self.clip_flag);
        self.x1 = x2;
        self.y1 = y2;
        let Some(b) = self.clip_box else {
            edge(ras, x1, y1, x2, y2);
            return;
        };
        let f2 = b.clip_flags(x2, y2);
        self.clip_flag = f2;

        // Both points above or below
        let fy1 = f1 & (TOP | BOTTOM);
        if fy1 != INSIDE && fy1 == f2 & (TOP | BOTTOM) {
            return;
        }
        let y_at = |x: f64| y1 + (x - x1) * (y2 - y1) / (x2 - x1);
        match (f1 & (LEFT | RIGHT), f2 & (LEFT | RIGHT)) {
            (INSIDE, INSIDE) => line_clip_y(ras, &b, x1, y1, x2, y2, f1, f2),
            (INSIDE, RIGHT) => {
                let y3 = y_at(b.x2);
                let f3 = b.clip_flags(b.x2, y3);
                line_clip_y(ras, &b, x1, y1, b.x2, y3, f1, f3);
                line_clip_y(ras, &b, b.x2, y3, b.x2, y2, f3, f2);
            }
            (RIGHT, INSIDE) => {
                let y3 = y_at(b.x2);
                let f3 = b.clip_flags(b.x2, y3);
                line_clip_y(ras, &b, b.x2, y1, b.x2, y3, f1, f3);
                line_clip_y(ras, &b, b.x2, y3, x2, y2, f3, f2);
            }
            (INSIDE, LEFT) => {
                let y3 = y_at(b.x1);
                let f3 = b.clip_flags(b.x1, y3);
                line_clip_y(ras, &b, x1, y1, b.x1, y3, f1, f3);
                line_clip_y(ras, &b, b.x1, y3, b.x1, y2, f3, f2);
            }
            (LEFT, INSIDE) => {
                let y3 = y_at(b.x1);
                let f3 = b.clip_flags(b.x1, y3);
                line_clip_y(ras, &b, b.x1, y1, b.x1, y3, f1, f3);
                line_clip_y(ras, &b, b.x1, y3, x2, y2, f3, f2);
            }
            (RIGHT, LEFT) => {
                let y3 = y_at(b.x2);
                let y4 = y_at(b.x1);
                let f3 = b.clip_flags(b.x2, y3);
                let f4 = b.clip_flags(b.x1, y4);
                line_clip_y(ras, &b, b.x2, y1, b.x2, y3, f1, f3);
                line_clip_y(ras, &b, b.x2, y3, b.x1, y4, f3, f4);
                line_clip_y(ras, &b, b.x1, y4, b.x1, y2, f4, f2);
            }
            (LEFT, RIGHT) => {
                let y3 = y_at(b.x1);
                let y4 = y_at(b.x2);
                let f3 = b.clip_flags(b.x1, y3);
                let f4 = b.clip_flags(b.x2, y4);
                line_clip_y(ras, &b, b.x1, y1, b.x1, y3, f1, f3);
                line_clip_y(ras, &b, b.x1, y3, b.x2, y4, f3, f4);
                line_clip_y(ras, &b, b.x2, y4, b.x2, y2, f4, f2);
            }
            (LEFT, LEFT) => line_clip_y(ras, &b, b.x1, y1, b.x1, y2, f1, f2),
            // Right, Right
            _ => line_clip_y(ras, &b, b.x2, y1, b.x2, y2, f1, f2),
        }
    }
}

/// Clip an edge along the top and bottom of the region
#[allow(clippy::too_many_arguments)]
fn line_clip_y(ras: &mut RasterizerCell, b: &Rectangle, x1: f64, y1: f64, x2: f64, y2: f64, f1: u8, f2: u8) {
    let f1 = f1 & (TOP | BOTTOM);
    let f2 = f2 & (TOP | BOTTOM);
    if f1 == INSIDE && f2 == INSIDE {
        edge(ras, x1, y1, x2, y2);
        return;
    }
    if f1 == f2 {
        return;
    }
    let x_at = |y: f64| x1 + (y - y1) * (x2 - x1) / (y2 - y1);
    let (mut tx1, mut ty1, mut tx2, mut ty2) = (x1, y1, x2, y2);
    if f1 & BOTTOM != 0 {
        tx1 = x_at(b.y1);
        ty1 = b.y1;
    }
    if f1 & TOP != 0 {
        tx1 = x_at(b.y2);
        ty1 = b.y2;
    }
    if f2 & BOTTOM != 0 {
        tx2 = x_at(b.y1);
        ty2 = b.y1;
    }
    if f2 & TOP != 0 {
        tx2 = x_at(b.y2);
        ty2 = b.y2;
    }
    edge(ras, tx1, ty1, tx2, ty2);
}

fn edge(ras: &mut RasterizerCell, x1: f64, y1: f64, x2: f64, y2: f64) {
    ras.line(upscale(x1), upscale(y1), upscale(x2), upscale(y2));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inside_segment_is_untouched() {
        let r = Rectangle::new(10.0, 10.0, 0.0, 0.0);
        assert_eq!(r.clip_segment(1.0, 2.0, 3.0, 4.0), Some((1.0, 2.0, 3.0, 4.0)));
    }

    #[test]
    fn crossing_segment_is_cut_on_both_ends() {
        let r = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let (ax, ay, bx, by) = r.clip_segment(-10.0, -10.0, 20.0, 20.0).unwrap();
        assert_eq!((ax, ay), (0.0, 0.0));
        assert_eq!((bx, by), (10.0, 10.0));
    }

    #[test]
    fn outside_point_is_rejected() {
        let r = Rectangle::new(0.0, 0.0, 10.0, 10.0).expand(1.0);
        assert_eq!(r.clip_segment(12.0, 5.0, 12.0, 5.0), None);
        assert!(r.clip_segment(10.5, 5.0, 10.5, 5.0).is_some());
    }

    #[test]
    fn flags_name_the_sides() {
        let r = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(r.clip_flags(5.0, 5.0), INSIDE);
        assert_eq!(r.clip_flags(-1.0, 5.0), LEFT);
        assert_eq!(r.clip_flags(11.0, 11.0), RIGHT | TOP);
        assert_eq!(r.clip_flags(5.0, -1.0), BOTTOM);
    }

    #[test]
    fn edges_left_of_the_box_move_onto_its_border() {
        let mut clip = Clip::new();
        clip.clip_box(Rectangle::new(0.0, 0.0, 4.0, 4.0));
        let mut ras = RasterizerCell::new();
        clip.move_to(-100.0, -100.0);
        clip.line_to(&mut ras, -100.0, 100.0);
        ras.sort_cells();
        let cells = ras.cells();
        assert_eq!(cells.len(), 4);
        for (i, c) in cells.iter().enumerate() {
            assert_eq!((c.x, c.y), (0, i as i64));
            assert_eq!(c.area, 0);
        }
    }

    #[test]
    fn edges_above_the_box_are_dropped() {
        let mut clip = Clip::new();
        clip.clip_box(Rectangle::new(0.0, 0.0, 4.0, 4.0));
        let mut ras = RasterizerCell::new();
        clip.move_to(-1e17, 10.0);
        clip.line_to(&mut ras, 1e17, 12.0);
        clip.line_to(&mut ras, 2.0, -5.0);
        ras.sort_cells();
        // Only the part crossing the box, from y = 4 down to y = 0
        let rows: Vec<i64> = ras.cells().iter().map(|c| c.y).collect();
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|&y| (0..4).contains(&y)));
    }
}
