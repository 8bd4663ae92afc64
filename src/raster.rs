//! Anti-aliased scanline rasterizer
//!
//! Polygons are fed with [`move_to_d`](RasterizerScanlineAA::move_to_d),
//! [`line_to_d`](RasterizerScanlineAA::line_to_d) and
//! [`close_polygon`](RasterizerScanlineAA::close_polygon) in pixel units,
//! then swept row by row into a [`ScanlineU8`]. Filling uses the non-zero
//! winding rule. Edges are clipped to the [`clip_box`](RasterizerScanlineAA::clip_box)
//! before they reach the cells.

use crate::cell::RasterizerCell;
use crate::clip::{Clip, Rectangle};
use crate::scan::ScanlineU8;
use crate::POLY_SUBPIXEL_SCALE;
use crate::POLY_SUBPIXEL_SHIFT;

const AA_SHIFT: i64 = 8;
const AA_MASK: i64 = (1 << AA_SHIFT) - 1;

/// Convert a pixel coordinate to subpixel units
pub fn upscale(v: f64) -> i64 {
    (v * POLY_SUBPIXEL_SCALE as f64).round() as i64
}

#[derive(Debug, PartialEq, Copy, Clone, Default)]
pub enum PathStatus {
    #[default]
    Initial,
    MoveTo,
    LineTo,
    Closed,
}

#[derive(Debug, Default)]
pub struct RasterizerScanlineAA {
    outline: RasterizerCell,
    clipper: Clip,
    status: PathStatus,
    /// Start of the current polygon
    start: (f64, f64),
    /// Index of the next unswept cell
    cursor: usize,
}

impl RasterizerScanlineAA {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn reset(&mut self) {
        self.outline.reset();
        self.status = PathStatus::Initial;
        self.cursor = 0;
    }
    /// Restrict rasterization to a region, in pixels
    pub fn clip_box(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.clipper.clip_box(Rectangle::new(x1, y1, x2, y2));
    }
    pub fn move_to_d(&mut self, x: f64, y: f64) {
        self.close_polygon();
        self.start = (x, y);
        self.clipper.move_to(x, y);
        self.status = PathStatus::MoveTo;
    }
    pub fn line_to_d(&mut self, x: f64, y: f64) {
        self.clipper.line_to(&mut self.outline, x, y);
        self.status = PathStatus::LineTo;
    }
    pub fn close_polygon(&mut self) {
        if self.status == PathStatus::LineTo {
            let (x, y) = self.start;
            self.clipper.line_to(&mut self.outline, x, y);
            self.status = PathStatus::Closed;
        }
    }
    /// Add a closed polygon through `points`
    pub fn add_polygon(&mut self, points: &[(f64, f64)]) {
        let mut iter = points.iter();
        if let Some(&(x, y)) = iter.next() {
            self.move_to_d(x, y);
            for &(x, y) in iter {
                self.line_to_d(x, y);
            }
            self.close_polygon();
        }
    }
    /// Prepare for sweeping, returns false if nothing was rasterized
    pub fn rewind_scanlines(&mut self) -> bool {
        self.close_polygon();
        self.outline.sort_cells();
        self.cursor = 0;
        self.outline.total_cells() != 0
    }
    /// Fill `sl` with the next row holding visible coverage
    ///
    /// Returns false when all rows are exhausted
    pub fn sweep_scanline(&mut self, sl: &mut ScanlineU8) -> bool {
        let cells = self.outline.cells();
        while self.cursor < cells.len() {
            let y = cells[self.cursor].y;
            sl.reset_spans();
            let mut cover = 0;
            let mut i = self.cursor;
            while i < cells.len() && cells[i].y == y {
                let mut x = cells[i].x;
                let mut area = 0;
                // accumulate all cells with the same x
                while i < cells.len() && cells[i].y == y && cells[i].x == x {
                    area += cells[i].area;
                    cover += cells[i].cover;
                    i += 1;
                }
                if area != 0 {
                    let alpha = calculate_alpha((cover << (POLY_SUBPIXEL_SHIFT + 1)) - area);
                    if alpha > 0 {
                        sl.add_cell(x, alpha);
                    }
                    x += 1;
                }
                if i < cells.len() && cells[i].y == y && cells[i].x > x {
                    let alpha = calculate_alpha(cover << (POLY_SUBPIXEL_SHIFT + 1));
                    if alpha > 0 {
                        sl.add_span(x, cells[i].x - x, alpha);
                    }
                }
            }
            self.cursor = i;
            if sl.num_spans() != 0 {
                sl.finalize(y);
                return true;
            }
        }
        false
    }
}

/// Coverage of a pixel from its accumulated area, non-zero rule
fn calculate_alpha(area: i64) -> u8 {
    let cover = (area >> (POLY_SUBPIXEL_SHIFT * 2 + 1 - AA_SHIFT)).abs();
    cover.min(AA_MASK) as u8
}
