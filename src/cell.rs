//! Cell accumulation for the scanline rasterizer
//!
//! Edges are walked in 24.8 fixed point. Every pixel cell an edge crosses
//! receives a `cover` (signed height of the edge inside the cell) and an
//! `area` (twice the signed area left of the edge, times the subpixel
//! scale). The sweep turns these into per pixel coverage.

use crate::POLY_SUBPIXEL_MASK;
use crate::POLY_SUBPIXEL_SCALE;
use crate::POLY_SUBPIXEL_SHIFT;

/// Edges longer than this, in x, are split in half to keep the
/// intermediate products inside i64
const DX_LIMIT: i64 = 16384 << POLY_SUBPIXEL_SHIFT;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
    pub cover: i64,
    pub area: i64,
}

impl Cell {
    fn at(x: i64, y: i64) -> Self {
        Cell { x, y, cover: 0, area: 0 }
    }
    fn is_empty(&self) -> bool {
        self.cover == 0 && self.area == 0
    }
}

#[derive(Debug)]
pub struct RasterizerCell {
    cells: Vec<Cell>,
    curr: Cell,
    sorted: bool,
}

impl Default for RasterizerCell {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterizerCell {
    pub fn new() -> Self {
        Self {
            cells: vec![],
            curr: Cell::at(i64::MAX, i64::MAX),
            sorted: false,
        }
    }
    pub fn reset(&mut self) {
        *self = Self::new();
    }
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }
    /// Flush the current cell and order all cells by row, then column
    pub fn sort_cells(&mut self) {
        if self.sorted {
            return;
        }
        self.add_curr_cell();
        self.curr = Cell::at(i64::MAX, i64::MAX);
        self.cells.sort_by_key(|c| (c.y, c.x));
        self.sorted = true;
    }
    /// Sorted cells, only valid after [`sort_cells`](Self::sort_cells)
    pub fn cells(&self) -> &[Cell] {
        debug_assert!(self.sorted);
        &self.cells
    }
    fn add_curr_cell(&mut self) {
        if !self.curr.is_empty() {
            self.cells.push(self.curr);
        }
    }
    fn set_curr_cell(&mut self, x: i64, y: i64) {
        if self.curr.x != x || self.curr.y != y {
            self.add_curr_cell();
            self.curr = Cell::at(x, y);
        }
    }
    fn incr(&mut self, cover: i64, area: i64) {
        self.curr.cover += cover;
        self.curr.area += area;
    }

    /// Accumulate an edge lying within row `ey`
    ///
    /// `y1` and `y2` are the fractional heights inside the row
    fn render_hline(&mut self, ey: i64, x1: i64, y1: i64, x2: i64, y2: i64) {
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let fx1 = x1 & POLY_SUBPIXEL_MASK;
        let fx2 = x2 & POLY_SUBPIXEL_MASK;

        // Horizontal edges carry no cover
        if y1 == y2 {
            self.set_curr_cell(ex2, ey);
            return;
        }
        // Single cell
        if ex1 == ex2 {
            let delta = y2 - y1;
            self.incr(delta, (fx1 + fx2) * delta);
            return;
        }
        // Run of adjacent cells in the same row
        let (mut p, first, incr, dx) = if x2 - x1 < 0 {
            (fx1 * (y2 - y1), 0, -1, x1 - x2)
        } else {
            ((POLY_SUBPIXEL_SCALE - fx1) * (y2 - y1), POLY_SUBPIXEL_SCALE, 1, x2 - x1)
        };
        let mut delta = p / dx;
        let mut xmod = p % dx;
        if xmod < 0 {
            delta -= 1;
            xmod += dx;
        }
        self.incr(delta, (fx1 + first) * delta);

        let mut ex1 = ex1 + incr;
        self.set_curr_cell(ex1, ey);
        let mut y1 = y1 + delta;

        if ex1 != ex2 {
            p = POLY_SUBPIXEL_SCALE * (y2 - y1 + delta);
            let mut lift = p / dx;
            let mut rem = p % dx;
            if rem < 0 {
                lift -= 1;
                rem += dx;
            }
            xmod -= dx;
            while ex1 != ex2 {
                delta = lift;
                xmod += rem;
                if xmod >= 0 {
                    xmod -= dx;
                    delta += 1;
                }
                self.incr(delta, POLY_SUBPIXEL_SCALE * delta);
                y1 += delta;
                ex1 += incr;
                self.set_curr_cell(ex1, ey);
            }
        }
        delta = y2 - y1;
        self.incr(delta, (fx2 + POLY_SUBPIXEL_SCALE - first) * delta);
    }

    /// Accumulate the edge (`x1`,`y1`) -> (`x2`,`y2`), in subpixel units
    pub fn line(&mut self, x1: i64, y1: i64, x2: i64, y2: i64) {
        let dx = x2 - x1;
        if dx >= DX_LIMIT || dx <= -DX_LIMIT {
            let cx = (x1 + x2) / 2;
            let cy = (y1 + y2) / 2;
            self.line(x1, y1, cx, cy);
            self.line(cx, cy, x2, y2);
            return;
        }
        self.sorted = false;
        let dy = y2 - y1;
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let ey1 = y1 >> POLY_SUBPIXEL_SHIFT;
        let ey2 = y2 >> POLY_SUBPIXEL_SHIFT;
        let fy1 = y1 & POLY_SUBPIXEL_MASK;
        let fy2 = y2 & POLY_SUBPIXEL_MASK;

        self.set_curr_cell(ex1, ey1);

        // Everything within one row
        if ey1 == ey2 {
            self.render_hline(ey1, x1, fy1, x2, fy2);
            return;
        }

        // Vertical edge, one cell per row
        if dx == 0 {
            let two_fx = (x1 - (ex1 << POLY_SUBPIXEL_SHIFT)) << 1;
            let (first, incr) = if dy < 0 { (0, -1) } else { (POLY_SUBPIXEL_SCALE, 1) };

            let delta = first - fy1;
            self.incr(delta, two_fx * delta);

            let mut ey = ey1 + incr;
            self.set_curr_cell(ex1, ey);
            let delta = first + first - POLY_SUBPIXEL_SCALE;
            while ey != ey2 {
                self.incr(delta, two_fx * delta);
                ey += incr;
                self.set_curr_cell(ex1, ey);
            }
            let delta = fy2 - POLY_SUBPIXEL_SCALE + first;
            self.incr(delta, two_fx * delta);
            return;
        }

        // General edge, split into one horizontal run per row
        let (p, first, incr, dy) = if dy < 0 {
            (fy1 * dx, 0, -1, -dy)
        } else {
            ((POLY_SUBPIXEL_SCALE - fy1) * dx, POLY_SUBPIXEL_SCALE, 1, dy)
        };
        let mut delta = p / dy;
        let mut xmod = p % dy;
        if xmod < 0 {
            delta -= 1;
            xmod += dy;
        }
        let mut x_from = x1 + delta;
        self.render_hline(ey1, x1, fy1, x_from, first);

        let mut ey = ey1 + incr;
        self.set_curr_cell(x_from >> POLY_SUBPIXEL_SHIFT, ey);
        if ey != ey2 {
            let p = POLY_SUBPIXEL_SCALE * dx;
            let mut lift = p / dy;
            let mut rem = p % dy;
            if rem < 0 {
                lift -= 1;
                rem += dy;
            }
            xmod -= dy;
            while ey != ey2 {
                delta = lift;
                xmod += rem;
                if xmod >= 0 {
                    xmod -= dy;
                    delta += 1;
                }
                let x_to = x_from + delta;
                self.render_hline(ey, x_from, POLY_SUBPIXEL_SCALE - first, x_to, first);
                x_from = x_to;
                ey += incr;
                self.set_curr_cell(x_from >> POLY_SUBPIXEL_SHIFT, ey);
            }
        }
        self.render_hline(ey, x_from, POLY_SUBPIXEL_SCALE - first, x2, fy2);
    }
}
