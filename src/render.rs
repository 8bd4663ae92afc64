//! Renderer
//!
//! The [`Canvas`] trait is the drawing surface a [`Map`](crate::Map) paints
//! onto. [`RasterCanvas`] implements it with the anti-aliased scanline
//! rasterizer:
//!
//! ```text
//! path -> clip segments -> stroke outline -> clip edges -> cells -> scanlines -> buffer
//! ```
//!

use crate::buffer::RenderingBuffer;
use crate::clip::Rectangle;
use crate::color::Rgb8;
use crate::raster::RasterizerScanlineAA;
use crate::scan::ScanlineU8;
use crate::stroke::Stroke;

use log::trace;

/// Pixel space drawing surface
pub trait Canvas {
    /// Paint every pixel with `color`
    fn fill_background(&mut self, color: Rgb8);
    /// Draw a line from (`x0`,`y0`) to (`x1`,`y1`), `width` pixels wide
    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb8, width: f64);
    /// Draw the connected path through `points`, `width` pixels wide
    ///
    /// Draws each consecutive pair with [`draw_line`](Self::draw_line)
    /// unless the canvas strokes whole paths itself
    fn draw_path(&mut self, points: &[(f64, f64)], color: Rgb8, width: f64) {
        for w in points.windows(2) {
            self.draw_line(w[0].0, w[0].1, w[1].0, w[1].1, color, width);
        }
    }
}

/// Render rasterized data into a buffer using a single color, Anti-aliased
pub fn render_scanlines_aa_solid(
    ras: &mut RasterizerScanlineAA,
    sl: &mut ScanlineU8,
    buf: &mut RenderingBuffer,
    color: Rgb8,
) {
    if ras.rewind_scanlines() {
        while ras.sweep_scanline(sl) {
            for span in &sl.spans {
                buf.blend_solid_hspan(span.x, sl.y, color, &span.covers);
            }
        }
    }
}

/// Canvas drawing into a [`RenderingBuffer`]
///
///     use linemap::{Canvas, RasterCanvas, Rgb8};
///
///     let mut canvas = RasterCanvas::new(20, 10);
///     canvas.fill_background(Rgb8::white());
///     canvas.draw_line(2.0, 5.0, 18.0, 5.0, Rgb8::black(), 3.0);
///     canvas.draw_path(&[(2.0, 0.0), (2.0, 9.0), (9.0, 9.0)], Rgb8::black(), 1.0);
///     let img = canvas.into_buffer();
///     assert_eq!(img.pixel(10, 5), Rgb8::black());
///     assert_eq!(img.pixel(10, 0), Rgb8::white());
///
#[derive(Debug)]
pub struct RasterCanvas {
    buf: RenderingBuffer,
    ras: RasterizerScanlineAA,
    sl: ScanlineU8,
}

impl RasterCanvas {
    /// Create a canvas of `width` x `height` pixels
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_buffer(RenderingBuffer::new(width, height))
    }
    /// Create a canvas drawing into an existing buffer
    pub fn with_buffer(buf: RenderingBuffer) -> Self {
        Self { buf, ras: RasterizerScanlineAA::new(), sl: ScanlineU8::new() }
    }
    pub fn buffer(&self) -> &RenderingBuffer {
        &self.buf
    }
    pub fn into_buffer(self) -> RenderingBuffer {
        self.buf
    }
    /// Visible region, grown so strokes centered just outside still count
    fn clip_box(&self, stroke: &Stroke) -> Rectangle {
        Rectangle::new(0.0, 0.0, self.buf.width as f64, self.buf.height as f64)
            .expand(stroke.radius() + 1.0)
    }
    /// Add the outline of a run to the rasterizer, returns 1 if it had one
    fn add_run(&mut self, stroke: &Stroke, run: &[(f64, f64)]) -> usize {
        if run.len() < 2 {
            return 0;
        }
        self.ras.add_polygon(&stroke.path(run));
        1
    }
}

impl Canvas for RasterCanvas {
    fn fill_background(&mut self, color: Rgb8) {
        self.buf.fill(color);
    }
    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb8, width: f64) {
        self.draw_path(&[(x0, y0), (x1, y1)], color, width);
    }
    /// Stroke the path as one outline per run of segments near the canvas
    ///
    /// Segments are clipped to the canvas grown by the stroke radius; the
    /// path is split where it leaves that region or has a non-finite point.
    fn draw_path(&mut self, points: &[(f64, f64)], color: Rgb8, width: f64) {
        if width.is_nan() || width <= 0.0 || points.len() < 2 {
            return;
        }
        let stroke = Stroke::new(width);
        let region = self.clip_box(&stroke);
        self.ras.reset();
        self.ras.clip_box(0.0, 0.0, self.buf.width as f64, self.buf.height as f64);

        let mut runs = 0;
        let mut run: Vec<(f64, f64)> = vec![];
        for w in points.windows(2) {
            let ((x0, y0), (x1, y1)) = (w[0], w[1]);
            let clipped = if [x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
                region.clip_segment(x0, y0, x1, y1)
            } else {
                None
            };
            match clipped {
                Some((x0, y0, x1, y1)) => {
                    if run.last() != Some(&(x0, y0)) {
                        runs += self.add_run(&stroke, &run);
                        run.clear();
                        run.push((x0, y0));
                    }
                    run.push((x1, y1));
                }
                None => {
                    runs += self.add_run(&stroke, &run);
                    run.clear();
                }
            }
        }
        runs += self.add_run(&stroke, &run);
        if runs == 0 {
            trace!("path outside of canvas");
            return;
        }
        trace!("draw_path {} points in {} runs, width {}", points.len(), runs, width);
        render_scanlines_aa_solid(&mut self.ras, &mut self.sl, &mut self.buf, color);
    }
}
