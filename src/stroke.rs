//! Path Stroking
//!
//! A stroked path is one closed outline: the left side walked forward, a
//! round cap at the end, the right side walked back and a round cap at the
//! start. Outer joins are round, inner joins meet where the offset sides
//! cross. Each pixel is covered once, however many vertices the path has.
//!
//!     use linemap::stroke::Stroke;
//!
//!     let outline = Stroke::new(4.0).path(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
//!     assert!(outline.len() > 6);
//!     for &(x, y) in &outline {
//!         assert!(x >= -2.0 - 1e-9 && x <= 12.0 + 1e-9);
//!         assert!(y >= -2.0 - 1e-9 && y <= 12.0 + 1e-9);
//!     }

use std::f64::consts::PI;

/// Finest arc subdivision, steps per half circle
const MAX_ARC_STEPS: f64 = 512.0;

/// Vertices closer than this are merged
const VERTEX_DIST_EPSILON: f64 = 1e-6;

/// Stroke parameters
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    /// Half of the line width, in pixels
    radius: f64,
}

type Point = (f64, f64);

/// Unit direction and length of a path segment
#[derive(Debug, Copy, Clone)]
struct Edge {
    dx: f64,
    dy: f64,
    len: f64,
}

impl Edge {
    fn new(p0: Point, p1: Point) -> Self {
        let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
        let len = dx.hypot(dy);
        Self { dx: dx / len, dy: dy / len, len }
    }
    fn reversed(self) -> Self {
        Self { dx: -self.dx, dy: -self.dy, len: self.len }
    }
}

impl Stroke {
    /// Create a new Stroke of `width` pixels
    pub fn new(width: f64) -> Self {
        Self { radius: width.abs() / 2.0 }
    }
    /// Half of the line width
    pub fn radius(&self) -> f64 {
        self.radius
    }
    /// Angle between arc vertices, keeping the arc within 1/8 pixel of
    /// the circle
    ///
    /// Wide strokes would need ever finer steps, so the step is bounded
    /// below by a half circle over [`MAX_ARC_STEPS`].
    fn arc_step(&self) -> f64 {
        let r = self.radius;
        let da = 2.0 * (r / (r + 0.125)).acos();
        let min = PI / MAX_ARC_STEPS;
        if da.is_finite() && da > min {
            da
        } else {
            min
        }
    }
    /// Offset of the left side of `e`, the direction rotated a quarter turn
    fn offset(&self, e: Edge) -> Point {
        (-e.dy * self.radius, e.dx * self.radius)
    }
    /// Vertices strictly between angle `a` and `a + sweep` around `c`
    fn arc(&self, out: &mut Vec<Point>, c: Point, a: f64, sweep: f64) {
        let n = (sweep.abs() / self.arc_step()) as usize;
        let da = sweep / (n + 1) as f64;
        for k in 1..=n {
            let t = a + da * k as f64;
            out.push((c.0 + self.radius * t.cos(), c.1 + self.radius * t.sin()));
        }
    }
    /// Join at `p`, arriving along `e1` and leaving along `e2`, on the
    /// left side of the walk
    fn join(&self, out: &mut Vec<Point>, p: Point, e1: Edge, e2: Edge) {
        let (o1, o2) = (self.offset(e1), self.offset(e2));
        let cross = e1.dx * e2.dy - e1.dy * e2.dx;
        let dot = e1.dx * e2.dx + e1.dy * e2.dy;
        if cross > 0.0 {
            // Inner join
            let reach = self.radius * cross / (1.0 + dot);
            if 1.0 + dot > 1e-12 && reach <= e1.len.min(e2.len) {
                let s = 1.0 / (1.0 + dot);
                out.push((p.0 + (o1.0 + o2.0) * s, p.1 + (o1.1 + o2.1) * s));
            } else {
                out.push((p.0 + o1.0, p.1 + o1.1));
                out.push(p);
                out.push((p.0 + o2.0, p.1 + o2.1));
            }
            return;
        }
        // Outer join, round, turning clockwise
        let mut sweep = cross.atan2(dot);
        if sweep > 0.0 {
            sweep -= 2.0 * PI;
        }
        out.push((p.0 + o1.0, p.1 + o1.1));
        self.arc(out, p, o1.1.atan2(o1.0), sweep);
        out.push((p.0 + o2.0, p.1 + o2.1));
    }
    /// Outline of the path through `points`
    ///
    /// A path whose points all coincide yields a circle, no points yield
    /// nothing
    pub fn path(&self, points: &[(f64, f64)]) -> Vec<(f64, f64)> {
        let mut pts: Vec<Point> = Vec::with_capacity(points.len());
        for &p in points {
            match pts.last() {
                Some(q) if (p.0 - q.0).hypot(p.1 - q.1) < VERTEX_DIST_EPSILON => {}
                _ => pts.push(p),
            }
        }
        match pts.as_slice() {
            [] => return vec![],
            [c] => return self.dot(*c),
            _ => {}
        }
        let edges: Vec<Edge> = pts.windows(2).map(|w| Edge::new(w[0], w[1])).collect();
        let m = pts.len();
        let mut out = Vec::with_capacity(4 * m);

        // Left side, forward
        let o = self.offset(edges[0]);
        out.push((pts[0].0 + o.0, pts[0].1 + o.1));
        for i in 1..m - 1 {
            self.join(&mut out, pts[i], edges[i - 1], edges[i]);
        }
        // End cap, from the left side through the direction to the right
        let end = pts[m - 1];
        let o = self.offset(edges[m - 2]);
        out.push((end.0 + o.0, end.1 + o.1));
        self.arc(&mut out, end, o.1.atan2(o.0), -PI);
        out.push((end.0 - o.0, end.1 - o.1));
        // Right side, backward
        for i in (1..m - 1).rev() {
            self.join(&mut out, pts[i], edges[i].reversed(), edges[i - 1].reversed());
        }
        // Start cap
        let start = pts[0];
        let o = self.offset(edges[0]);
        out.push((start.0 - o.0, start.1 - o.1));
        self.arc(&mut out, start, (-o.1).atan2(-o.0), -PI);
        out
    }
    /// Circle around `c`
    fn dot(&self, c: Point) -> Vec<Point> {
        let mut out = vec![(c.0 + self.radius, c.1)];
        self.arc(&mut out, c, 0.0, -2.0 * PI);
        out
    }
}
