#![allow(dead_code)]

use linemap::{AttributeMap, Canvas, DataSource, Error, Geometry, RecordFn, Rgb8};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Canvas keeping every call instead of drawing
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub background: Option<Rgb8>,
    pub lines: Vec<DrawnLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawnLine {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub color: Rgb8,
    pub width: f64,
}

impl Canvas for RecordingCanvas {
    fn fill_background(&mut self, color: Rgb8) {
        self.background = Some(color);
    }
    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb8, width: f64) {
        self.lines.push(DrawnLine { from: (x0, y0), to: (x1, y1), color, width });
    }
}

/// Data source counting how often it is read
#[derive(Debug, Default)]
pub struct CountingSource {
    pub records: Vec<(Arc<Geometry>, AttributeMap)>,
    pub reads: AtomicUsize,
}

impl CountingSource {
    pub fn new(records: Vec<(Geometry, AttributeMap)>) -> Arc<Self> {
        Arc::new(Self {
            records: records.into_iter().map(|(g, a)| (Arc::new(g), a)).collect(),
            reads: AtomicUsize::new(0),
        })
    }
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl DataSource for CountingSource {
    fn for_each(&self, f: &mut RecordFn<'_>) -> Result<(), Error> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        for (g, a) in &self.records {
            f(g, a)?;
        }
        Ok(())
    }
}

pub fn segment() -> Geometry {
    Geometry::line(&[(10.0, 10.0), (20.0, 20.0)])
}
