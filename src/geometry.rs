//! Line geometry in real world coordinates

use geo_types::{Coord, LineString, MultiLineString};

/// One or more paths, each an ordered list of points
///
/// Paths with fewer than two points have no segments and draw nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub paths: Vec<Vec<Coord<f64>>>,
}

impl Geometry {
    pub fn new(paths: Vec<Vec<Coord<f64>>>) -> Self {
        Self { paths }
    }
    /// A single path through `points`
    ///
    ///     use linemap::Geometry;
    ///
    ///     let g = Geometry::line(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
    ///     assert_eq!(g.num_segments(), 2);
    ///
    pub fn line(points: &[(f64, f64)]) -> Self {
        Self::new(vec![points.iter().map(|&(x, y)| Coord { x, y }).collect()])
    }
    /// Add another path
    pub fn with_path(mut self, points: &[(f64, f64)]) -> Self {
        self.paths.push(points.iter().map(|&(x, y)| Coord { x, y }).collect());
        self
    }
    /// Number of consecutive point pairs over every path
    pub fn num_segments(&self) -> usize {
        self.paths.iter().map(|path| path.len().saturating_sub(1)).sum()
    }
    /// Total number of points
    pub fn num_points(&self) -> usize {
        self.paths.iter().map(Vec::len).sum()
    }
}

impl From<LineString<f64>> for Geometry {
    fn from(ls: LineString<f64>) -> Self {
        Self::new(vec![ls.0])
    }
}

impl From<MultiLineString<f64>> for Geometry {
    fn from(mls: MultiLineString<f64>) -> Self {
        Self::new(mls.0.into_iter().map(|ls| ls.0).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::line_string;

    #[test]
    fn short_paths_have_no_segments() {
        let g = Geometry::line(&[(0.0, 0.0)]).with_path(&[]).with_path(&[(1.0, 1.0), (2.0, 2.0)]);
        assert_eq!(g.num_segments(), 1);
        assert_eq!(g.num_points(), 3);
    }

    #[test]
    fn from_line_string() {
        let ls: LineString<f64> = line_string![(x: 0.0, y: 0.0), (x: 3.0, y: 4.0)];
        let g = Geometry::from(ls);
        assert_eq!(g.paths.len(), 1);
        assert_eq!(g.num_segments(), 1);
    }
}
