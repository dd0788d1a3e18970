//! Point types shared by the clustering pipeline.

/// Number of dimensions the clusterer operates on.
///
/// Neighbor enumeration scans 3^NDIM grid cells per query point, so this is
/// expected to stay small.
pub const NDIM: usize = 2;

/// A point in NDIM-dimensional space.
///
/// Coordinates are stored in dimension order, so a slice of points is a
/// contiguous row-major coordinate buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point(pub [f64; NDIM]);

/// PointList is a collection of Points
pub type PointList = Vec<Point>;
