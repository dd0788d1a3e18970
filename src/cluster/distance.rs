//! Per-dimension L-infinity neighbor predicate.

use super::point::{Point, NDIM};

/// Neighbor test with an independent radius per dimension.
///
/// Two points are neighbors when every coordinate difference is within the
/// radius for that dimension. Separate radii let callers mix axes with
/// different units, e.g. a space coordinate against a time coordinate, and
/// match the grid cell geometry exactly: every true neighbor of a point lies
/// in one of the 3^NDIM cells adjacent to it.
#[derive(Debug, Clone, Copy)]
pub struct Distance {
    eps: [f64; NDIM],
}

impl Distance {
    pub fn new(eps: [f64; NDIM]) -> Self {
        Self { eps }
    }

    /// Checks whether `p` and `q` are within the per-dimension radii.
    ///
    /// A difference of exactly `eps[d]` still counts as a neighbor. The
    /// relation is symmetric and reflexive but not transitive.
    pub fn are_neighbors(&self, p: &Point, q: &Point) -> bool {
        for d in 0..NDIM {
            if (p.0[d] - q.0[d]).abs() > self.eps[d] {
                return false;
            }
        }
        true
    }

    /// Appends to `out` the members of `candidates` that are neighbors of
    /// `query`.
    ///
    /// `query` itself is not special-cased; callers that need self-exclusion
    /// drop the query index from `candidates` first.
    pub fn filter_into(
        &self,
        query: &Point,
        points: &[Point],
        candidates: &[usize],
        out: &mut Vec<usize>,
    ) {
        out.reserve(candidates.len());
        for &idx in candidates {
            if self.are_neighbors(query, &points[idx]) {
                out.push(idx);
            }
        }
    }
}
