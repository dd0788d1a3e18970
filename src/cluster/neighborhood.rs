//! Exact neighbor enumeration over the spatial grid.
//!
//! Produces the adjacency of every point in compressed sparse row form:
//! `offsets[i]..offsets[i + 1]` indexes point `i`'s neighbors in `indices`.
//! The list is built in two parallel passes, count then fill, so the flat
//! index buffer is allocated once and every worker writes a disjoint range.

use rayon::prelude::*;

use super::distance::Distance;
use super::grid::Grid;
use super::point::Point;

/// CSR adjacency list. A point never appears in its own neighbor list.
#[derive(Debug, Default)]
pub struct NeighborList {
    offsets: Vec<usize>,
    indices: Vec<usize>,
}

impl NeighborList {
    /// Neighbor indices of point `i`. Ordering within the list is
    /// unspecified; the set is fully determined by input and radii.
    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.indices[self.offsets[i]..self.offsets[i + 1]]
    }

    /// Number of neighbors of point `i`, the point itself excluded.
    pub fn degree(&self, i: usize) -> usize {
        self.offsets[i + 1] - self.offsets[i]
    }

    /// Number of points covered by the list.
    pub fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds the adjacency list for `points`, using `grid` for candidate lookup
/// and `distance` for the exact test.
///
/// Runs on the calling thread's rayon pool.
pub fn build_neighbor_list(
    points: &[Point],
    grid: &Grid<'_>,
    distance: &Distance,
) -> NeighborList {
    let n = points.len();
    if n == 0 {
        return NeighborList {
            offsets: vec![0],
            indices: Vec::new(),
        };
    }

    // Pass 1: count each point's neighbors.
    let counts: Vec<usize> = (0..n)
        .into_par_iter()
        .map(|i| {
            let query = &points[i];
            let mut count = 0;
            for cell in grid.neighbor_cells(grid.coord_of(i)) {
                for &j in cell {
                    if j != i && distance.are_neighbors(query, &points[j]) {
                        count += 1;
                    }
                }
            }
            count
        })
        .collect();

    let mut offsets = Vec::with_capacity(n + 1);
    let mut total = 0usize;
    offsets.push(0);
    for &c in &counts {
        total += c;
        offsets.push(total);
    }

    // Pass 2: fill each point's range. Splitting the flat buffer up front
    // hands every worker a disjoint slice to write into.
    let mut indices = vec![0usize; total];
    let mut ranges = Vec::with_capacity(n);
    let mut rest = indices.as_mut_slice();
    for &c in &counts {
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(c);
        ranges.push(head);
        rest = tail;
    }

    ranges.into_par_iter().enumerate().for_each_init(
        || (Vec::new(), Vec::new()),
        |(candidates, matches), (i, out)| {
            candidates.clear();
            matches.clear();
            for cell in grid.neighbor_cells(grid.coord_of(i)) {
                for &j in cell {
                    if j != i {
                        candidates.push(j);
                    }
                }
            }
            distance.filter_into(&points[i], points, candidates, matches);
            out.copy_from_slice(matches);
        },
    );

    NeighborList { offsets, indices }
}
