//! Uniform spatial grid for neighbor-candidate lookup.
//!
//! The input bounding box is partitioned into axis-aligned cells whose edge
//! length along each dimension equals the search radius for that dimension.
//! Every candidate neighbor of a point then lies in the point's own cell or
//! one of its adjacent cells, so a query inspects at most 3^NDIM cells
//! regardless of the input size.

use super::error::DbscanError;
use super::point::{Point, NDIM};

/// Integer cell coordinates. Signed so neighbor offsets can step below zero
/// before the range check rejects them.
pub type GridCoord = [i64; NDIM];

/// Dense uniform grid over a borrowed point set.
pub struct Grid<'a> {
    points: &'a [Point],
    cell_sizes: [f64; NDIM],
    min_bounds: [f64; NDIM],
    dims: [usize; NDIM],
    cells: Vec<Vec<usize>>,
}

impl<'a> Grid<'a> {
    /// Builds the grid: bounds, dimensions, cell allocation, assignment.
    ///
    /// Every point index lands in exactly one cell; coordinates on the upper
    /// bound are clamped into the last cell.
    ///
    /// # Errors
    ///
    /// [`DbscanError::GridTooLarge`] when the total cell count would overflow
    /// `usize`. The check runs before any cell storage is allocated.
    pub fn build(points: &'a [Point], cell_sizes: [f64; NDIM]) -> Result<Self, DbscanError> {
        debug_assert!(cell_sizes.iter().all(|&s| s > 0.0), "cell sizes must be positive");

        let mut min_bounds = [f64::INFINITY; NDIM];
        let mut max_bounds = [f64::NEG_INFINITY; NDIM];
        for p in points {
            for d in 0..NDIM {
                min_bounds[d] = min_bounds[d].min(p.0[d]);
                max_bounds[d] = max_bounds[d].max(p.0[d]);
            }
        }

        let mut dims = [1usize; NDIM];
        if !points.is_empty() {
            for d in 0..NDIM {
                let range = max_bounds[d] - min_bounds[d];
                // The cast saturates for absurd ranges; the overflow check
                // below turns that into an error instead of a huge allocation.
                dims[d] = ((range / cell_sizes[d]).ceil() as usize).max(1);
            }
        }

        // The byte-size bound also keeps every dimension within i64 range
        // for the signed cell coordinates.
        let total = dims
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .filter(|&t| t <= isize::MAX as usize / std::mem::size_of::<Vec<usize>>())
            .ok_or(DbscanError::GridTooLarge { dims })?;

        let mut grid = Self {
            points,
            cell_sizes,
            min_bounds,
            dims,
            cells: vec![Vec::new(); total],
        };

        for i in 0..points.len() {
            let idx = grid.cell_index(grid.coord_of(i));
            grid.cells[idx].push(i);
        }

        Ok(grid)
    }

    /// Cell coordinates of point `idx`, clamped into the valid range.
    pub fn coord_of(&self, idx: usize) -> GridCoord {
        let p = &self.points[idx];
        let mut coord = [0i64; NDIM];
        for d in 0..NDIM {
            let c = ((p.0[d] - self.min_bounds[d]) / self.cell_sizes[d]) as i64;
            coord[d] = c.clamp(0, self.dims[d] as i64 - 1);
        }
        coord
    }

    /// Cell count per dimension.
    pub fn dims(&self) -> [usize; NDIM] {
        self.dims
    }

    /// The point indices bucketed at `coord`, or `None` when `coord` is
    /// outside the grid.
    pub fn cell(&self, coord: GridCoord) -> Option<&[usize]> {
        for d in 0..NDIM {
            if coord[d] < 0 || coord[d] >= self.dims[d] as i64 {
                return None;
            }
        }
        Some(&self.cells[self.cell_index(coord)])
    }

    /// Enumerates the cell at `coord` and its axis-aligned adjacent cells,
    /// skipping offsets that fall outside the grid.
    ///
    /// At most 3^NDIM cells, each emitted once; the order is unspecified.
    pub fn neighbor_cells(&self, coord: GridCoord) -> impl Iterator<Item = &[usize]> + '_ {
        (0..3usize.pow(NDIM as u32)).filter_map(move |combo| {
            let mut nbr = coord;
            let mut code = combo;
            for c in nbr.iter_mut() {
                *c += (code % 3) as i64 - 1;
                code /= 3;
            }
            self.cell(nbr)
        })
    }

    // Row-major flat index with dimension 0 varying fastest.
    fn cell_index(&self, coord: GridCoord) -> usize {
        let mut index = 0usize;
        let mut stride = 1usize;
        for d in 0..NDIM {
            index += coord[d] as usize * stride;
            stride *= self.dims[d];
        }
        index
    }
}
