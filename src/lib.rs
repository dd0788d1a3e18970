//! Parallel grid-accelerated DBSCAN for 2D point sets.
//!
//! Partitions a point set into density-connected clusters and noise under a
//! per-dimension L-infinity radius. Neighbor search runs over a uniform grid
//! whose cells are sized to the radius, so each query inspects a constant
//! number of cells instead of the whole set; cluster merging runs on a
//! lock-free union-find, so every pipeline phase scales across a
//! configurable worker pool.
//!
//! ```
//! use grid_dbscan::{Dbscan, DbscanParams, Point};
//!
//! let points = vec![
//!     Point([0.0, 0.0]),
//!     Point([0.1, 0.0]),
//!     Point([0.0, 0.1]),
//!     Point([50.0, 50.0]),
//! ];
//! let dbscan = Dbscan::new(DbscanParams {
//!     eps: [1.0, 1.0],
//!     min_pts: 2,
//!     n_threads: 2,
//! })?;
//! let result = dbscan.cluster(&points)?;
//! assert_eq!(result.n_clusters, 1);
//! assert_eq!(result.n_noise, 1);
//! assert_eq!(result.labels, vec![0, 0, 0, grid_dbscan::NOISE]);
//! # Ok::<(), grid_dbscan::DbscanError>(())
//! ```

pub mod cluster;

pub use cluster::{
    Dbscan, DbscanError, DbscanParams, DbscanResult, NeighborList, Point, PointList, NDIM, NOISE,
};
