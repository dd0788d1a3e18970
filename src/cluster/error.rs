//! Clustering error taxonomy.

use super::point::NDIM;

/// Errors surfaced by [`Dbscan`](super::Dbscan) construction and clustering.
///
/// Clustering itself is a pure computation; everything that can go wrong is
/// caught synchronously before the parallel phases start.
#[derive(Debug, thiserror::Error)]
pub enum DbscanError {
    /// Rejected configuration: non-positive radius, density threshold, or
    /// thread count.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The bounding box of the input needs more grid cells than fit in a
    /// `usize`. Detected before any cell storage is allocated.
    #[error("grid of {dims:?} cells exceeds the addressable size limit")]
    GridTooLarge {
        /// Requested cell count per dimension.
        dims: [usize; NDIM],
    },

    /// The worker pool could not be constructed.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
