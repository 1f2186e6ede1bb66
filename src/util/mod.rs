pub use num_traits::{Float, One, Zero};

/// Floating point sample type carried by fields and coefficients.
pub trait Sample: Float + Send + Sync + std::fmt::Debug + 'static {}

impl<T: Float + Send + Sync + std::fmt::Debug + 'static> Sample for T {}

pub mod indexing;

pub use nalgebra::{matrix, vector};

/// Integer coordinate, one entry per axis, 1st axis first.
pub type Coord<const GRID_DIMENSION: usize> =
    nalgebra::SVector<i32, { GRID_DIMENSION }>;

/// Field extents `(n1, n2, n3)`, 1st axis first.
pub type Shape<const GRID_DIMENSION: usize> =
    nalgebra::SVector<usize, { GRID_DIMENSION }>;

/// Per axis `[min, max]`, one row per axis.
pub type Bounds<const DIMENSION: usize> =
    nalgebra::SMatrix<i32, { DIMENSION }, 2>;
