//! Error types for lag tables and filter application.

use std::fmt;

/// Result type for filter construction and application.
pub type FilterResult<T> = Result<T, FilterError>;

/// Invalid arguments detected by lag table construction or by an operator
/// before it touches any sample.
///
/// Numerical trouble (a zero leading coefficient, a coefficient set that is
/// not minimum-phase) is not an error; it shows up as `Inf` or `NaN` in the
/// output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// A lag table needs at least the leading tap.
    EmptyLags,

    /// Lag arrays for the different axes have different lengths.
    LagLengthMismatch {
        axis: usize,
        expected: usize,
        actual: usize,
    },

    /// The leading tap must have zero lag on every axis.
    NonzeroLeadingLag { axis: usize },

    /// A non-leading tap would reference a sample that comes later in
    /// scan order.
    NonCausalLag { index: usize, requirement: String },

    /// A coefficient vector does not match the number of taps.
    CoefficientCount { expected: usize, actual: usize },

    /// Input and output fields have different shapes.
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// A buffer is too small or too large for the requested shape.
    BufferSize { expected: usize, actual: usize },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLags => {
                write!(f, "Invalid argument: lag1 must contain the leading lag")
            }
            Self::LagLengthMismatch {
                axis,
                expected,
                actual,
            } => write!(
                f,
                "Invalid argument: lag{} has length {}, expected {}",
                axis + 1,
                actual,
                expected
            ),
            Self::NonzeroLeadingLag { axis } => write!(
                f,
                "Invalid argument: leading lag must be zero, lag{}[0] != 0",
                axis + 1
            ),
            Self::NonCausalLag { index, requirement } => write!(
                f,
                "Invalid argument: lag at index {} violates {}",
                index, requirement
            ),
            Self::CoefficientCount { expected, actual } => write!(
                f,
                "Invalid argument: expected {} coefficients, got {}",
                expected, actual
            ),
            Self::ShapeMismatch { expected, actual } => write!(
                f,
                "Invalid argument: field shape {:?} does not match {:?}",
                actual, expected
            ),
            Self::BufferSize { expected, actual } => write!(
                f,
                "Invalid argument: buffer holds {} samples, shape needs {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for FilterError {}
