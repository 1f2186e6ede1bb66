use crate::error::*;
use crate::util::*;

/// Lags of a causal stencil in up to three dimensions.
///
/// Tap `j` reads the input sample at `i - (lag1[j], lag2[j], lag3[j])`.
/// Tap 0 is the leading tap and has zero lag on every axis.
/// Every other tap must lie strictly before the output sample in scan
/// order, where the 3rd axis is the slowest and the 1st the fastest:
/// the highest axis with a non-zero lag must have a positive lag.
///
/// Lags are copied at construction and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LagTable {
    dimension: usize,
    lags: [Vec<i32>; 3],
    extents: Bounds<3>,
}

impl LagTable {
    /// Lags in the 1st dimension only; lag2 and lag3 are zero.
    pub fn new_1d(lag1: &[i32]) -> FilterResult<Self> {
        Self::from_axes(&[lag1])
    }

    /// Lags in the 1st and 2nd dimensions; lag3 is zero.
    pub fn new_2d(lag1: &[i32], lag2: &[i32]) -> FilterResult<Self> {
        Self::from_axes(&[lag1, lag2])
    }

    pub fn new_3d(
        lag1: &[i32],
        lag2: &[i32],
        lag3: &[i32],
    ) -> FilterResult<Self> {
        Self::from_axes(&[lag1, lag2, lag3])
    }

    fn from_axes(axes: &[&[i32]]) -> FilterResult<Self> {
        debug_assert!((1..=3).contains(&axes.len()));
        let m = axes[0].len();
        if m == 0 {
            return Err(FilterError::EmptyLags);
        }
        for (axis, lag) in axes.iter().enumerate().skip(1) {
            if lag.len() != m {
                return Err(FilterError::LagLengthMismatch {
                    axis,
                    expected: m,
                    actual: lag.len(),
                });
            }
        }
        for (axis, lag) in axes.iter().enumerate() {
            if lag[0] != 0 {
                return Err(FilterError::NonzeroLeadingLag { axis });
            }
        }
        for j in 1..m {
            check_causal(axes, j)?;
        }

        let lags: [Vec<i32>; 3] = std::array::from_fn(|axis| {
            axes.get(axis)
                .map(|lag| lag.to_vec())
                .unwrap_or_else(|| vec![0; m])
        });
        let mut extents = Bounds::<3>::zeros();
        for axis in 0..3 {
            // Every axis holds the leading zero, so min <= 0 <= max.
            extents[(axis, 0)] = lags[axis].iter().copied().min().unwrap_or(0);
            extents[(axis, 1)] = lags[axis].iter().copied().max().unwrap_or(0);
        }

        Ok(LagTable {
            dimension: axes.len(),
            lags,
            extents,
        })
    }

    /// Number of taps, including the leading tap.
    pub fn len(&self) -> usize {
        self.lags[0].len()
    }

    /// Never true, a table always holds the leading tap.
    pub fn is_empty(&self) -> bool {
        self.lags[0].is_empty()
    }

    /// Number of lag arrays supplied at construction.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn lag1(&self) -> &[i32] {
        &self.lags[0]
    }

    pub fn lag2(&self) -> &[i32] {
        &self.lags[1]
    }

    pub fn lag3(&self) -> &[i32] {
        &self.lags[2]
    }

    /// Lag of tap `j` on every axis.
    pub fn lag(&self, j: usize) -> Coord<3> {
        vector![self.lags[0][j], self.lags[1][j], self.lags[2][j]]
    }

    /// Min (column 0) and max (column 1) lag per axis.
    pub fn extents(&self) -> &Bounds<3> {
        &self.extents
    }

    /// Extents seen by an operator of the given dimension,
    /// which ignores lags on higher axes.
    pub fn projected_extents(&self, dimension: usize) -> Bounds<3> {
        let mut result = self.extents;
        for axis in dimension..3 {
            result[(axis, 0)] = 0;
            result[(axis, 1)] = 0;
        }
        result
    }
}

/// Starting from the highest axis, a tap's lag must be non-negative;
/// a zero lag defers the decision to the next lower axis,
/// and the 1st axis must then be strictly positive.
fn check_causal(axes: &[&[i32]], j: usize) -> FilterResult<()> {
    let top = axes.len() - 1;
    for axis in (1..=top).rev() {
        let lag = axes[axis][j];
        if lag < 0 {
            return Err(FilterError::NonCausalLag {
                index: j,
                requirement: format!(
                    "{}lag{}[{}] >= 0",
                    zero_prefix(axis + 1..=top),
                    axis + 1,
                    j
                ),
            });
        }
        if lag > 0 {
            return Ok(());
        }
    }
    if axes[0][j] <= 0 {
        return Err(FilterError::NonCausalLag {
            index: j,
            requirement: format!("{}lag1[{}] > 0", zero_prefix(1..=top), j),
        });
    }
    Ok(())
}

fn zero_prefix(axes: std::ops::RangeInclusive<usize>) -> String {
    let zeros: Vec<String> =
        axes.rev().map(|axis| format!("lag{} == 0", axis + 1)).collect();
    if zeros.is_empty() {
        String::new()
    } else {
        format!("if {}, ", zeros.join(" && "))
    }
}
