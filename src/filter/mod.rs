//! Local causal filters with variable coefficients.
//!
//! A [`LocalCausalFilter`] pairs a validated [`LagTable`] with the four
//! operators built from it. Coefficients are supplied per call by a
//! provider (see [`crate::coefficients`]) and may differ at every sample.
//!
//! | operator | computes | scan order | in place |
//! |---|---|---|---|
//! | `apply` | `y[i] = sum_j a_j(i) x[i - lag_j]` | descending | yes |
//! | `apply_transpose` | adjoint of `apply` | ascending | yes |
//! | `apply_inverse` | solves `apply` for `x` | ascending | yes |
//! | `apply_inverse_transpose` | adjoint of `apply_inverse` | descending | no |
//!
//! Taps that fall outside the field are dropped, so each operator sees the
//! field zero padded. The inverse operators are stable only if the caller's
//! coefficients are minimum phase; nothing here checks that, and a zero
//! leading coefficient yields `Inf` or `NaN`.
//!
//! Operators of lower dimension than the table ignore the higher lags:
//! a 1D operator only uses `lag1`, a 2D operator `lag1` and `lag2`.

mod engine;
mod filter_1d;
mod filter_2d;
mod filter_3d;
pub mod zones;

use crate::error::*;
use crate::field::*;
use crate::lags::LagTable;
use crate::util::indexing::*;
use crate::util::*;
use engine::Taps;
use zones::ZoneBounds;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalCausalFilter {
    lags: LagTable,
}

impl LocalCausalFilter {
    pub fn new(lags: LagTable) -> Self {
        LocalCausalFilter { lags }
    }

    pub fn lags(&self) -> &LagTable {
        &self.lags
    }

    /// Zones an operator of dimension `D` would use on a field of `shape`.
    pub fn zones<const D: usize>(&self, shape: &Shape<D>) -> ZoneBounds {
        ZoneBounds::for_table(&self.lags, D, grid_of(shape))
    }

    fn plan<const D: usize>(&self, shape: &Shape<D>) -> (ZoneBounds, Taps) {
        let grid = grid_of(shape);
        (
            ZoneBounds::for_table(&self.lags, D, grid),
            Taps::new(&self.lags, D, grid),
        )
    }
}

/// Shape of a single field after checking its buffer.
fn checked_shape<T: Sample, const D: usize, X: FieldView<T, D> + ?Sized>(
    x: &X,
) -> FilterResult<Shape<D>> {
    let shape = x.shape();
    check_buffer(&shape, x.buffer().len())?;
    Ok(shape)
}

/// Common shape of an input and an output field.
fn checked_pair<
    T: Sample,
    const D: usize,
    X: FieldView<T, D> + ?Sized,
    Y: FieldView<T, D> + ?Sized,
>(
    input: &X,
    output: &Y,
) -> FilterResult<Shape<D>> {
    let shape = checked_shape(input)?;
    check_buffer(&output.shape(), output.buffer().len())?;
    check_shapes(&shape, &output.shape())?;
    Ok(shape)
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn zones_follow_dimension() {
        let lags = LagTable::new_2d(&[0, 1, 0], &[0, 0, 1]).unwrap();
        let filter = LocalCausalFilter::new(lags);
        // In 1D lag2 is ignored, so row 0 has an interior.
        let z1 = filter.zones(&vector![6]);
        assert_eq!(z1.row_segments(0, 0).map(|s| s.i1), [0..1, 1..6, 6..6]);
        // In 2D row 0 reads the row before it.
        let z2 = filter.zones(&vector![6, 3]);
        assert_eq!(z2.row_segments(0, 0)[0].checks, zones::Checks::LO_ROW);
        assert_eq!(z2.row_segments(1, 0).map(|s| s.i1), [0..1, 1..6, 6..6]);
    }

    #[test]
    fn checked_pair_rejects() {
        let x = OwnedField::<f32, 2>::new(vector![3, 4]);
        let y = OwnedField::<f32, 2>::new(vector![4, 3]);
        assert_eq!(
            checked_pair(&x, &y),
            Err(FilterError::ShapeMismatch {
                expected: vec![3, 4],
                actual: vec![4, 3]
            })
        );
        assert_eq!(checked_pair(&x, &x), Ok(vector![3, 4]));
    }
}
