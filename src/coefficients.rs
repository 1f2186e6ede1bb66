//! Coefficient providers.
//!
//! A local causal filter asks its provider for the `m` coefficients of
//! every output sample it computes, exactly once per sample per operator
//! call, in that operator's scan order. Coefficient `a[j]` weights tap `j`
//! of the lag table; `a[0]` is the leading coefficient.
//!
//! There is one trait per dimensionality. Any closure with the matching
//! signature is a provider.

use crate::error::*;
use crate::lags::LagTable;
use crate::util::*;

/// Coefficients indexed in 1 dimension.
pub trait Coefficients1<T> {
    /// Fill all of `a` with the coefficients for sample `i1`.
    fn get(&self, i1: usize, a: &mut [T]);
}

/// Coefficients indexed in 2 dimensions.
pub trait Coefficients2<T> {
    /// Fill all of `a` with the coefficients for sample `(i1, i2)`.
    fn get(&self, i1: usize, i2: usize, a: &mut [T]);
}

/// Coefficients indexed in 3 dimensions.
pub trait Coefficients3<T> {
    /// Fill all of `a` with the coefficients for sample `(i1, i2, i3)`.
    fn get(&self, i1: usize, i2: usize, i3: usize, a: &mut [T]);
}

impl<T, F: Fn(usize, &mut [T])> Coefficients1<T> for F {
    #[inline]
    fn get(&self, i1: usize, a: &mut [T]) {
        self(i1, a)
    }
}

impl<T, F: Fn(usize, usize, &mut [T])> Coefficients2<T> for F {
    #[inline]
    fn get(&self, i1: usize, i2: usize, a: &mut [T]) {
        self(i1, i2, a)
    }
}

impl<T, F: Fn(usize, usize, usize, &mut [T])> Coefficients3<T> for F {
    #[inline]
    fn get(&self, i1: usize, i2: usize, i3: usize, a: &mut [T]) {
        self(i1, i2, i3, a)
    }
}

/// The same coefficients at every sample, which makes the filter
/// shift invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantCoefficients<T> {
    a: Vec<T>,
}

impl<T: Sample> ConstantCoefficients<T> {
    pub fn new(lags: &LagTable, a: &[T]) -> FilterResult<Self> {
        if a.len() != lags.len() {
            return Err(FilterError::CoefficientCount {
                expected: lags.len(),
                actual: a.len(),
            });
        }
        Ok(ConstantCoefficients { a: a.to_vec() })
    }

    pub fn coefficients(&self) -> &[T] {
        &self.a
    }
}

impl<T: Sample> Coefficients1<T> for ConstantCoefficients<T> {
    #[inline]
    fn get(&self, _i1: usize, a: &mut [T]) {
        a.copy_from_slice(&self.a);
    }
}

impl<T: Sample> Coefficients2<T> for ConstantCoefficients<T> {
    #[inline]
    fn get(&self, _i1: usize, _i2: usize, a: &mut [T]) {
        a.copy_from_slice(&self.a);
    }
}

impl<T: Sample> Coefficients3<T> for ConstantCoefficients<T> {
    #[inline]
    fn get(&self, _i1: usize, _i2: usize, _i3: usize, a: &mut [T]) {
        a.copy_from_slice(&self.a);
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn closure_providers() {
        let a1 = |i1: usize, a: &mut [f32]| a.fill(i1 as f32);
        let a2 = |i1: usize, i2: usize, a: &mut [f32]| a.fill((i1 + i2) as f32);
        let a3 = |i1: usize, i2: usize, i3: usize, a: &mut [f32]| {
            a.fill((i1 * i2 * i3) as f32)
        };
        let mut a = [0.0f32; 2];
        Coefficients1::get(&a1, 3, &mut a);
        assert_eq!(a, [3.0, 3.0]);
        Coefficients2::get(&a2, 3, 4, &mut a);
        assert_eq!(a, [7.0, 7.0]);
        Coefficients3::get(&a3, 2, 3, 4, &mut a);
        assert_eq!(a, [24.0, 24.0]);
    }

    #[test]
    fn constant_coefficients() {
        let lags = LagTable::new_1d(&[0, 1, 2]).unwrap();
        let c = ConstantCoefficients::new(&lags, &[1.0f64, -0.5, -0.25]).unwrap();
        let mut a = [0.0f64; 3];
        Coefficients2::get(&c, 9, 4, &mut a);
        assert_eq!(a, [1.0, -0.5, -0.25]);
        assert_eq!(c.coefficients(), &[1.0, -0.5, -0.25]);
    }

    #[test]
    fn constant_coefficients_count() {
        let lags = LagTable::new_1d(&[0, 1, 2]).unwrap();
        assert_eq!(
            ConstantCoefficients::new(&lags, &[1.0f32, -0.5]),
            Err(FilterError::CoefficientCount {
                expected: 3,
                actual: 2
            })
        );
    }
}
