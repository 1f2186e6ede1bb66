//! Sampled fields the filters read and write.
//!
//! A field is a flat buffer plus a shape `(n1[, n2[, n3]])`, stored with the
//! 1st axis varying fastest. The filters only borrow fields; they never
//! allocate or keep field storage.

mod owned;
pub mod random;
mod slice;

pub use owned::*;
pub use slice::*;

use crate::error::*;
use crate::util::indexing::*;
use crate::util::*;

pub trait FieldView<T: Sample, const GRID_DIMENSION: usize> {
    fn shape(&self) -> Shape<GRID_DIMENSION>;

    fn buffer(&self) -> &[T];

    fn buffer_mut(&mut self) -> &mut [T];

    #[track_caller]
    fn view(&self, coord: &Coord<GRID_DIMENSION>) -> T {
        let index = coord_to_linear(coord, &self.shape());
        self.buffer()[index]
    }

    #[track_caller]
    fn set_coord(&mut self, coord: &Coord<GRID_DIMENSION>, value: T) {
        let index = coord_to_linear(coord, &self.shape());
        self.buffer_mut()[index] = value;
    }

    fn set_values<F: FnMut(Coord<GRID_DIMENSION>) -> T>(&mut self, mut f: F) {
        let shape = self.shape();
        for (i, value_mut) in self.buffer_mut().iter_mut().enumerate() {
            *value_mut = f(linear_to_coord(i, &shape));
        }
    }
}

impl<T: Sample> FieldView<T, 1> for [T] {
    fn shape(&self) -> Shape<1> {
        vector![self.len()]
    }

    fn buffer(&self) -> &[T] {
        self
    }

    fn buffer_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Sample> FieldView<T, 1> for Vec<T> {
    fn shape(&self) -> Shape<1> {
        vector![self.len()]
    }

    fn buffer(&self) -> &[T] {
        self
    }

    fn buffer_mut(&mut self) -> &mut [T] {
        self
    }
}

/// Fail unless `buffer_len` matches the number of samples in `shape`.
pub fn check_buffer<const GRID_DIMENSION: usize>(
    shape: &Shape<GRID_DIMENSION>,
    buffer_len: usize,
) -> FilterResult<()> {
    let expected = real_buffer_size(shape);
    if expected != buffer_len {
        return Err(FilterError::BufferSize {
            expected,
            actual: buffer_len,
        });
    }
    Ok(())
}

/// Fail unless two fields have the same shape.
pub fn check_shapes<const GRID_DIMENSION: usize>(
    expected: &Shape<GRID_DIMENSION>,
    actual: &Shape<GRID_DIMENSION>,
) -> FilterResult<()> {
    if expected != actual {
        return Err(FilterError::ShapeMismatch {
            expected: expected.iter().copied().collect(),
            actual: actual.iter().copied().collect(),
        });
    }
    Ok(())
}

/// Inner product of two fields, accumulated in `f64`.
pub fn dot<
    T: Sample,
    const GRID_DIMENSION: usize,
    A: FieldView<T, GRID_DIMENSION> + ?Sized,
    B: FieldView<T, GRID_DIMENSION> + ?Sized,
>(
    a: &A,
    b: &B,
) -> FilterResult<f64> {
    check_shapes(&a.shape(), &b.shape())?;
    Ok(a.buffer()
        .iter()
        .zip(b.buffer())
        .map(|(x, y)| {
            x.to_f64().unwrap_or(f64::NAN) * y.to_f64().unwrap_or(f64::NAN)
        })
        .sum())
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn slice_field_1d() {
        let mut v = vec![1.0f32, 2.0, 3.0];
        assert_eq!(FieldView::shape(&v), vector![3]);
        assert_eq!(v.view(&vector![1]), 2.0);
        v.set_coord(&vector![2], 5.0);
        assert_eq!(v, vec![1.0, 2.0, 5.0]);
        let s: &[f32] = &v;
        assert_eq!(s.shape(), vector![3]);
    }

    #[test]
    fn dot_test() {
        let a = vec![1.0f32, 2.0, 3.0];
        let b = vec![4.0f32, 5.0, 6.0];
        assert_eq!(dot(&a, &b).unwrap(), 32.0);

        let c = vec![1.0f32];
        assert_eq!(
            dot(&a, &c),
            Err(FilterError::ShapeMismatch {
                expected: vec![3],
                actual: vec![1]
            })
        );
    }

    #[test]
    fn check_buffer_test() {
        assert!(check_buffer(&vector![2, 3], 6).is_ok());
        assert_eq!(
            check_buffer(&vector![2, 3], 5),
            Err(FilterError::BufferSize {
                expected: 6,
                actual: 5
            })
        );
    }
}
