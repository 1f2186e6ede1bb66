use super::*;
use crate::coefficients::Coefficients2;

impl LocalCausalFilter {
    /// Forward filter `y = A x` of a 2D field.
    pub fn apply_2d<
        T: Sample,
        A: Coefficients2<T> + ?Sized,
        X: FieldView<T, 2> + ?Sized,
        Y: FieldView<T, 2> + ?Sized,
    >(
        &self,
        a: &A,
        x: &X,
        y: &mut Y,
    ) -> FilterResult<()> {
        let shape = checked_pair(x, y)?;
        let (zones, taps) = self.plan(&shape);
        engine::forward(
            &zones,
            &taps,
            |i1, i2, _, c: &mut [T]| a.get(i1, i2, c),
            x.buffer(),
            y.buffer_mut(),
        );
        Ok(())
    }

    pub fn apply_2d_in_place<
        T: Sample,
        A: Coefficients2<T> + ?Sized,
        X: FieldView<T, 2> + ?Sized,
    >(
        &self,
        a: &A,
        x: &mut X,
    ) -> FilterResult<()> {
        let shape = checked_shape(x)?;
        let (zones, taps) = self.plan(&shape);
        engine::forward_in_place(
            &zones,
            &taps,
            |i1, i2, _, c: &mut [T]| a.get(i1, i2, c),
            x.buffer_mut(),
        );
        Ok(())
    }

    /// [`Self::apply_2d`] on the global rayon pool.
    ///
    /// Rows `(i2)` are split into tasks of `chunk_size` rows. The provider
    /// is called from several threads at once and in no particular order,
    /// but exactly once per sample. Results equal the sequential ones.
    pub fn par_apply_2d<
        T: Sample,
        A: Coefficients2<T> + Sync + ?Sized,
        X: FieldView<T, 2> + ?Sized,
        Y: FieldView<T, 2> + ?Sized,
    >(
        &self,
        a: &A,
        x: &X,
        y: &mut Y,
        chunk_size: usize,
    ) -> FilterResult<()> {
        let shape = checked_pair(x, y)?;
        let (zones, taps) = self.plan(&shape);
        engine::par_forward(
            &zones,
            &taps,
            &|i1: usize, i2: usize, _: usize, c: &mut [T]| a.get(i1, i2, c),
            x.buffer(),
            y.buffer_mut(),
            chunk_size,
        );
        Ok(())
    }

    /// Transposed filter `y = A' x` of a 2D field.
    pub fn apply_transpose_2d<
        T: Sample,
        A: Coefficients2<T> + ?Sized,
        X: FieldView<T, 2> + ?Sized,
        Y: FieldView<T, 2> + ?Sized,
    >(
        &self,
        a: &A,
        x: &X,
        y: &mut Y,
    ) -> FilterResult<()> {
        checked_pair(x, y)?;
        y.buffer_mut().copy_from_slice(x.buffer());
        self.apply_transpose_2d_in_place(a, y)
    }

    pub fn apply_transpose_2d_in_place<
        T: Sample,
        A: Coefficients2<T> + ?Sized,
        X: FieldView<T, 2> + ?Sized,
    >(
        &self,
        a: &A,
        x: &mut X,
    ) -> FilterResult<()> {
        let shape = checked_shape(x)?;
        let (zones, taps) = self.plan(&shape);
        engine::transpose_in_place(
            &zones,
            &taps,
            |i1, i2, _, c: &mut [T]| a.get(i1, i2, c),
            x.buffer_mut(),
        );
        Ok(())
    }

    /// Inverse filter `x = inv(A) y` of a 2D field.
    pub fn apply_inverse_2d<
        T: Sample,
        A: Coefficients2<T> + ?Sized,
        Y: FieldView<T, 2> + ?Sized,
        X: FieldView<T, 2> + ?Sized,
    >(
        &self,
        a: &A,
        y: &Y,
        x: &mut X,
    ) -> FilterResult<()> {
        checked_pair(y, x)?;
        x.buffer_mut().copy_from_slice(y.buffer());
        self.apply_inverse_2d_in_place(a, x)
    }

    pub fn apply_inverse_2d_in_place<
        T: Sample,
        A: Coefficients2<T> + ?Sized,
        Y: FieldView<T, 2> + ?Sized,
    >(
        &self,
        a: &A,
        y: &mut Y,
    ) -> FilterResult<()> {
        let shape = checked_shape(y)?;
        let (zones, taps) = self.plan(&shape);
        engine::inverse_in_place(
            &zones,
            &taps,
            |i1, i2, _, c: &mut [T]| a.get(i1, i2, c),
            y.buffer_mut(),
        );
        Ok(())
    }

    /// Inverse transposed filter `x = inv(A') y` of a 2D field.
    /// `x` and `y` must be distinct fields.
    pub fn apply_inverse_transpose_2d<
        T: Sample,
        A: Coefficients2<T> + ?Sized,
        Y: FieldView<T, 2> + ?Sized,
        X: FieldView<T, 2> + ?Sized,
    >(
        &self,
        a: &A,
        y: &Y,
        x: &mut X,
    ) -> FilterResult<()> {
        let shape = checked_pair(y, x)?;
        let (zones, taps) = self.plan(&shape);
        engine::inverse_transpose(
            &zones,
            &taps,
            |i1, i2, _, c: &mut [T]| a.get(i1, i2, c),
            y.buffer(),
            x.buffer_mut(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::coefficients::ConstantCoefficients;
    use crate::field::random::rand_owned;
    use float_cmp::assert_approx_eq;
    use rand::prelude::*;
    use rand::rngs::StdRng;

    fn quarter_plane() -> (LocalCausalFilter, ConstantCoefficients<f32>) {
        let lags = LagTable::new_2d(&[0, 1, 0], &[0, 0, 1]).unwrap();
        let a = ConstantCoefficients::new(&lags, &[1.0, -0.3, -0.3]).unwrap();
        (LocalCausalFilter::new(lags), a)
    }

    #[test]
    fn round_trip_4x4() {
        let (filter, a) = quarter_plane();
        let mut rng = StdRng::seed_from_u64(1);
        let x: OwnedField<f32, 2> = rand_owned(vector![4, 4], &mut rng);
        let mut y = OwnedField::new(vector![4, 4]);
        filter.apply_2d(&a, &x, &mut y).unwrap();
        filter.apply_inverse_2d_in_place(&a, &mut y).unwrap();
        for (v, e) in y.buffer().iter().zip(x.buffer()) {
            assert_approx_eq!(f32, *v, *e, epsilon = 1e-6);
        }
    }

    #[test]
    fn impulse_spreads_forward() {
        let (filter, a) = quarter_plane();
        let mut x = OwnedField::<f32, 2>::new(vector![4, 4]);
        x.set_coord(&vector![1, 1], 1.0);
        filter.apply_2d_in_place(&a, &mut x).unwrap();
        assert_eq!(x.view(&vector![1, 1]), 1.0);
        assert_eq!(x.view(&vector![2, 1]), -0.3);
        assert_eq!(x.view(&vector![1, 2]), -0.3);
        let total: f32 = x.buffer().iter().map(|v| v.abs()).sum();
        assert_approx_eq!(f32, total, 1.6, ulps = 2);
    }

    #[test]
    fn par_apply_matches() {
        let lags = LagTable::new_2d(
            &[0, 1, 2, 3, 4, -4, -3, -2, -1, 0],
            &[0, 0, 0, 0, 0, 1, 1, 1, 1, 1],
        )
        .unwrap();
        let filter = LocalCausalFilter::new(lags);
        let a = |i1: usize, i2: usize, c: &mut [f64]| {
            for (j, v) in c.iter_mut().enumerate() {
                *v = if j == 0 {
                    1.0
                } else {
                    -0.05 * ((i1 + 2 * i2 + j) % 5) as f64
                };
            }
        };
        let mut rng = StdRng::seed_from_u64(3);
        let x: OwnedField<f64, 2> = rand_owned(vector![19, 21], &mut rng);
        let mut y = OwnedField::new(vector![19, 21]);
        filter.apply_2d(&a, &x, &mut y).unwrap();
        for chunk_size in [1, 4, 21, 100, usize::MAX] {
            let mut z = OwnedField::new(vector![19, 21]);
            filter.par_apply_2d(&a, &x, &mut z, chunk_size).unwrap();
            assert_eq!(y, z);
        }
    }

    #[test]
    fn in_place_matches() {
        let (filter, a) = quarter_plane();
        let mut rng = StdRng::seed_from_u64(7);
        let x: OwnedField<f32, 2> = rand_owned(vector![6, 5], &mut rng);
        let mut y = OwnedField::new(vector![6, 5]);

        filter.apply_2d(&a, &x, &mut y).unwrap();
        let mut xy = x.clone();
        filter.apply_2d_in_place(&a, &mut xy).unwrap();
        assert_eq!(y, xy);

        filter.apply_transpose_2d(&a, &x, &mut y).unwrap();
        let mut xy = x.clone();
        filter.apply_transpose_2d_in_place(&a, &mut xy).unwrap();
        assert_eq!(y, xy);

        filter.apply_inverse_2d(&a, &x, &mut y).unwrap();
        let mut xy = x.clone();
        filter.apply_inverse_2d_in_place(&a, &mut xy).unwrap();
        assert_eq!(y, xy);
    }

    #[test]
    fn shape_checked() {
        let (filter, a) = quarter_plane();
        let x = OwnedField::<f32, 2>::new(vector![4, 4]);
        let mut y = OwnedField::<f32, 2>::new(vector![4, 5]);
        assert!(filter.apply_transpose_2d(&a, &x, &mut y).is_err());
        assert!(filter.apply_inverse_transpose_2d(&a, &x, &mut y).is_err());
        assert!(filter.par_apply_2d(&a, &x, &mut y, 2).is_err());
        // Nothing was written.
        assert!(y.buffer().iter().all(|v| *v == 0.0));
    }
}
