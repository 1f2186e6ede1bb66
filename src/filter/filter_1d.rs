use super::*;
use crate::coefficients::Coefficients1;

impl LocalCausalFilter {
    /// Forward filter `y = A x` of a 1D field.
    pub fn apply_1d<
        T: Sample,
        A: Coefficients1<T> + ?Sized,
        X: FieldView<T, 1> + ?Sized,
        Y: FieldView<T, 1> + ?Sized,
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
            |i1, _, _, c: &mut [T]| a.get(i1, c),
            x.buffer(),
            y.buffer_mut(),
        );
        Ok(())
    }

    /// [`Self::apply_1d`] overwriting its input.
    pub fn apply_1d_in_place<
        T: Sample,
        A: Coefficients1<T> + ?Sized,
        X: FieldView<T, 1> + ?Sized,
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
            |i1, _, _, c: &mut [T]| a.get(i1, c),
            x.buffer_mut(),
        );
        Ok(())
    }

    /// Transposed filter `y = A' x` of a 1D field.
    pub fn apply_transpose_1d<
        T: Sample,
        A: Coefficients1<T> + ?Sized,
        X: FieldView<T, 1> + ?Sized,
        Y: FieldView<T, 1> + ?Sized,
    >(
        &self,
        a: &A,
        x: &X,
        y: &mut Y,
    ) -> FilterResult<()> {
        checked_pair(x, y)?;
        y.buffer_mut().copy_from_slice(x.buffer());
        self.apply_transpose_1d_in_place(a, y)
    }

    pub fn apply_transpose_1d_in_place<
        T: Sample,
        A: Coefficients1<T> + ?Sized,
        X: FieldView<T, 1> + ?Sized,
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
            |i1, _, _, c: &mut [T]| a.get(i1, c),
            x.buffer_mut(),
        );
        Ok(())
    }

    /// Inverse filter `x = inv(A) y` of a 1D field.
    pub fn apply_inverse_1d<
        T: Sample,
        A: Coefficients1<T> + ?Sized,
        Y: FieldView<T, 1> + ?Sized,
        X: FieldView<T, 1> + ?Sized,
    >(
        &self,
        a: &A,
        y: &Y,
        x: &mut X,
    ) -> FilterResult<()> {
        checked_pair(y, x)?;
        x.buffer_mut().copy_from_slice(y.buffer());
        self.apply_inverse_1d_in_place(a, x)
    }

    pub fn apply_inverse_1d_in_place<
        T: Sample,
        A: Coefficients1<T> + ?Sized,
        Y: FieldView<T, 1> + ?Sized,
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
            |i1, _, _, c: &mut [T]| a.get(i1, c),
            y.buffer_mut(),
        );
        Ok(())
    }

    /// Inverse transposed filter `x = inv(A') y` of a 1D field.
    ///
    /// `x` is used as scratch while it is solved, so it cannot share
    /// storage with `y`:
    ///
    /// ```compile_fail
    /// use nshp::filter::LocalCausalFilter;
    /// use nshp::lags::LagTable;
    ///
    /// let lags = LagTable::new_1d(&[0, 1]).unwrap();
    /// let filter = LocalCausalFilter::new(lags);
    /// let a = |_i1: usize, c: &mut [f32]| c.copy_from_slice(&[1.0, -0.5]);
    /// let mut x = vec![1.0f32, 0.0, 0.0];
    /// filter.apply_inverse_transpose_1d(&a, &x, &mut x).unwrap();
    /// ```
    pub fn apply_inverse_transpose_1d<
        T: Sample,
        A: Coefficients1<T> + ?Sized,
        Y: FieldView<T, 1> + ?Sized,
        X: FieldView<T, 1> + ?Sized,
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
            |i1, _, _, c: &mut [T]| a.get(i1, c),
            y.buffer(),
            x.buffer_mut(),
        );
        Ok(())
    }
}
