use super::*;
use crate::coefficients::Coefficients3;

impl LocalCausalFilter {
    /// Forward filter `y = A x` of a 3D field.
    pub fn apply_3d<
        T: Sample,
        A: Coefficients3<T> + ?Sized,
        X: FieldView<T, 3> + ?Sized,
        Y: FieldView<T, 3> + ?Sized,
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
            |i1, i2, i3, c: &mut [T]| a.get(i1, i2, i3, c),
            x.buffer(),
            y.buffer_mut(),
        );
        Ok(())
    }

    pub fn apply_3d_in_place<
        T: Sample,
        A: Coefficients3<T> + ?Sized,
        X: FieldView<T, 3> + ?Sized,
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
            |i1, i2, i3, c: &mut [T]| a.get(i1, i2, i3, c),
            x.buffer_mut(),
        );
        Ok(())
    }

    /// [`Self::apply_3d`] on the global rayon pool, in tasks of
    /// `chunk_size` rows, where a row is all `i1` for one `(i2, i3)`.
    pub fn par_apply_3d<
        T: Sample,
        A: Coefficients3<T> + Sync + ?Sized,
        X: FieldView<T, 3> + ?Sized,
        Y: FieldView<T, 3> + ?Sized,
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
            &|i1: usize, i2: usize, i3: usize, c: &mut [T]| {
                a.get(i1, i2, i3, c)
            },
            x.buffer(),
            y.buffer_mut(),
            chunk_size,
        );
        Ok(())
    }

    pub fn apply_transpose_3d<
        T: Sample,
        A: Coefficients3<T> + ?Sized,
        X: FieldView<T, 3> + ?Sized,
        Y: FieldView<T, 3> + ?Sized,
    >(
        &self,
        a: &A,
        x: &X,
        y: &mut Y,
    ) -> FilterResult<()> {
        checked_pair(x, y)?;
        y.buffer_mut().copy_from_slice(x.buffer());
        self.apply_transpose_3d_in_place(a, y)
    }

    pub fn apply_transpose_3d_in_place<
        T: Sample,
        A: Coefficients3<T> + ?Sized,
        X: FieldView<T, 3> + ?Sized,
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
            |i1, i2, i3, c: &mut [T]| a.get(i1, i2, i3, c),
            x.buffer_mut(),
        );
        Ok(())
    }

    pub fn apply_inverse_3d<
        T: Sample,
        A: Coefficients3<T> + ?Sized,
        Y: FieldView<T, 3> + ?Sized,
        X: FieldView<T, 3> + ?Sized,
    >(
        &self,
        a: &A,
        y: &Y,
        x: &mut X,
    ) -> FilterResult<()> {
        checked_pair(y, x)?;
        x.buffer_mut().copy_from_slice(y.buffer());
        self.apply_inverse_3d_in_place(a, x)
    }

    pub fn apply_inverse_3d_in_place<
        T: Sample,
        A: Coefficients3<T> + ?Sized,
        Y: FieldView<T, 3> + ?Sized,
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
            |i1, i2, i3, c: &mut [T]| a.get(i1, i2, i3, c),
            y.buffer_mut(),
        );
        Ok(())
    }

    /// `x` and `y` must be distinct fields.
    pub fn apply_inverse_transpose_3d<
        T: Sample,
        A: Coefficients3<T> + ?Sized,
        Y: FieldView<T, 3> + ?Sized,
        X: FieldView<T, 3> + ?Sized,
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
            |i1, i2, i3, c: &mut [T]| a.get(i1, i2, i3, c),
            y.buffer(),
            x.buffer_mut(),
        );
        Ok(())
    }
}
