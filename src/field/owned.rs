use super::*;

/// A field that owns its buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedField<T: Sample, const GRID_DIMENSION: usize> {
    shape: Shape<GRID_DIMENSION>,
    buffer: Vec<T>,
}

impl<T: Sample, const GRID_DIMENSION: usize> OwnedField<T, GRID_DIMENSION> {
    /// Zero filled field.
    pub fn new(shape: Shape<GRID_DIMENSION>) -> Self {
        let buffer = vec![T::zero(); real_buffer_size(&shape)];
        OwnedField { shape, buffer }
    }

    pub fn from_vec(
        shape: Shape<GRID_DIMENSION>,
        buffer: Vec<T>,
    ) -> FilterResult<Self> {
        check_buffer(&shape, buffer.len())?;
        Ok(OwnedField { shape, buffer })
    }

    pub fn from_fn<F: FnMut(Coord<GRID_DIMENSION>) -> T>(
        shape: Shape<GRID_DIMENSION>,
        f: F,
    ) -> Self {
        let mut result = Self::new(shape);
        result.set_values(f);
        result
    }

    pub fn as_slice_field(&mut self) -> SliceField<'_, T, GRID_DIMENSION> {
        SliceField::from_parts(self.shape, &mut self.buffer)
    }

    pub fn into_vec(self) -> Vec<T> {
        self.buffer
    }
}

impl<T: Sample, const GRID_DIMENSION: usize> FieldView<T, GRID_DIMENSION>
    for OwnedField<T, GRID_DIMENSION>
{
    fn shape(&self) -> Shape<GRID_DIMENSION> {
        self.shape
    }

    fn buffer(&self) -> &[T] {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut [T] {
        &mut self.buffer
    }
}
