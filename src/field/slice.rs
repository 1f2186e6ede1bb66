use super::*;

/// A field over a borrowed buffer.
#[derive(Debug)]
pub struct SliceField<'a, T: Sample, const GRID_DIMENSION: usize> {
    shape: Shape<GRID_DIMENSION>,
    buffer: &'a mut [T],
}

impl<'a, T: Sample, const GRID_DIMENSION: usize>
    SliceField<'a, T, GRID_DIMENSION>
{
    pub fn new(
        shape: Shape<GRID_DIMENSION>,
        buffer: &'a mut [T],
    ) -> FilterResult<Self> {
        check_buffer(&shape, buffer.len())?;
        Ok(SliceField { shape, buffer })
    }

    pub(super) fn from_parts(
        shape: Shape<GRID_DIMENSION>,
        buffer: &'a mut [T],
    ) -> Self {
        debug_assert_eq!(buffer.len(), real_buffer_size(&shape));
        SliceField { shape, buffer }
    }
}

impl<'a, T: Sample, const GRID_DIMENSION: usize> FieldView<T, GRID_DIMENSION>
    for SliceField<'a, T, GRID_DIMENSION>
{
    fn shape(&self) -> Shape<GRID_DIMENSION> {
        self.shape
    }

    fn buffer(&self) -> &[T] {
        &*self.buffer
    }

    fn buffer_mut(&mut self) -> &mut [T] {
        &mut *self.buffer
    }
}
