use super::*;
use rand::distributions::{Distribution, Standard};
use rand::prelude::*;

/// Fill a field with uniform random values in `[-0.5, 0.5)`.
pub fn rand_field<
    T: Sample,
    const GRID_DIMENSION: usize,
    FieldType: FieldView<T, GRID_DIMENSION> + ?Sized,
    R: Rng,
>(
    field: &mut FieldType,
    rng: &mut R,
) where
    Standard: Distribution<T>,
{
    let half = T::one() / (T::one() + T::one());
    field
        .buffer_mut()
        .iter_mut()
        .for_each(|value_mut| *value_mut = rng.gen::<T>() - half);
}

/// New random field of the given shape, see [`rand_field`].
pub fn rand_owned<T: Sample, const GRID_DIMENSION: usize, R: Rng>(
    shape: Shape<GRID_DIMENSION>,
    rng: &mut R,
) -> OwnedField<T, GRID_DIMENSION>
where
    Standard: Distribution<T>,
{
    let mut field = OwnedField::new(shape);
    rand_field(&mut field, rng);
    field
}
