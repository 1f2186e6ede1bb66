use crate::util::*;

// Fields are stored with the 1st axis varying fastest,
// i.e. index = i1 + n1 * (i2 + n2 * i3).

pub fn real_buffer_size<const DIMENSION: usize>(
    shape: &Shape<DIMENSION>,
) -> usize {
    shape.iter().product()
}

/// Embed a shape of up to three axes into a 3D grid,
/// missing axes have extent one.
pub fn grid_of<const DIMENSION: usize>(shape: &Shape<DIMENSION>) -> [usize; 3] {
    debug_assert!(DIMENSION <= 3);
    let mut grid = [1; 3];
    for d in 0..DIMENSION {
        grid[d] = shape[d];
    }
    grid
}

pub fn coord_to_linear<const DIMENSION: usize>(
    coord: &Coord<DIMENSION>,
    shape: &Shape<DIMENSION>,
) -> usize {
    let mut accumulator = 0;
    for d in (0..DIMENSION).rev() {
        debug_assert!(coord[d] >= 0);
        debug_assert!((coord[d] as usize) < shape[d]);
        accumulator = accumulator * shape[d] + coord[d] as usize;
    }
    accumulator
}

pub fn linear_to_coord<const DIMENSION: usize>(
    linear_index: usize,
    shape: &Shape<DIMENSION>,
) -> Coord<DIMENSION> {
    let mut result = Coord::zeros();
    let mut index_accumulator = linear_index;
    for d in 0..DIMENSION {
        result[d] = (index_accumulator % shape[d]) as i32;
        index_accumulator /= shape[d];
    }
    result
}
