//! Kernels shared by the 1D, 2D and 3D operators.
//!
//! Every field is handled as a 3D grid with `i1` fastest. Each kernel is
//! instantiated once per zone kind, so the bounds comparisons a zone does
//! not need are compiled out of its inner loop.

use super::zones::*;
use crate::lags::LagTable;
use crate::util::*;
use rayon::prelude::*;

const LO1: u8 = Checks::LO1.bits();
const HI1: u8 = Checks::HI1.bits();
const LO2: u8 = Checks::LO2.bits();
const HI2: u8 = Checks::HI2.bits();
const LO3: u8 = Checks::LO3.bits();

/// Run `$body` with `$c` bound to the segment's checks as a constant.
macro_rules! with_checks {
    ($checks:expr, $c:ident => $body:expr) => {
        match $checks {
            Checks::NONE => {
                const $c: u8 = Checks::NONE.bits();
                $body
            }
            Checks::LO1 => {
                const $c: u8 = Checks::LO1.bits();
                $body
            }
            Checks::HI1 => {
                const $c: u8 = Checks::HI1.bits();
                $body
            }
            Checks::LO_ROW => {
                const $c: u8 = Checks::LO_ROW.bits();
                $body
            }
            Checks::HI_ROW => {
                const $c: u8 = Checks::HI_ROW.bits();
                $body
            }
            _ => {
                const $c: u8 = Checks::ALL.bits();
                $body
            }
        }
    };
}

/// Lags of one operator call, projected onto its dimension,
/// with their offsets in the linear buffer.
pub(crate) struct Taps {
    lags: Vec<[isize; 3]>,
    offsets: Vec<isize>,
    grid: [isize; 3],
}

impl Taps {
    pub fn new(lags: &LagTable, dimension: usize, grid: [usize; 3]) -> Self {
        let n = grid.map(|g| g as isize);
        let lags: Vec<[isize; 3]> = (0..lags.len())
            .map(|j| {
                let lag = lags.lag(j);
                std::array::from_fn(|axis| {
                    if axis < dimension {
                        lag[axis] as isize
                    } else {
                        0
                    }
                })
            })
            .collect();
        let offsets = lags
            .iter()
            .map(|lag| lag[0] + n[0] * (lag[1] + n[1] * lag[2]))
            .collect();
        Taps {
            lags,
            offsets,
            grid: n,
        }
    }

    pub fn len(&self) -> usize {
        self.lags.len()
    }

    #[inline(always)]
    fn linear(&self, i1: usize, i2: usize, i3: usize) -> usize {
        i1 + self.grid[0] as usize * (i2 + self.grid[1] as usize * i3)
    }

    /// Linear index read by tap `j` from sample `i`,
    /// `None` if one of the checks in `C` finds it outside the field.
    #[inline(always)]
    fn source<const C: u8>(
        &self,
        j: usize,
        i: [isize; 3],
        linear: usize,
    ) -> Option<usize> {
        let lag = &self.lags[j];
        let k1 = i[0] - lag[0];
        let k2 = i[1] - lag[1];
        let k3 = i[2] - lag[2];
        if (C & LO1 != 0 && k1 < 0)
            || (C & HI1 != 0 && k1 >= self.grid[0])
            || (C & LO2 != 0 && k2 < 0)
            || (C & HI2 != 0 && k2 >= self.grid[1])
            || (C & LO3 != 0 && k3 < 0)
        {
            return None;
        }
        Some((linear as isize - self.offsets[j]) as usize)
    }
}

#[inline(always)]
fn at(segment: &Segment, i1: usize) -> [isize; 3] {
    [i1 as isize, segment.i2 as isize, segment.i3 as isize]
}

////////////////////////////////////////////////////////////////////////////
// Forward: y[i] = sum_j a_j(i) x[i - lag_j]

/// In place, descending, so that every tap still reads input.
pub(crate) fn forward_in_place<
    T: Sample,
    G: FnMut(usize, usize, usize, &mut [T]),
>(
    zones: &ZoneBounds,
    taps: &Taps,
    mut get: G,
    xy: &mut [T],
) {
    profiling::scope!("local_causal_filter::apply");
    let mut a = vec![T::zero(); taps.len()];
    zones.for_each_segment(ScanOrder::Descending, |segment| {
        with_checks!(segment.checks, C => forward_in_place_segment::<T, G, C>(
            taps, &segment, &mut get, &mut a, xy
        ))
    });
}

fn forward_in_place_segment<
    T: Sample,
    G: FnMut(usize, usize, usize, &mut [T]),
    const C: u8,
>(
    taps: &Taps,
    segment: &Segment,
    get: &mut G,
    a: &mut [T],
    xy: &mut [T],
) {
    for i1 in segment.i1.clone().rev() {
        get(i1, segment.i2, segment.i3, a);
        let i = taps.linear(i1, segment.i2, segment.i3);
        let mut yi = a[0] * xy[i];
        for j in 1..a.len() {
            if let Some(k) = taps.source::<C>(j, at(segment, i1), i) {
                yi = yi + a[j] * xy[k];
            }
        }
        xy[i] = yi;
    }
}

/// Out of place, descending.
pub(crate) fn forward<T: Sample, G: FnMut(usize, usize, usize, &mut [T])>(
    zones: &ZoneBounds,
    taps: &Taps,
    mut get: G,
    x: &[T],
    y: &mut [T],
) {
    profiling::scope!("local_causal_filter::apply");
    let mut a = vec![T::zero(); taps.len()];
    zones.for_each_segment(ScanOrder::Descending, |segment| {
        with_checks!(segment.checks, C => forward_segment::<T, G, C>(
            taps, &segment, &mut get, &mut a, x, y, 0
        ))
    });
}

/// Writes `y[i - y_origin]` for every sample `i` of the segment.
fn forward_segment<
    T: Sample,
    G: FnMut(usize, usize, usize, &mut [T]),
    const C: u8,
>(
    taps: &Taps,
    segment: &Segment,
    get: &mut G,
    a: &mut [T],
    x: &[T],
    y: &mut [T],
    y_origin: usize,
) {
    for i1 in segment.i1.clone().rev() {
        get(i1, segment.i2, segment.i3, a);
        let i = taps.linear(i1, segment.i2, segment.i3);
        let mut yi = a[0] * x[i];
        for j in 1..a.len() {
            if let Some(k) = taps.source::<C>(j, at(segment, i1), i) {
                yi = yi + a[j] * x[k];
            }
        }
        y[i - y_origin] = yi;
    }
}

/// Out of place, rows split into chunks of `chunk_size` rows,
/// each chunk on its own rayon task with its own coefficient buffer.
pub(crate) fn par_forward<
    T: Sample,
    G: Fn(usize, usize, usize, &mut [T]) + Sync,
>(
    zones: &ZoneBounds,
    taps: &Taps,
    get: &G,
    x: &[T],
    y: &mut [T],
    chunk_size: usize,
) {
    profiling::scope!("local_causal_filter::par_apply");
    if y.is_empty() {
        return;
    }
    let [n1, n2, n3] = zones.grid();
    // y is not empty, so there is at least one row.
    let rows_per_chunk = chunk_size.clamp(1, n2 * n3);
    y.par_chunks_mut(n1 * rows_per_chunk).enumerate().for_each(
        |(c, y_chunk)| {
            profiling::scope!("local_causal_filter::par_apply Thread Callback");
            let mut get = get;
            let mut a = vec![T::zero(); taps.len()];
            let first_row = c * rows_per_chunk;
            let y_origin = first_row * n1;
            for row in first_row..first_row + y_chunk.len() / n1 {
                let (i2, i3) = (row % n2, row / n2);
                for segment in zones.row_segments(i2, i3).into_iter().rev() {
                    if segment.is_empty() {
                        continue;
                    }
                    with_checks!(segment.checks, C => forward_segment::<T, &G, C>(
                        taps, &segment, &mut get, &mut a, x, y_chunk, y_origin
                    ))
                }
            }
        },
    );
}

////////////////////////////////////////////////////////////////////////////
// Transpose: y[i - lag_j] += a_j(i) x[i]

/// In place, ascending: `y[i]` is initialized before any later sample
/// scatters into it.
pub(crate) fn transpose_in_place<
    T: Sample,
    G: FnMut(usize, usize, usize, &mut [T]),
>(
    zones: &ZoneBounds,
    taps: &Taps,
    mut get: G,
    xy: &mut [T],
) {
    profiling::scope!("local_causal_filter::apply_transpose");
    let mut a = vec![T::zero(); taps.len()];
    zones.for_each_segment(ScanOrder::Ascending, |segment| {
        with_checks!(segment.checks, C => transpose_segment::<T, G, C>(
            taps, &segment, &mut get, &mut a, xy
        ))
    });
}

fn transpose_segment<
    T: Sample,
    G: FnMut(usize, usize, usize, &mut [T]),
    const C: u8,
>(
    taps: &Taps,
    segment: &Segment,
    get: &mut G,
    a: &mut [T],
    xy: &mut [T],
) {
    for i1 in segment.i1.clone() {
        get(i1, segment.i2, segment.i3, a);
        let i = taps.linear(i1, segment.i2, segment.i3);
        let xi = xy[i];
        xy[i] = a[0] * xi;
        for j in 1..a.len() {
            if let Some(k) = taps.source::<C>(j, at(segment, i1), i) {
                xy[k] = xy[k] + a[j] * xi;
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////
// Inverse: x[i] = (y[i] - sum_{j>0} a_j(i) x[i - lag_j]) / a_0(i)

/// In place, ascending: every tap reads an already solved sample.
pub(crate) fn inverse_in_place<
    T: Sample,
    G: FnMut(usize, usize, usize, &mut [T]),
>(
    zones: &ZoneBounds,
    taps: &Taps,
    mut get: G,
    yx: &mut [T],
) {
    profiling::scope!("local_causal_filter::apply_inverse");
    let mut a = vec![T::zero(); taps.len()];
    zones.for_each_segment(ScanOrder::Ascending, |segment| {
        with_checks!(segment.checks, C => inverse_segment::<T, G, C>(
            taps, &segment, &mut get, &mut a, yx
        ))
    });
}

fn inverse_segment<
    T: Sample,
    G: FnMut(usize, usize, usize, &mut [T]),
    const C: u8,
>(
    taps: &Taps,
    segment: &Segment,
    get: &mut G,
    a: &mut [T],
    yx: &mut [T],
) {
    for i1 in segment.i1.clone() {
        get(i1, segment.i2, segment.i3, a);
        let i = taps.linear(i1, segment.i2, segment.i3);
        let mut xi = T::zero();
        for j in 1..a.len() {
            if let Some(k) = taps.source::<C>(j, at(segment, i1), i) {
                xi = xi + a[j] * yx[k];
            }
        }
        yx[i] = (yx[i] - xi) / a[0];
    }
}

////////////////////////////////////////////////////////////////////////////
// Inverse transpose: x[i] = (y[i] - x[i]) / a_0(i), x[i - lag_j] += a_j(i) x[i]

/// Descending. `x` accumulates the scatter of later samples until the
/// sample itself is solved, so `x` and `y` must be distinct buffers.
pub(crate) fn inverse_transpose<
    T: Sample,
    G: FnMut(usize, usize, usize, &mut [T]),
>(
    zones: &ZoneBounds,
    taps: &Taps,
    mut get: G,
    y: &[T],
    x: &mut [T],
) {
    profiling::scope!("local_causal_filter::apply_inverse_transpose");
    x.fill(T::zero());
    let mut a = vec![T::zero(); taps.len()];
    zones.for_each_segment(ScanOrder::Descending, |segment| {
        with_checks!(segment.checks, C => inverse_transpose_segment::<T, G, C>(
            taps, &segment, &mut get, &mut a, y, x
        ))
    });
}

fn inverse_transpose_segment<
    T: Sample,
    G: FnMut(usize, usize, usize, &mut [T]),
    const C: u8,
>(
    taps: &Taps,
    segment: &Segment,
    get: &mut G,
    a: &mut [T],
    y: &[T],
    x: &mut [T],
) {
    for i1 in segment.i1.clone().rev() {
        get(i1, segment.i2, segment.i3, a);
        let i = taps.linear(i1, segment.i2, segment.i3);
        let xi = (y[i] - x[i]) / a[0];
        x[i] = xi;
        for j in 1..a.len() {
            if let Some(k) = taps.source::<C>(j, at(segment, i1), i) {
                x[k] = x[k] + a[j] * xi;
            }
        }
    }
}
