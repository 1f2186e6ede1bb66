//! Partition of a field's index space into interior and edge zones.
//!
//! Inside the interior every tap of the stencil lands inside the field, so
//! the kernels skip the per-tap bounds test. Near the edges the zones record
//! exactly which comparisons can fail; taps that fall outside the field are
//! dropped, i.e. the stencil is truncated and the field is implicitly zero
//! padded.
//!
//! Zones are visited row by row, a row being all `i1` for one `(i2, i3)`.
//! For a 3D grid `(n1, n2, n3)` the classification is:
//!
//! * `i3 < i3lo`: the whole row needs every check.
//! * `i2 < i2lo`: the whole row checks both `i1` edges and the low `i2` edge.
//! * `i2 >= i2hi`: the whole row checks both `i1` edges and the high `i2`
//!   edge.
//! * otherwise the row splits into `[0, i1lo)` (low `i1` edge),
//!   `[i1lo, i1hi)` (interior) and `[i1hi, n1)` (high `i1` edge).
//!
//! If the field is too small for any interior to exist, every row needs
//! every check. 1D and 2D fields are 3D grids with unit extents.

use crate::lags::LagTable;
use crate::util::*;
use std::ops::Range;

/// Set of bounds comparisons a zone needs per tap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Checks(u8);

impl Checks {
    pub const NONE: Checks = Checks(0);
    pub const LO1: Checks = Checks(1);
    pub const HI1: Checks = Checks(2);
    pub const LO2: Checks = Checks(4);
    pub const HI2: Checks = Checks(8);
    pub const LO3: Checks = Checks(16);

    /// Rows near the low `i2` edge.
    pub const LO_ROW: Checks = Checks(1 | 2 | 4);

    /// Rows near the high `i2` edge.
    pub const HI_ROW: Checks = Checks(1 | 2 | 8);

    pub const ALL: Checks = Checks(1 | 2 | 4 | 8 | 16);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Checks) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Direction in which an operator visits samples.
/// Ascending is the order of the linear index, `i1` fastest, `i3` slowest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanOrder {
    Ascending,
    Descending,
}

/// A run of samples within one row that share the same checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub i1: Range<usize>,
    pub i2: usize,
    pub i3: usize,
    pub checks: Checks,
}

impl Segment {
    fn empty(i2: usize, i3: usize) -> Self {
        Segment {
            i1: 0..0,
            i2,
            i3,
            checks: Checks::NONE,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.i1.is_empty()
    }
}

/// Zone boundaries for one operator call, computed once from the lag
/// extents and the field's grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoneBounds {
    grid: [usize; 3],
    i1lo: usize,
    i1hi: usize,
    i2lo: usize,
    i2hi: usize,
    i3lo: usize,
}

impl ZoneBounds {
    /// `extents` holds min (column 0) and max (column 1) lag per axis.
    pub fn new(extents: &Bounds<3>, grid: [usize; 3]) -> Self {
        let n = grid.map(|g| g as i64);
        let lo = |axis: usize| (extents[(axis, 1)] as i64).max(0);
        let hi = |axis: usize| (n[axis] + extents[(axis, 0)] as i64).max(0);

        let i1lo = lo(0);
        let i1hi = hi(0).min(n[0]);
        let i2lo = lo(1);
        let i2hi = hi(1).min(n[1]);
        let i3lo = if i1lo <= i1hi && i2lo <= i2hi {
            lo(2).min(n[2])
        } else {
            n[2]
        };

        ZoneBounds {
            grid,
            i1lo: i1lo.min(n[0]) as usize,
            i1hi: i1hi as usize,
            i2lo: i2lo.min(n[1]) as usize,
            i2hi: i2hi as usize,
            i3lo: i3lo as usize,
        }
    }

    /// Zones for an operator of `dimension` applied with `lags`,
    /// which ignores lags on axes above `dimension`.
    pub fn for_table(lags: &LagTable, dimension: usize, grid: [usize; 3]) -> Self {
        Self::new(&lags.projected_extents(dimension), grid)
    }

    pub fn grid(&self) -> [usize; 3] {
        self.grid
    }

    /// Whether any sample can be computed without bounds checks.
    pub fn has_interior(&self) -> bool {
        self.i3lo < self.grid[2]
            && self.i2lo < self.i2hi
            && self.i1lo < self.i1hi
    }

    /// Segments of row `(i2, i3)` in ascending order, unused slots empty.
    pub fn row_segments(&self, i2: usize, i3: usize) -> [Segment; 3] {
        let n1 = self.grid[0];
        let whole = |checks: Checks| {
            [
                Segment {
                    i1: 0..n1,
                    i2,
                    i3,
                    checks,
                },
                Segment::empty(i2, i3),
                Segment::empty(i2, i3),
            ]
        };
        if i3 < self.i3lo {
            whole(Checks::ALL)
        } else if i2 < self.i2lo {
            whole(Checks::LO_ROW)
        } else if i2 >= self.i2hi {
            whole(Checks::HI_ROW)
        } else {
            [
                Segment {
                    i1: 0..self.i1lo,
                    i2,
                    i3,
                    checks: Checks::LO1,
                },
                Segment {
                    i1: self.i1lo..self.i1hi,
                    i2,
                    i3,
                    checks: Checks::NONE,
                },
                Segment {
                    i1: self.i1hi..n1,
                    i2,
                    i3,
                    checks: Checks::HI1,
                },
            ]
        }
    }

    /// Visit every non-empty segment of the grid in scan order.
    /// Within a segment the visitor walks `i1` in the same order.
    pub fn for_each_segment<F: FnMut(Segment)>(&self, order: ScanOrder, mut f: F) {
        let [_, n2, n3] = self.grid;
        match order {
            ScanOrder::Ascending => {
                for i3 in 0..n3 {
                    for i2 in 0..n2 {
                        for segment in self.row_segments(i2, i3) {
                            if !segment.is_empty() {
                                f(segment);
                            }
                        }
                    }
                }
            }
            ScanOrder::Descending => {
                for i3 in (0..n3).rev() {
                    for i2 in (0..n2).rev() {
                        for segment in self.row_segments(i2, i3).into_iter().rev() {
                            if !segment.is_empty() {
                                f(segment);
                            }
                        }
                    }
                }
            }
        }
    }
}
