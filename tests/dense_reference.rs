//! Compare every operator against the dense matrix of the forward filter,
//! built sample by sample with explicit bounds tests.

use nalgebra::{DMatrix, DVector};
use nshp::field::*;
use nshp::filter::LocalCausalFilter;
use nshp::lags::LagTable;
use nshp::util::*;

/// Spatially varying coefficients, diagonally dominant so every
/// inverse is well conditioned.
fn coefficient(i: [usize; 3], j: usize, m: usize) -> f64 {
    if j == 0 {
        2.0 + 0.1 * ((i[0] + 2 * i[1] + 3 * i[2]) % 4) as f64
    } else {
        let h = (7 * i[0] + 11 * i[1] + 13 * i[2] + 17 * j) % 9;
        (h as f64 - 4.0) / (4.0 * m as f64)
    }
}

fn fill(i: [usize; 3], c: &mut [f64]) {
    let m = c.len();
    for (j, v) in c.iter_mut().enumerate() {
        *v = coefficient(i, j, m);
    }
}

/// Results of the four operators on one input, from dense linear algebra.
struct Expected {
    x: Vec<f64>,
    forward: DVector<f64>,
    transpose: DVector<f64>,
    inverse: DVector<f64>,
    inverse_transpose: DVector<f64>,
}

/// Dense forward operator of `lags` applied in `dimension` on `grid`.
fn dense(lags: &LagTable, dimension: usize, grid: [usize; 3]) -> DMatrix<f64> {
    let n = grid.iter().product();
    let m = lags.len();
    let mut result = DMatrix::zeros(n, n);
    for row in 0..n {
        let i = [
            row % grid[0],
            (row / grid[0]) % grid[1],
            row / (grid[0] * grid[1]),
        ];
        for j in 0..m {
            let lag = lags.lag(j);
            let mut k = [0i64; 3];
            let mut inside = true;
            for axis in 0..3 {
                let l = if axis < dimension { lag[axis] } else { 0 };
                k[axis] = i[axis] as i64 - l as i64;
                inside &= 0 <= k[axis] && k[axis] < grid[axis] as i64;
            }
            if inside {
                let col = k[0] as usize
                    + grid[0] * (k[1] as usize + grid[1] * k[2] as usize);
                result[(row, col)] += coefficient(i, j, m);
            }
        }
    }
    result
}

fn expected(lags: &LagTable, dimension: usize, grid: [usize; 3]) -> Expected {
    let a = dense(lags, dimension, grid);
    let n = a.nrows();
    let x: Vec<f64> = (0..n).map(|i| ((i * 37) % 11) as f64 / 11.0 - 0.5).collect();
    let xv = DVector::from_column_slice(&x);
    let (inverse, inverse_transpose) = if n == 0 {
        (DVector::zeros(0), DVector::zeros(0))
    } else {
        (
            a.clone().lu().solve(&xv).unwrap(),
            a.transpose().lu().solve(&xv).unwrap(),
        )
    };
    Expected {
        forward: &a * &xv,
        transpose: a.transpose() * &xv,
        inverse,
        inverse_transpose,
        x,
    }
}

#[track_caller]
fn assert_close(expected: &DVector<f64>, actual: &[f64]) {
    assert_eq!(expected.len(), actual.len());
    for (i, (e, a)) in expected.iter().zip(actual).enumerate() {
        assert!((e - a).abs() < 1e-10, "sample {}: {} != {}", i, e, a);
    }
}

fn check_1d(lags: &LagTable, n1: usize) {
    let e = expected(lags, 1, [n1, 1, 1]);
    let filter = LocalCausalFilter::new(lags.clone());
    let c = |i1: usize, a: &mut [f64]| fill([i1, 0, 0], a);
    let x = e.x.clone();
    let mut y = vec![0.0; n1];
    filter.apply_1d(&c, &x, &mut y).unwrap();
    assert_close(&e.forward, &y);
    filter.apply_transpose_1d(&c, &x, &mut y).unwrap();
    assert_close(&e.transpose, &y);
    filter.apply_inverse_1d(&c, &x, &mut y).unwrap();
    assert_close(&e.inverse, &y);
    filter.apply_inverse_transpose_1d(&c, &x, &mut y).unwrap();
    assert_close(&e.inverse_transpose, &y);
}

fn check_2d(lags: &LagTable, shape: Shape<2>) {
    let e = expected(lags, 2, [shape[0], shape[1], 1]);
    let filter = LocalCausalFilter::new(lags.clone());
    let c = |i1: usize, i2: usize, a: &mut [f64]| fill([i1, i2, 0], a);
    let x = OwnedField::from_vec(shape, e.x.clone()).unwrap();
    let mut y = OwnedField::new(shape);
    filter.apply_2d(&c, &x, &mut y).unwrap();
    assert_close(&e.forward, y.buffer());
    filter.par_apply_2d(&c, &x, &mut y, 2).unwrap();
    assert_close(&e.forward, y.buffer());
    filter.apply_transpose_2d(&c, &x, &mut y).unwrap();
    assert_close(&e.transpose, y.buffer());
    filter.apply_inverse_2d(&c, &x, &mut y).unwrap();
    assert_close(&e.inverse, y.buffer());
    filter.apply_inverse_transpose_2d(&c, &x, &mut y).unwrap();
    assert_close(&e.inverse_transpose, y.buffer());
}

fn check_3d(lags: &LagTable, shape: Shape<3>) {
    let e = expected(lags, 3, [shape[0], shape[1], shape[2]]);
    let filter = LocalCausalFilter::new(lags.clone());
    let c = |i1: usize, i2: usize, i3: usize, a: &mut [f64]| {
        fill([i1, i2, i3], a)
    };
    let x = OwnedField::from_vec(shape, e.x.clone()).unwrap();
    let mut y = OwnedField::new(shape);
    filter.apply_3d(&c, &x, &mut y).unwrap();
    assert_close(&e.forward, y.buffer());
    filter.par_apply_3d(&c, &x, &mut y, 3).unwrap();
    assert_close(&e.forward, y.buffer());
    filter.apply_transpose_3d(&c, &x, &mut y).unwrap();
    assert_close(&e.transpose, y.buffer());
    filter.apply_inverse_3d(&c, &x, &mut y).unwrap();
    assert_close(&e.inverse, y.buffer());
    filter.apply_inverse_transpose_3d(&c, &x, &mut y).unwrap();
    assert_close(&e.inverse_transpose, y.buffer());
}

#[test]
fn dense_1d() {
    let lags = LagTable::new_1d(&[0, 1, 2, 5]).unwrap();
    for n1 in [0, 1, 2, 3, 5, 6, 13] {
        check_1d(&lags, n1);
    }
}

#[test]
fn dense_2d() {
    let half_plane = LagTable::new_2d(
        &[0, 1, 2, 3, 4, -4, -3, -2, -1, 0],
        &[0, 0, 0, 0, 0, 1, 1, 1, 1, 1],
    )
    .unwrap();
    let long_reach = LagTable::new_2d(&[0, 1, -3, 2], &[0, 0, 2, 3]).unwrap();
    for shape in [
        vector![1, 1],
        vector![3, 2],
        vector![9, 1],
        vector![1, 7],
        vector![8, 6],
        vector![12, 9],
    ] {
        check_2d(&half_plane, shape);
        check_2d(&long_reach, shape);
    }
    // A 2D table in 1D only uses lag1; this one stays causal.
    let quarter_plane = LagTable::new_2d(&[0, 1, 2], &[0, 0, 1]).unwrap();
    check_1d(&quarter_plane, 10);
}

#[test]
fn dense_3d() {
    let lags = LagTable::new_3d(
        &[0, 1, 2, -2, -1, 0, 1, 2, -2, -1, 0, 1, 2, -2, -1, 0],
        &[0, 0, 0, 1, 1, 1, 1, 1, -1, -1, -1, -1, -1, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1],
    )
    .unwrap();
    for shape in [
        vector![1, 1, 1],
        vector![4, 1, 3],
        vector![1, 5, 2],
        vector![2, 2, 2],
        vector![7, 6, 4],
    ] {
        check_3d(&lags, shape);
    }
    // A 3D table without lag3 taps, applied in 2D.
    let planar = LagTable::new_3d(
        &[0, 1, 2, -2, -1],
        &[0, 0, 0, 1, 1],
        &[0, 0, 0, 0, 0],
    )
    .unwrap();
    check_2d(&planar, vector![6, 5]);
}
