use nshp::demo_args::*;
use nshp::field::random::rand_owned;
use nshp::field::*;
use nshp::filter::LocalCausalFilter;
use nshp::image::image2d;
use nshp::lags::LagTable;
use nshp::util::*;
use rand::prelude::*;
use rand::rngs::StdRng;

/// Pole of a one-sided exponential smoother with the given radius.
fn pole(radius: f64) -> f64 {
    radius / (1.0 + radius)
}

fn main() -> DemoResult<()> {
    let args = Args::cli_setup("impulse_2d")?;
    let shape = args.shape();
    let n1 = shape[0];

    // (1 - r z1)(1 - r z2), scaled to unit gain at zero frequency.
    let lags = LagTable::new_2d(&[0, 1, 0, 1], &[0, 0, 1, 1])?;
    let filter = LocalCausalFilter::new(lags);
    let max_radius = args.radius;
    let a = move |i1: usize, _i2: usize, c: &mut [f64]| {
        let t = i1 as f64 / (n1.max(2) - 1) as f64;
        let r = pole(max_radius * (0.25 + 0.75 * t));
        let s = 1.0 / ((1.0 - r) * (1.0 - r));
        c[0] = s;
        c[1] = -r * s;
        c[2] = -r * s;
        c[3] = r * r * s;
    };

    let mut impulses = OwnedField::<f64, 2>::new(shape);
    let k = args.impulses.max(1);
    for p2 in 0..k {
        for p1 in 0..k {
            let i1 = (2 * p1 + 1) * shape[0] / (2 * k);
            let i2 = (2 * p2 + 1) * shape[1] / (2 * k);
            impulses.set_coord(&vector![i1 as i32, i2 as i32], 1.0);
        }
    }

    // Smooth with inv(A) inv(A'), which is symmetric and positive.
    let mut scratch = OwnedField::new(shape);
    let mut smoothed = OwnedField::new(shape);
    {
        profiling::scope!("impulse_2d::smooth");
        filter.apply_inverse_transpose_2d(&a, &impulses, &mut scratch)?;
        filter.apply_inverse_2d(&a, &scratch, &mut smoothed)?;
    }
    let energy: f64 = smoothed.buffer().iter().sum();
    println!("impulses: {}, total response: {:.6}", k * k, energy);

    // Undo the smoothing: A' A inv(A) inv(A') = I.
    let mut restored = OwnedField::new(shape);
    filter.par_apply_2d(&a, &smoothed, &mut scratch, args.chunk_size)?;
    filter.apply_transpose_2d(&a, &scratch, &mut restored)?;
    let max_error = impulses
        .buffer()
        .iter()
        .zip(restored.buffer())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max);
    println!("max restore error: {:e}", max_error);

    // <S x, y> == <x, S y>
    let mut rng = StdRng::seed_from_u64(0);
    let x: OwnedField<f64, 2> = rand_owned(shape, &mut rng);
    let y: OwnedField<f64, 2> = rand_owned(shape, &mut rng);
    let mut sx = OwnedField::new(shape);
    let mut sy = OwnedField::new(shape);
    filter.apply_inverse_transpose_2d(&a, &x, &mut scratch)?;
    filter.apply_inverse_2d(&a, &scratch, &mut sx)?;
    filter.apply_inverse_transpose_2d(&a, &y, &mut scratch)?;
    filter.apply_inverse_2d(&a, &scratch, &mut sy)?;
    let sxy = dot(&sx, &y)?;
    let xsy = dot(&x, &sy)?;
    println!(
        "symmetry: <Sx, y> = {:.9}, <x, Sy> = {:.9}, difference {:e}",
        sxy,
        xsy,
        (sxy - xsy).abs()
    );

    if args.write_images {
        for (i, field) in [&impulses, &smoothed, &restored].iter().enumerate()
        {
            if let Some(path) = args.frame_name(i) {
                image2d(*field, &path)?;
            }
        }
    }

    args.finish();
    Ok(())
}
