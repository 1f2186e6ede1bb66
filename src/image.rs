use crate::field::*;
use crate::util::*;

/// Map a sample to `[0, 1]` for a color gradient, with `scale` mapping
/// to 1 and `-scale` to 0.
fn normalize<T: Sample>(v: T, scale: f64) -> f64 {
    let v = v.to_f64().unwrap_or(0.0);
    if scale > 0.0 {
        (0.5 + 0.5 * v / scale).clamp(0.0, 1.0)
    } else {
        0.5
    }
}

/// Largest magnitude in the field, used to center the colors on zero.
pub fn max_abs<T: Sample, const D: usize, F: FieldView<T, D> + ?Sized>(
    field: &F,
) -> f64 {
    field
        .buffer()
        .iter()
        .map(|v| v.to_f64().unwrap_or(0.0).abs())
        .fold(0.0, f64::max)
}

/// Write a 2D field as a PNG, `i1` left to right and `i2` top to bottom.
/// Zero maps to the middle of the gradient.
pub fn image2d<
    T: Sample,
    P: AsRef<std::path::Path>,
    FieldType: FieldView<T, 2> + ?Sized,
>(
    field: &FieldType,
    s: &P,
) -> image::ImageResult<()> {
    let shape = field.shape();
    let scale = max_abs(field);
    let gradient = colorous::TURBO;
    let mut img = image::RgbImage::new(shape[0] as u32, shape[1] as u32);
    for (l, v) in field.buffer().iter().enumerate() {
        let c = gradient.eval_continuous(normalize(*v, scale));
        img.put_pixel(
            (l % shape[0]) as u32,
            (l / shape[0]) as u32,
            image::Rgb(c.as_array()),
        );
    }
    img.save(s)
}
