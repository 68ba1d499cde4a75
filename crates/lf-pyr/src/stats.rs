use lf_core::{Error, ImageView};

/// Per-sample absolute difference summary between two same-shape grids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffStats {
    pub mean_abs: f32,
    pub max_abs: f32,
}

pub fn diff_stats(a: &ImageView<'_, f32>, b: &ImageView<'_, f32>) -> Result<DiffStats, Error> {
    if a.dims() != b.dims() {
        return Err(Error::DimensionMismatch {
            expected: a.dims(),
            actual: b.dims(),
        });
    }
    if a.is_empty() {
        return Err(Error::InvalidArgument("cannot compare empty grids"));
    }

    // f64 accumulator: frame-sized sums lose precision in f32.
    let mut sum = 0.0f64;
    let mut max_abs = 0.0f32;
    for y in 0..a.height() {
        for (&va, &vb) in a.row(y).iter().zip(b.row(y)) {
            let d = (va - vb).abs();
            sum += d as f64;
            max_abs = max_abs.max(d);
        }
    }

    Ok(DiffStats {
        mean_abs: (sum / (a.width() * a.height()) as f64) as f32,
        max_abs,
    })
}
