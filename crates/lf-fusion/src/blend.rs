use lf_core::{Error, Image};
use lf_pyr::LaplacianPyramid;

/// `weight * a + (1 - weight) * b`, element-wise.
pub fn blend_band(a: &Image<f32>, b: &Image<f32>, weight: f32) -> Result<Image<f32>, Error> {
    if a.dims() != b.dims() {
        return Err(Error::DimensionMismatch {
            expected: a.dims(),
            actual: b.dims(),
        });
    }

    let data = a
        .data()
        .iter()
        .zip(b.data())
        .map(|(&va, &vb)| weight * va + (1.0 - weight) * vb)
        .collect();
    Image::from_vec(a.width(), a.height(), data)
}

/// Blends two same-shape pyramids band by band with one weight per band.
///
/// The result keeps the border mode of `a`.
pub fn blend_pyramids(
    a: &LaplacianPyramid,
    b: &LaplacianPyramid,
    weights: &[f32],
) -> Result<LaplacianPyramid, Error> {
    if a.len() != b.len() || weights.len() != a.len() {
        return Err(Error::LevelCountMismatch {
            expected: a.len(),
            actual: if a.len() != b.len() {
                b.len()
            } else {
                weights.len()
            },
        });
    }

    let bands = a
        .bands()
        .iter()
        .zip(b.bands())
        .zip(weights)
        .map(|((ba, bb), &w)| blend_band(ba, bb, w))
        .collect::<Result<Vec<_>, _>>()?;

    LaplacianPyramid::from_bands(bands, &a.border())
}
