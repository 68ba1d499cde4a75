use lf_core::{BorderMode, Error, Image, ImageView};
use log::trace;

use crate::resample::{pyr_down_f32, pyr_up_f32};

/// Gaussian pyramid: level 0 is a copy of the source, each next level is
/// [`pyr_down_f32`] of the previous one.
///
/// `depth` downsample steps produce `depth + 1` levels. Once an axis reaches
/// one sample it stays at one sample.
#[derive(Debug, Clone)]
pub struct GaussianPyramid {
    levels: Vec<Image<f32>>,
}

impl GaussianPyramid {
    pub fn build(
        src: &ImageView<'_, f32>,
        depth: usize,
        border: &BorderMode<f32>,
    ) -> Result<Self, Error> {
        if src.is_empty() {
            return Err(Error::InvalidArgument("pyramid source has zero area"));
        }

        let mut levels = Vec::with_capacity(depth + 1);
        levels.push(src.to_image());
        for i in 1..=depth {
            let next = pyr_down_f32(&levels[i - 1].as_view(), border)?;
            trace!("gaussian level {i}: {}x{}", next.width(), next.height());
            levels.push(next);
        }

        Ok(Self { levels })
    }

    pub fn level(&self, i: usize) -> Option<&Image<f32>> {
        self.levels.get(i)
    }

    pub fn levels(&self) -> &[Image<f32>] {
        &self.levels
    }

    /// Number of downsample steps.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn into_levels(self) -> Vec<Image<f32>> {
        self.levels
    }
}

/// Laplacian pyramid, finest band first.
///
/// Every band but the last is the signed difference between a Gaussian level
/// and the upsampled next-coarser level. The last band is the coarsest
/// Gaussian level itself.
#[derive(Debug, Clone)]
pub struct LaplacianPyramid {
    bands: Vec<Image<f32>>,
    border: BorderMode<f32>,
}

impl LaplacianPyramid {
    pub fn build(
        src: &ImageView<'_, f32>,
        depth: usize,
        border: &BorderMode<f32>,
    ) -> Result<Self, Error> {
        let gaussian = GaussianPyramid::build(src, depth, border)?;
        Self::from_gaussian(gaussian, border)
    }

    pub fn from_gaussian(
        gaussian: GaussianPyramid,
        border: &BorderMode<f32>,
    ) -> Result<Self, Error> {
        let mut levels = gaussian.into_levels();

        let mut bands = Vec::with_capacity(levels.len());
        for pair in levels.windows(2) {
            let (finer, coarser) = (&pair[0], &pair[1]);
            let mut detail =
                pyr_up_f32(&coarser.as_view(), finer.width(), finer.height(), border)?;
            for (d, &f) in detail.data_mut().iter_mut().zip(finer.data()) {
                *d = f - *d;
            }
            bands.push(detail);
        }

        let Some(base) = levels.pop() else {
            return Err(Error::InvalidArgument("gaussian pyramid is empty"));
        };
        bands.push(base);

        Ok(Self {
            bands,
            border: *border,
        })
    }

    /// Wraps externally produced bands, e.g. a blend of two pyramids.
    pub fn from_bands(bands: Vec<Image<f32>>, border: &BorderMode<f32>) -> Result<Self, Error> {
        if bands.is_empty() {
            return Err(Error::InvalidArgument("laplacian pyramid has no bands"));
        }
        if bands.iter().any(Image::is_empty) {
            return Err(Error::InvalidArgument("laplacian band has zero area"));
        }

        Ok(Self {
            bands,
            border: *border,
        })
    }

    pub fn band(&self, i: usize) -> Option<&Image<f32>> {
        self.bands.get(i)
    }

    pub fn bands(&self) -> &[Image<f32>] {
        &self.bands
    }

    /// The low-pass base band.
    pub fn base(&self) -> &Image<f32> {
        &self.bands[self.bands.len() - 1]
    }

    /// Number of bands, `depth + 1`.
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.bands.len() - 1
    }

    pub fn border(&self) -> BorderMode<f32> {
        self.border
    }

    pub fn reconstruct(&self) -> Result<Image<f32>, Error> {
        reconstruct(&self.bands, &self.border)
    }
}

/// Collapses finest-first Laplacian bands into one grid with the shape of
/// `bands[0]`.
pub fn reconstruct(bands: &[Image<f32>], border: &BorderMode<f32>) -> Result<Image<f32>, Error> {
    let Some((base, details)) = bands.split_last() else {
        return Err(Error::InvalidArgument("cannot reconstruct from zero bands"));
    };

    let mut running = base.clone();
    for band in details.iter().rev() {
        let mut expanded = pyr_up_f32(&running.as_view(), band.width(), band.height(), border)?;
        add_assign(&mut expanded, band)?;
        running = expanded;
    }

    Ok(running)
}

fn add_assign(acc: &mut Image<f32>, rhs: &Image<f32>) -> Result<(), Error> {
    check_same_dims(acc, rhs)?;
    for (a, &b) in acc.data_mut().iter_mut().zip(rhs.data()) {
        *a += b;
    }
    Ok(())
}

fn check_same_dims(a: &Image<f32>, b: &Image<f32>) -> Result<(), Error> {
    if a.dims() != b.dims() {
        return Err(Error::DimensionMismatch {
            expected: a.dims(),
            actual: b.dims(),
        });
    }
    Ok(())
}
