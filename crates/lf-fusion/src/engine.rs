use lf_core::{BorderMode, Channel, Error, Image, ImageView, RgbFrame};
use lf_pyr::LaplacianPyramid;
use log::debug;
use rayon::prelude::*;

use crate::blend::blend_pyramids;
use crate::weights::{ChannelWeights, validate_level_weights};

/// Laplacian pyramid fusion of two aligned sources.
///
/// The engine holds only the border mode used by every resampling step, so
/// one instance can be shared freely across threads.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FusionEngine {
    border: BorderMode<f32>,
}

impl FusionEngine {
    pub fn new(border: BorderMode<f32>) -> Self {
        Self { border }
    }

    pub fn border(&self) -> BorderMode<f32> {
        self.border
    }

    /// Fuses one channel: decompose both sources to `depth` levels, blend
    /// band `k` as `w[k] * a + (1 - w[k]) * b`, reconstruct.
    pub fn fuse_channel(
        &self,
        a: &ImageView<'_, f32>,
        b: &ImageView<'_, f32>,
        weights: &[f32],
        depth: usize,
    ) -> Result<Image<f32>, Error> {
        if a.dims() != b.dims() {
            return Err(Error::DimensionMismatch {
                expected: a.dims(),
                actual: b.dims(),
            });
        }
        validate_level_weights(weights, depth)?;

        let pa = LaplacianPyramid::build(a, depth, &self.border)?;
        let pb = LaplacianPyramid::build(b, depth, &self.border)?;
        blend_pyramids(&pa, &pb, weights)?.reconstruct()
    }

    /// Fuses all three channels, each with its own weight vector.
    ///
    /// Channels are independent and run in parallel.
    pub fn fuse_frame(
        &self,
        a: &RgbFrame,
        b: &RgbFrame,
        weights: &ChannelWeights,
    ) -> Result<RgbFrame, Error> {
        if a.dims() != b.dims() {
            return Err(Error::DimensionMismatch {
                expected: a.dims(),
                actual: b.dims(),
            });
        }

        let fuse = |channel: Channel| {
            self.fuse_channel(
                &a.plane(channel).as_view(),
                &b.plane(channel).as_view(),
                weights.channel(channel),
                weights.depth(),
            )
        };

        let (red, (green, blue)) = rayon::join(
            || fuse(Channel::Red),
            || rayon::join(|| fuse(Channel::Green), || fuse(Channel::Blue)),
        );

        RgbFrame::from_planes(red?, green?, blue?)
    }

    /// Pairs frames by index, truncating to the shorter sequence, and fuses
    /// every pair in parallel. Output order follows input order.
    pub fn fuse_sequence(
        &self,
        frames_a: &[RgbFrame],
        frames_b: &[RgbFrame],
        weights: &ChannelWeights,
    ) -> Result<Vec<RgbFrame>, Error> {
        let count = frames_a.len().min(frames_b.len());
        if frames_a.len() != frames_b.len() {
            debug!(
                "sequence lengths differ ({} vs {}), fusing first {count} pairs",
                frames_a.len(),
                frames_b.len()
            );
        }

        frames_a[..count]
            .par_iter()
            .zip(frames_b[..count].par_iter())
            .enumerate()
            .map(|(i, (a, b))| {
                debug!("fusing pair {i}: {}x{}", a.width(), a.height());
                self.fuse_frame(a, b, weights)
            })
            .collect()
    }
}
