//! Similarity-based frame pairing.
//!
//! The fusion pipeline pairs frames by sequence index. This module is for
//! callers that instead need to find, for one reference frame, the most
//! similar frame in an unordered candidate set. The metric is an explicit
//! argument.

use lf_core::{Error, RgbFrame};
use lf_pyr::diff_stats;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    /// Pearson correlation over every sample of every channel.
    #[default]
    PearsonCorrelation,
    /// Negated mean absolute difference, averaged over channels.
    MeanAbsDiff,
}

impl SimilarityMetric {
    /// Similarity of two same-shape frames. Higher means more similar.
    pub fn score(self, a: &RgbFrame, b: &RgbFrame) -> Result<f64, Error> {
        if a.dims() != b.dims() {
            return Err(Error::DimensionMismatch {
                expected: a.dims(),
                actual: b.dims(),
            });
        }

        match self {
            Self::PearsonCorrelation => Ok(pearson(a, b)),
            Self::MeanAbsDiff => {
                let mut total = 0.0f64;
                for (pa, pb) in a.planes().iter().zip(b.planes()) {
                    total += diff_stats(&pa.as_view(), &pb.as_view())?.mean_abs as f64;
                }
                Ok(-total / 3.0)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatch {
    pub index: usize,
    pub score: f64,
}

/// Scores every candidate against `reference` and returns the best one.
///
/// Ties go to the lowest index. Returns `Ok(None)` for an empty candidate
/// set; any candidate with a different shape is an error.
pub fn best_match(
    reference: &RgbFrame,
    candidates: &[RgbFrame],
    metric: SimilarityMetric,
) -> Result<Option<FrameMatch>, Error> {
    let scores = candidates
        .par_iter()
        .map(|c| metric.score(reference, c))
        .collect::<Result<Vec<_>, _>>()?;

    let mut best: Option<FrameMatch> = None;
    for (index, score) in scores.into_iter().enumerate() {
        if best.is_none_or(|b| score > b.score) {
            best = Some(FrameMatch { index, score });
        }
    }
    Ok(best)
}

/// Zero-variance inputs have no defined correlation and score 0.
fn pearson(a: &RgbFrame, b: &RgbFrame) -> f64 {
    let n = (a.width() * a.height() * 3) as f64;
    if n == 0.0 {
        return 0.0;
    }

    let samples = |f: &RgbFrame| {
        f.planes()
            .iter()
            .flat_map(|p| p.data().iter().map(|&v| v as f64))
            .collect::<Vec<_>>()
    };
    let xs = samples(a);
    let ys = samples(b);

    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&x, &y) in xs.iter().zip(&ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom <= f64::EPSILON {
        return 0.0;
    }
    cov / denom
}
