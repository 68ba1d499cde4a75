use lf_core::{Channel, Error};

/// Checks one per-band weight vector against a pyramid depth.
///
/// A pyramid of depth `d` has `d + 1` bands, so the vector needs exactly
/// `d + 1` entries, each finite and inside `[0, 1]`.
pub fn validate_level_weights(weights: &[f32], depth: usize) -> Result<(), Error> {
    if weights.len() != depth + 1 {
        return Err(Error::LevelCountMismatch {
            expected: depth + 1,
            actual: weights.len(),
        });
    }

    for (level, &value) in weights.iter().enumerate() {
        if !(0.0..=1.0).contains(&value) {
            return Err(Error::WeightOutOfRange { level, value });
        }
    }

    Ok(())
}

/// Blend weights for source A, one vector per color channel.
///
/// `1.0` at a band takes that band entirely from source A, `0.0` entirely
/// from source B. All three vectors share one length, `depth + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelWeights {
    per_channel: [Vec<f32>; 3],
}

impl ChannelWeights {
    pub fn new(red: Vec<f32>, green: Vec<f32>, blue: Vec<f32>) -> Result<Self, Error> {
        if red.is_empty() {
            return Err(Error::InvalidArgument(
                "weight vectors need at least one entry",
            ));
        }

        let depth = red.len() - 1;
        for weights in [&red, &green, &blue] {
            validate_level_weights(weights, depth)?;
        }

        Ok(Self {
            per_channel: [red, green, blue],
        })
    }

    /// Same vector for all three channels.
    pub fn uniform(weights: Vec<f32>) -> Result<Self, Error> {
        Self::new(weights.clone(), weights.clone(), weights)
    }

    /// Number of downsample steps the weights were written for.
    pub fn depth(&self) -> usize {
        self.per_channel[0].len() - 1
    }

    pub fn channel(&self, channel: Channel) -> &[f32] {
        &self.per_channel[channel.index()]
    }

    /// Replaces one channel's vector, keeping the shared depth.
    pub fn with_channel(mut self, channel: Channel, weights: Vec<f32>) -> Result<Self, Error> {
        validate_level_weights(&weights, self.depth())?;
        self.per_channel[channel.index()] = weights;
        Ok(self)
    }
}
