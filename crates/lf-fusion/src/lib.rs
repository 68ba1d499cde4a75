//! Multi-resolution fusion of two aligned RGB sources.
//!
//! Each channel of both frames is decomposed into a Laplacian pyramid,
//! band `k` is blended as `w[k] * a + (1 - w[k]) * b` with that channel's own
//! weight vector, and the blend is reconstructed. Low bands carry coarse
//! structure and high bands fine detail, so the two can be mixed at
//! different ratios.
//!
//! Nothing is cached between calls: every pyramid is built, blended and
//! dropped within one [`FusionEngine::fuse_channel`] call. Channels of one
//! frame, and frames of one sequence, are fused in parallel with `rayon`.

mod blend;
mod config;
mod engine;
pub mod pairing;
mod weights;

pub use blend::{blend_band, blend_pyramids};
pub use config::{BorderKind, ConfigError, FusionConfig};
pub use engine::FusionEngine;
pub use pairing::{FrameMatch, SimilarityMetric, best_match};
pub use weights::{ChannelWeights, validate_level_weights};
