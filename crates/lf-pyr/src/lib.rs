//! Multi-resolution pyramids over `f32` sample grids.
//!
//! `lf-pyr` smooths with a fixed 5-tap binomial kernel `[1, 4, 6, 4, 1] / 16`
//! applied separably.
//!
//! Ceil-halving policy:
//! - One downsample step maps `(w, h)` to `(ceil(w/2), ceil(h/2))`.
//! - Upsampling always takes an explicit target size, so odd dimensions are
//!   realigned by the caller instead of being guessed.
//!
//! Representational meaning:
//! - Gaussian level `L+1` is the smoothed, decimated level `L`.
//! - Laplacian band `L` is Gaussian level `L` minus the upsampled level
//!   `L+1`; the last band is the coarsest Gaussian level.
//! - [`reconstruct`] reverses the decomposition up to float rounding.

mod kernel;
mod pyramid;
mod resample;
mod stats;

pub use kernel::{BINOMIAL5, RADIUS, UPSAMPLE_GAIN};
pub use pyramid::{GaussianPyramid, LaplacianPyramid, reconstruct};
pub use resample::{down_dims, pyr_down_f32, pyr_up_f32};
pub use stats::{DiffStats, diff_stats};
