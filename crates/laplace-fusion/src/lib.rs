//! Umbrella crate for the `laplace-fusion` workspace.
//!
//! Re-exports the grid types, the pyramid primitives and the fusion engine so
//! downstream code depends on one crate.

pub use lf_core::*;
pub use lf_fusion::*;
pub use lf_pyr::*;
