//! Foundational types for Laplacian pyramid fusion.
//!
//! ## Sample Grids
//! Single-channel grids are `Image<f32>` (owned, tightly packed) or
//! `ImageView<'_, f32>` (borrowed). Samples are nominally in
//! `[0, 1]`; detail bands of a Laplacian pyramid are signed and unbounded.
//!
//! ## Frames
//! `RgbFrame` stores three same-shape planes in R, G, B order. Channels are
//! never coupled by any operation in this workspace.
//!
//! ## Border Modes
//! Filtering resolves out-of-range samples with clamp, constant fill, or
//! reflect-101 (the default).

mod border;
mod error;
mod frame;
mod image;

pub use border::{BorderMode, fetch, map_index};
pub use error::Error;
pub use frame::{Channel, RgbFrame};
pub use image::{Image, ImageView};
