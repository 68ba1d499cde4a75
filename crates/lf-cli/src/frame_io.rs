use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use image::{GrayImage, ImageReader, RgbImage};
use lf_core::{Image, RgbFrame};
use log::warn;
use serde::Serialize;

/// Numeric index of a frame file named `<n>.png` (or `<prefix>_<n>.png`).
pub fn frame_index(path: &Path) -> Option<u64> {
    let stem = path.file_stem()?.to_str()?;
    let digits = stem.rsplit('_').next()?;
    digits.parse().ok()
}

/// Sorts frame paths by numeric index, then by path; files without an index
/// are dropped. Two files sharing an index are kept and logged, since they
/// shift every later pairing by one.
pub fn sort_frames(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut indexed: Vec<(u64, PathBuf)> = paths
        .into_iter()
        .filter_map(|p| frame_index(&p).map(|i| (i, p)))
        .collect();
    indexed.sort();
    for pair in indexed.windows(2) {
        if pair[0].0 == pair[1].0 {
            warn!(
                "frame index {} used by both {} and {}",
                pair[0].0,
                pair[0].1.display(),
                pair[1].1.display()
            );
        }
    }
    indexed.into_iter().map(|(_, p)| p).collect()
}

/// Lists `*.png` frames in `dir`, ordered by numeric index.
pub fn list_frames(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("frame directory does not exist: {}", dir.display());
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry
            .with_context(|| format!("reading entry in {}", dir.display()))?
            .path();
        let is_png = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("png"));
        if is_png {
            paths.push(path);
        }
    }

    Ok(sort_frames(paths))
}

/// Decodes any supported image file to 8-bit RGB.
pub fn load_rgb8(path: &Path) -> Result<RgbImage> {
    Ok(ImageReader::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .decode()
        .with_context(|| format!("decoding {}", path.display()))?
        .into_rgb8())
}

pub fn load_frame(path: &Path) -> Result<RgbFrame> {
    let rgb = load_rgb8(path)?;
    RgbFrame::from_interleaved_u8(rgb.width() as usize, rgb.height() as usize, rgb.as_raw())
        .with_context(|| format!("splitting channels of {}", path.display()))
}

pub fn save_frame(path: &Path, frame: &RgbFrame) -> Result<()> {
    let (w, h) = frame.dims();
    let rgb = RgbImage::from_raw(w as u32, h as u32, frame.to_interleaved_u8())
        .context("constructing RgbImage from frame bytes")?;
    rgb.save(path)
        .with_context(|| format!("saving image {}", path.display()))
}

/// Writes a grid as 8-bit gray, stretching its value range to `[0, 255]`.
///
/// Detail bands are signed, so a fixed `[0, 1]` mapping would clip them.
pub fn save_band_vis(path: &Path, band: &Image<f32>) -> Result<()> {
    let gray = GrayImage::from_raw(
        band.width() as u32,
        band.height() as u32,
        stretch_to_u8(band.data()),
    )
    .context("constructing GrayImage from band")?;
    gray.save(path)
        .with_context(|| format!("saving image {}", path.display()))
}

pub fn stretch_to_u8(data: &[f32]) -> Vec<u8> {
    let (min_v, max_v) = data
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if data.is_empty() || (max_v - min_v).abs() < 1e-12 {
        return vec![0u8; data.len()];
    }

    let scale = 255.0 / (max_v - min_v);
    data.iter()
        .map(|&v| ((v - min_v) * scale).round().clamp(0.0, 255.0) as u8)
        .collect()
}

pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(path, bytes).with_context(|| format!("writing json {}", path.display()))
}
