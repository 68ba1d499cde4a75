use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use image::{RgbImage, imageops};
use log::{info, warn};
use rayon::prelude::*;

use crate::frame_io::{list_frames, load_rgb8};

/// Places `frames` left to right on one canvas. All frames must share a
/// height.
pub fn hstack(frames: &[RgbImage]) -> Result<RgbImage> {
    let Some(first) = frames.first() else {
        bail!("nothing to stack");
    };
    let height = first.height();
    if let Some(odd) = frames.iter().position(|f| f.height() != height) {
        bail!(
            "frame {odd} is {} px tall, expected {height}",
            frames[odd].height()
        );
    }

    let width = frames.iter().map(|f| f.width()).sum();
    let mut canvas = RgbImage::new(width, height);
    let mut x = 0i64;
    for frame in frames {
        imageops::replace(&mut canvas, frame, x, 0);
        x += i64::from(frame.width());
    }
    Ok(canvas)
}

/// Writes `out/frame_{i}.png` holding frame `i` of every input directory side
/// by side, for `i` up to the length of the shortest sequence. Returns the
/// number of frames written.
pub fn run_compare(inputs: &[PathBuf], out: &Path) -> Result<usize> {
    if inputs.len() < 2 {
        bail!("compare needs at least two frame directories");
    }

    let sequences = inputs
        .iter()
        .map(|dir| list_frames(dir))
        .collect::<Result<Vec<_>>>()?;
    let count = sequences.iter().map(Vec::len).min().unwrap_or(0);
    if sequences.iter().any(|s| s.len() != count) {
        warn!("sequence lengths differ, comparing first {count} frames");
    }

    fs::create_dir_all(out).with_context(|| format!("creating output dir {}", out.display()))?;

    (0..count).into_par_iter().try_for_each(|i| -> Result<()> {
        let frames = sequences
            .iter()
            .map(|seq| load_rgb8(&seq[i]))
            .collect::<Result<Vec<_>>>()?;
        let path = out.join(format!("frame_{i}.png"));
        hstack(&frames)
            .with_context(|| format!("stacking frame {i}"))?
            .save(&path)
            .with_context(|| format!("saving image {}", path.display()))
    })?;

    info!(
        "wrote {count} side-by-side frames from {} sources into {}",
        inputs.len(),
        out.display()
    );
    Ok(count)
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::hstack;

    #[test]
    fn hstack_places_frames_left_to_right() {
        let left = RgbImage::from_pixel(2, 3, Rgb([255, 0, 0]));
        let right = RgbImage::from_pixel(3, 3, Rgb([0, 0, 255]));
        let both = hstack(&[left, right]).expect("same height");

        assert_eq!(both.dimensions(), (5, 3));
        assert_eq!(both.get_pixel(1, 2), &Rgb([255, 0, 0]));
        assert_eq!(both.get_pixel(2, 0), &Rgb([0, 0, 255]));
        assert_eq!(both.get_pixel(4, 2), &Rgb([0, 0, 255]));
    }

    #[test]
    fn hstack_rejects_mixed_heights() {
        let a = RgbImage::new(2, 3);
        let b = RgbImage::new(2, 4);
        assert!(hstack(&[a, b]).is_err());
        assert!(hstack(&[]).is_err());
    }
}
