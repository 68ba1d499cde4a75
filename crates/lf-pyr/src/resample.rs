//! Smooth-and-halve / double-and-smooth primitives.
//!
//! Both directions apply the separable [`BINOMIAL5`] kernel, rows first then
//! columns. Out-of-range samples are resolved on the *source* grid with the
//! caller's [`BorderMode`], so every output sample is a weighted sum whose
//! weights add up to 1 for clamp and reflect-101.

use lf_core::{BorderMode, Error, Image, ImageView, fetch, map_index};

use crate::kernel::{BINOMIAL5, RADIUS, UPSAMPLE_GAIN};

/// Size of one downsample step: `(ceil(w/2), ceil(h/2))`.
#[inline]
pub fn down_dims(width: usize, height: usize) -> (usize, usize) {
    (width.div_ceil(2), height.div_ceil(2))
}

/// Smooths `src` and keeps every other row and column, starting at 0.
pub fn pyr_down_f32(
    src: &ImageView<'_, f32>,
    border: &BorderMode<f32>,
) -> Result<Image<f32>, Error> {
    if src.is_empty() {
        return Err(Error::InvalidArgument("cannot downsample an empty grid"));
    }

    let (dst_w, dst_h) = down_dims(src.width(), src.height());

    let mut rows = Image::new_fill(dst_w, src.height(), 0.0f32);
    for y in 0..src.height() {
        let src_row = src.row(y);
        for (x, out) in rows.row_mut(y).iter_mut().enumerate() {
            *out = smooth_at(src_row, 2 * x, border);
        }
    }

    let mut dst = Image::new_fill(dst_w, dst_h, 0.0f32);
    for y in 0..dst_h {
        let acc = dst.row_mut(y);
        for (k, &w) in BINOMIAL5.iter().enumerate() {
            let sy = (2 * y + k) as isize - RADIUS as isize;
            add_weighted_row(acc, &rows, sy, w, border);
        }
    }

    Ok(dst)
}

/// Zero-inserts `src` to `dst_w x dst_h` and smooths with the gain-corrected
/// kernel.
///
/// The target size is explicit: with odd dimensions `pyr_down_f32` and this
/// function are not inverse, and only the caller knows the finer shape.
pub fn pyr_up_f32(
    src: &ImageView<'_, f32>,
    dst_w: usize,
    dst_h: usize,
    border: &BorderMode<f32>,
) -> Result<Image<f32>, Error> {
    if src.is_empty() {
        return Err(Error::InvalidArgument("cannot upsample an empty grid"));
    }
    if dst_w == 0 || dst_h == 0 {
        return Err(Error::InvalidArgument("upsample target has zero area"));
    }

    let mut rows = Image::new_fill(dst_w, src.height(), 0.0f32);
    for y in 0..src.height() {
        let src_row = src.row(y);
        for (x, out) in rows.row_mut(y).iter_mut().enumerate() {
            *out = expand_at(src_row, x, border);
        }
    }

    let mut dst = Image::new_fill(dst_w, dst_h, 0.0f32);
    for y in 0..dst_h {
        let acc = dst.row_mut(y);
        for (k, &w) in BINOMIAL5.iter().enumerate() {
            if let Some(sy) = source_phase(y, k) {
                add_weighted_row(acc, &rows, sy, UPSAMPLE_GAIN * w, border);
            }
        }
    }

    Ok(dst)
}

/// Kernel response centered on `row[center]`.
#[inline]
fn smooth_at(row: &[f32], center: usize, border: &BorderMode<f32>) -> f32 {
    if center >= RADIUS && center + RADIUS < row.len() {
        return row[center - RADIUS..=center + RADIUS]
            .iter()
            .zip(BINOMIAL5.iter())
            .map(|(&v, &w)| v * w)
            .sum();
    }

    let c = center as isize - RADIUS as isize;
    BINOMIAL5
        .iter()
        .enumerate()
        .map(|(k, &w)| w * fetch(row, c + k as isize, border).unwrap_or(0.0))
        .sum()
}

/// Output sample `x` of the zero-inserted, smoothed row.
#[inline]
fn expand_at(row: &[f32], x: usize, border: &BorderMode<f32>) -> f32 {
    let mut acc = 0.0f32;
    for (k, &w) in BINOMIAL5.iter().enumerate() {
        if let Some(sx) = source_phase(x, k) {
            acc += UPSAMPLE_GAIN * w * fetch(row, sx, border).unwrap_or(0.0);
        }
    }
    acc
}

/// Source index feeding output `i` through tap `k`, or `None` when that tap
/// lands on an inserted zero.
#[inline]
fn source_phase(i: usize, k: usize) -> Option<isize> {
    let t = (i + RADIUS) as isize - k as isize;
    if t.rem_euclid(2) == 0 {
        Some(t / 2)
    } else {
        None
    }
}

fn add_weighted_row(
    acc: &mut [f32],
    rows: &Image<f32>,
    y: isize,
    weight: f32,
    border: &BorderMode<f32>,
) {
    let len = rows.height();
    let idx = if y >= 0 && (y as usize) < len {
        Some(y as usize)
    } else {
        map_index(y, len, border)
    };

    match (idx, border) {
        (Some(idx), _) => {
            for (a, &v) in acc.iter_mut().zip(rows.row(idx)) {
                *a += weight * v;
            }
        }
        (None, BorderMode::Constant(fill)) => {
            for a in acc.iter_mut() {
                *a += weight * fill;
            }
        }
        (None, _) => {}
    }
}
