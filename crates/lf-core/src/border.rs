/// How samples outside a grid are synthesized during filtering.
///
/// Reflect-101 mirrors around the edge sample without repeating it
/// (`... 2 1 | 0 1 2 ... n-1 | n-2 n-3 ...`) and is the default for
/// pyramid resampling.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BorderMode<T> {
    Clamp,
    Constant(T),
    #[default]
    Reflect101,
}

/// Maps a possibly out-of-range index onto `0..len`.
///
/// Returns `None` for `Constant` (the caller substitutes the fill value) and
/// for empty axes.
pub fn map_index<T>(i: isize, len: usize, mode: &BorderMode<T>) -> Option<usize> {
    if len == 0 {
        return None;
    }

    match mode {
        BorderMode::Constant(_) => None,
        BorderMode::Clamp => Some(i.clamp(0, len as isize - 1) as usize),
        BorderMode::Reflect101 => {
            if len == 1 {
                return Some(0);
            }

            let period = (2 * len - 2) as isize;
            let r = i.rem_euclid(period) as usize;
            Some(if r < len { r } else { period as usize - r })
        }
    }
}

/// Reads `samples[i]`, resolving out-of-range `i` through `mode`.
///
/// Returns `None` only when `samples` is empty and the mode is not
/// `Constant`.
#[inline]
pub fn fetch<T: Copy>(samples: &[T], i: isize, mode: &BorderMode<T>) -> Option<T> {
    if i >= 0 && (i as usize) < samples.len() {
        return Some(samples[i as usize]);
    }

    match mode {
        BorderMode::Constant(fill) => Some(*fill),
        _ => map_index(i, samples.len(), mode).map(|idx| samples[idx]),
    }
}
