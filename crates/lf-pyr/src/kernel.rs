/// Half-width of the smoothing kernel.
pub const RADIUS: usize = 2;

/// 5-tap binomial low-pass `[1, 4, 6, 4, 1] / 16`.
///
/// Symmetric and sums to exactly 1 in `f32`, so a constant grid passes
/// through smoothing unchanged.
pub const BINOMIAL5: [f32; 2 * RADIUS + 1] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

/// Gain applied per axis after zero insertion. Half of the taps of every
/// output sample land on inserted zeros, so the surviving taps sum to 1/2.
pub const UPSAMPLE_GAIN: f32 = 2.0;
