//! End-to-end properties of per-level, per-channel fusion.

use lf_core::{BorderMode, Channel, Error, Image, RgbFrame};
use lf_fusion::{ChannelWeights, FusionEngine};
use lf_pyr::{LaplacianPyramid, diff_stats};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Deterministic texture with both smooth and sharp content.
fn texture(width: usize, height: usize, seed: u32) -> Image<f32> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    let data = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let noise = (state % 1000) as f32 / 1000.0;
            let smooth = 0.5 + 0.4 * ((x as f32 * 0.3).sin() * (y as f32 * 0.2).cos());
            (0.7 * smooth + 0.3 * noise).clamp(0.0, 1.0)
        })
        .collect();
    Image::from_vec(width, height, data).expect("valid texture")
}

fn texture_frame(width: usize, height: usize, seed: u32) -> RgbFrame {
    RgbFrame::from_planes(
        texture(width, height, seed),
        texture(width, height, seed + 1),
        texture(width, height, seed + 2),
    )
    .expect("same shapes")
}

#[test]
fn reconstruction_round_trip_stays_within_tolerance() {
    let border = BorderMode::Reflect101;
    for (w, h) in [(32, 24), (31, 17)] {
        let src = texture(w, h, 7);
        for depth in 0..=3 {
            let lap = LaplacianPyramid::build(&src.as_view(), depth, &border).expect("valid");
            let rec = lap.reconstruct().expect("non-empty");
            assert_eq!(rec.dims(), src.dims());

            let stats = diff_stats(&rec.as_view(), &src.as_view()).expect("same shape");
            assert!(
                stats.mean_abs < 1e-2,
                "{w}x{h} depth {depth}: {}",
                stats.mean_abs
            );
        }
    }
}

#[test]
fn extreme_weights_pass_one_source_through() {
    init_logging();
    let engine = FusionEngine::default();
    let a = texture(20, 14, 1);
    let b = texture(20, 14, 2);

    for depth in [1, 3] {
        let ones = vec![1.0; depth + 1];
        let zeros = vec![0.0; depth + 1];

        let only_a = engine
            .fuse_channel(&a.as_view(), &b.as_view(), &ones, depth)
            .expect("valid");
        let rec_a = LaplacianPyramid::build(&a.as_view(), depth, &engine.border())
            .expect("valid")
            .reconstruct()
            .expect("non-empty");
        let stats = diff_stats(&only_a.as_view(), &rec_a.as_view()).expect("same shape");
        assert!(stats.max_abs < 1e-6);

        let only_b = engine
            .fuse_channel(&a.as_view(), &b.as_view(), &zeros, depth)
            .expect("valid");
        let stats = diff_stats(&only_b.as_view(), &b.as_view()).expect("same shape");
        assert!(stats.mean_abs < 1e-2);
    }
}

#[test]
fn changing_red_weights_leaves_green_and_blue_untouched() {
    init_logging();
    let engine = FusionEngine::default();
    let a = texture_frame(24, 18, 10);
    let b = texture_frame(24, 18, 20);

    let base = ChannelWeights::new(vec![0.2, 0.5, 0.9], vec![0.7, 0.1, 0.4], vec![1.0, 0.0, 0.5])
        .expect("valid");
    let red_changed = base
        .clone()
        .with_channel(Channel::Red, vec![0.9, 0.9, 0.1])
        .expect("same depth");

    let out1 = engine.fuse_frame(&a, &b, &base).expect("valid");
    let out2 = engine.fuse_frame(&a, &b, &red_changed).expect("valid");

    assert_ne!(out1.plane(Channel::Red), out2.plane(Channel::Red));
    assert_eq!(out1.plane(Channel::Green), out2.plane(Channel::Green));
    assert_eq!(out1.plane(Channel::Blue), out2.plane(Channel::Blue));

    let bytes1 = out1.to_interleaved_u8();
    let bytes2 = out2.to_interleaved_u8();
    for (p1, p2) in bytes1.chunks_exact(3).zip(bytes2.chunks_exact(3)) {
        assert_eq!(p1[1..], p2[1..]);
    }
}

#[test]
fn frame_dimensions_are_preserved() {
    let engine = FusionEngine::default();
    for (w, h) in [(16, 12), (15, 9), (7, 13)] {
        let a = texture_frame(w, h, 3);
        let b = texture_frame(w, h, 4);
        for depth in [0, 1, 2, 4] {
            let weights = ChannelWeights::uniform(vec![0.5; depth + 1]).expect("valid");
            let out = engine.fuse_frame(&a, &b, &weights).expect("valid");
            assert_eq!(out.dims(), (w, h), "depth {depth}");
        }
    }
}

#[test]
fn depth_zero_is_a_direct_blend() {
    let a = texture(9, 7, 30);
    let b = texture(9, 7, 31);
    let w = 0.3f32;

    let out = FusionEngine::default()
        .fuse_channel(&a.as_view(), &b.as_view(), &[w], 0)
        .expect("valid");

    let expected: Vec<f32> = a
        .data()
        .iter()
        .zip(b.data())
        .map(|(&va, &vb)| w * va + (1.0 - w) * vb)
        .collect();
    assert_eq!(out.data(), expected.as_slice());
}

#[test]
fn ones_and_zeros_blend_evenly() {
    let a = Image::new_fill(4, 4, 1.0f32);
    let b = Image::new_fill(4, 4, 0.0f32);
    let out = FusionEngine::default()
        .fuse_channel(&a.as_view(), &b.as_view(), &[0.5, 0.5], 1)
        .expect("valid");

    assert_eq!(out.dims(), (4, 4));
    assert!(out.data().iter().all(|&v| (v - 0.5).abs() < 1e-6));
}

#[test]
fn four_by_four_against_four_by_five_is_a_dimension_mismatch() {
    let a = Image::new_fill(4, 4, 1.0f32);
    let b = Image::new_fill(5, 4, 0.0f32);
    let err = FusionEngine::default()
        .fuse_channel(&a.as_view(), &b.as_view(), &[0.5, 0.5], 1)
        .expect_err("shapes differ");
    assert!(matches!(err, Error::DimensionMismatch { .. }));
}

#[test]
fn out_of_range_weight_is_rejected_before_any_work() {
    let a = Image::new_fill(4, 4, 1.0f32);
    let err = FusionEngine::default()
        .fuse_channel(&a.as_view(), &a.as_view(), &[0.5, -0.1], 1)
        .expect_err("negative weight");
    assert_eq!(
        err,
        Error::WeightOutOfRange {
            level: 1,
            value: -0.1
        }
    );
}

#[test]
fn zero_area_frames_are_invalid() {
    let empty = RgbFrame::new_fill(0, 4, [0.0; 3]);
    let weights = ChannelWeights::uniform(vec![0.5, 0.5]).expect("valid");
    let err = FusionEngine::default()
        .fuse_frame(&empty, &empty, &weights)
        .expect_err("zero area");
    assert!(matches!(err, Error::InvalidArgument(_)));
}
