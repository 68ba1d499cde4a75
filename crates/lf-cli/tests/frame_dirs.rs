use std::fs;
use std::path::{Path, PathBuf};

use lf_cli::compare::run_compare;
use lf_cli::frame_io::{list_frames, load_frame, load_rgb8, save_frame};
use lf_cli::fuse::{FuseOptions, FuseReport, OnError, resolve_config, run_fuse};
use lf_core::RgbFrame;
use lf_fusion::{BorderKind, ChannelWeights, FusionEngine};
use tempfile::{TempDir, tempdir};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn striped(width: usize, height: usize, shade: u8) -> RgbFrame {
    let bytes: Vec<u8> = (0..width * height)
        .flat_map(|i| {
            let v = if (i % width) % 4 < 2 { shade } else { 255 - shade };
            [v, shade, 255 - v]
        })
        .collect();
    RgbFrame::from_interleaved_u8(width, height, &bytes).expect("valid frame")
}

fn write_sequence(dir: &Path, frames: &[RgbFrame]) {
    fs::create_dir_all(dir).expect("create sequence dir");
    for (i, frame) in frames.iter().enumerate() {
        save_frame(&dir.join(format!("{i}.png")), frame).expect("save");
    }
}

/// Source A has two 8x6 frames; source B matches at index 0 and is 9x6 at
/// index 1.
fn mismatched_sources(root: &TempDir) -> FuseOptions {
    let input1 = root.path().join("a");
    let input2 = root.path().join("b");
    write_sequence(&input1, &[striped(8, 6, 20), striped(8, 6, 40)]);
    write_sequence(&input2, &[striped(8, 6, 200), striped(9, 6, 220)]);
    FuseOptions {
        input1,
        input2,
        out: root.path().join("out"),
        alpha_r: Some(vec![1.0, 0.5, 0.0]),
        alpha_g: Some(vec![1.0, 0.5, 0.0]),
        alpha_b: Some(vec![1.0, 0.5, 0.0]),
        ..FuseOptions::default()
    }
}

#[test]
fn saved_frames_reload_byte_exact_in_numeric_order() {
    let dir = tempdir().expect("temp dir");
    for (i, shade) in [(10usize, 30u8), (2, 60), (1, 90)] {
        save_frame(&dir.path().join(format!("{i}.png")), &striped(8, 6, shade)).expect("save");
    }
    fs::write(dir.path().join("notes.txt"), "not a frame").expect("write");

    let listed = list_frames(dir.path()).expect("listing");
    let names: Vec<String> = listed
        .iter()
        .map(|p| p.file_name().expect("file").to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["1.png", "2.png", "10.png"]);

    let reloaded = load_frame(&listed[2]).expect("decode");
    assert_eq!(
        reloaded.to_interleaved_u8(),
        striped(8, 6, 30).to_interleaved_u8()
    );
}

#[test]
fn fused_pair_survives_png_round_trip() {
    let dir = tempdir().expect("temp dir");
    let a = striped(12, 10, 20);
    let b = striped(12, 10, 200);
    let weights = ChannelWeights::uniform(vec![1.0, 0.5, 0.0]).expect("valid");

    let fused = FusionEngine::default()
        .fuse_frame(&a, &b, &weights)
        .expect("same shapes");
    let path = dir.path().join("fused_0.png");
    save_frame(&path, &fused).expect("save");

    let reloaded = load_frame(&path).expect("decode");
    assert_eq!(reloaded.dims(), (12, 10));
    assert_eq!(reloaded.to_interleaved_u8(), fused.to_interleaved_u8());
}

#[test]
fn missing_directory_is_reported() {
    let dir = tempdir().expect("temp dir");
    assert!(list_frames(&dir.path().join("missing")).is_err());
}

#[test]
fn config_file_and_border_override_resolve() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("fusion.json");
    fs::write(
        &path,
        r#"{ "alpha_r": [1.0, 0.0], "alpha_g": [0.5, 0.5], "alpha_b": [0.0, 1.0], "border": "clamp" }"#,
    )
    .expect("write config");

    let from_file = FuseOptions {
        config: Some(path.clone()),
        ..FuseOptions::default()
    };
    let cfg = resolve_config(&from_file).expect("valid config");
    assert_eq!(cfg.alpha_g, vec![0.5, 0.5]);
    assert_eq!(cfg.border, BorderKind::Clamp);

    let overridden = FuseOptions {
        border: Some(BorderKind::Reflect101),
        ..from_file.clone()
    };
    let cfg = resolve_config(&overridden).expect("valid config");
    assert_eq!(cfg.border, BorderKind::Reflect101);
    assert_eq!(cfg.alpha_b, vec![0.0, 1.0]);

    let both = FuseOptions {
        alpha_r: Some(vec![1.0]),
        ..from_file
    };
    assert!(resolve_config(&both).is_err());
}

#[test]
fn alpha_flags_need_all_three_channels() {
    let flags = FuseOptions {
        alpha_r: Some(vec![1.0, 0.0]),
        alpha_g: Some(vec![1.0, 0.0]),
        alpha_b: Some(vec![0.5, 0.5]),
        border: Some(BorderKind::Clamp),
        ..FuseOptions::default()
    };
    let cfg = resolve_config(&flags).expect("all channels given");
    assert_eq!(cfg.alpha_r, vec![1.0, 0.0]);
    assert_eq!(cfg.border, BorderKind::Clamp);

    let partial = FuseOptions {
        alpha_b: None,
        ..flags
    };
    assert!(resolve_config(&partial).is_err());
    assert!(resolve_config(&FuseOptions::default()).is_err());
}

#[test]
fn skip_policy_reports_mismatched_pair() {
    init_logger();
    let root = tempdir().expect("temp dir");
    let opts = FuseOptions {
        on_error: OnError::Skip,
        ..mismatched_sources(&root)
    };

    let report = run_fuse(&opts).expect("skip tolerates bad pairs");
    assert_eq!(report.pairs, 2);
    assert_eq!(report.fused, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 1);
    assert_eq!(report.frame_size, Some((8, 6)));
    assert_eq!(report.levels, 2);

    assert!(opts.out.join("fused_0.png").is_file());
    assert!(!opts.out.join("fused_1.png").exists());

    let text = fs::read_to_string(opts.out.join("report.json")).expect("report written");
    let on_disk: FuseReport = serde_json::from_str(&text).expect("report parses");
    assert_eq!(on_disk.skipped, report.skipped);
    assert_eq!(on_disk.frame_size, Some((8, 6)));
    assert_eq!(on_disk.config.alpha_r, vec![1.0, 0.5, 0.0]);
}

#[test]
fn abort_policy_fails_on_mismatched_pair() {
    init_logger();
    let root = tempdir().expect("temp dir");
    let opts = mismatched_sources(&root);
    assert_eq!(opts.on_error, OnError::Abort);

    let err = run_fuse(&opts).expect_err("9x6 frame cannot fuse with 8x6");
    assert!(format!("{err:#}").contains("fusing pair 1"));
    assert!(!opts.out.join("report.json").exists());
}

#[test]
fn compare_stacks_up_to_shortest_sequence() {
    init_logger();
    let root = tempdir().expect("temp dir");
    let left = root.path().join("left");
    let right = root.path().join("right");
    write_sequence(&left, &[striped(4, 3, 10), striped(4, 3, 20), striped(4, 3, 30)]);
    write_sequence(&right, &[striped(5, 3, 200), striped(5, 3, 210)]);
    let out = root.path().join("side_by_side");

    let written = run_compare(&[left.clone(), right], &out).expect("same heights");
    assert_eq!(written, 2);

    let names: Vec<PathBuf> = list_frames(&out).expect("listing");
    assert_eq!(names.len(), 2);
    let stacked = load_rgb8(&out.join("frame_1.png")).expect("decode");
    assert_eq!(stacked.dimensions(), (9, 3));

    let source = load_rgb8(&left.join("1.png")).expect("decode");
    assert_eq!(stacked.get_pixel(0, 0), source.get_pixel(0, 0));
    assert_eq!(stacked.get_pixel(3, 2), source.get_pixel(3, 2));
}
