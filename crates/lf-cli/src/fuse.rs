use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use lf_fusion::{BorderKind, FusionConfig, FusionEngine};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::frame_io::{list_frames, load_frame, save_frame, write_json};

/// What `run_fuse` does with a pair the core rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OnError {
    /// Stop at the first pair that cannot be fused
    #[default]
    Abort,
    /// Log the pair, leave it out of the output and continue
    Skip,
}

/// Inputs of one directory-to-directory fusion run.
///
/// Weights come either from `config` (a JSON file) or from all three
/// `alpha_*` vectors; `border` overrides whichever source was used.
#[derive(Debug, Clone, Default)]
pub struct FuseOptions {
    pub input1: PathBuf,
    pub input2: PathBuf,
    pub out: PathBuf,
    pub config: Option<PathBuf>,
    pub alpha_r: Option<Vec<f32>>,
    pub alpha_g: Option<Vec<f32>>,
    pub alpha_b: Option<Vec<f32>>,
    pub border: Option<BorderKind>,
    pub on_error: OnError,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedPair {
    pub index: usize,
    pub reason: String,
}

/// Contents of `report.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuseReport {
    pub pairs: usize,
    pub fused: usize,
    pub skipped: Vec<SkippedPair>,
    /// `(width, height)` of the first fused pair; `None` when nothing fused.
    pub frame_size: Option<(usize, usize)>,
    pub levels: usize,
    pub config: FusionConfig,
    pub elapsed_ms: f64,
}

pub fn resolve_config(opts: &FuseOptions) -> Result<FusionConfig> {
    let mut cfg = match &opts.config {
        Some(path) => {
            if opts.alpha_r.is_some() || opts.alpha_g.is_some() || opts.alpha_b.is_some() {
                bail!("--config cannot be combined with --alpha-r/--alpha-g/--alpha-b");
            }
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            FusionConfig::from_json_str(&text)
                .with_context(|| format!("loading fusion config {}", path.display()))?
        }
        None => {
            let (Some(r), Some(g), Some(b)) = (&opts.alpha_r, &opts.alpha_g, &opts.alpha_b)
            else {
                bail!("pass --config or all of --alpha-r, --alpha-g and --alpha-b");
            };
            FusionConfig {
                alpha_r: r.clone(),
                alpha_g: g.clone(),
                alpha_b: b.clone(),
                border: BorderKind::default(),
            }
        }
    };

    if let Some(border) = opts.border {
        cfg.border = border;
    }
    Ok(cfg)
}

/// Fuses `input1` and `input2` pairwise by frame index into `out` and writes
/// `out/report.json`.
///
/// Under [`OnError::Abort`] the first failing pair is returned as the error
/// and no report is written.
pub fn run_fuse(opts: &FuseOptions) -> Result<FuseReport> {
    let cfg = resolve_config(opts)?;
    let weights = cfg.weights().context("validating blend weights")?;
    let engine = FusionEngine::new(cfg.border.to_mode());

    let frames1 = list_frames(&opts.input1)?;
    let frames2 = list_frames(&opts.input2)?;
    let pairs = frames1.len().min(frames2.len());
    if frames1.len() != frames2.len() {
        warn!(
            "sequence lengths differ ({} vs {}), fusing first {pairs} pairs",
            frames1.len(),
            frames2.len()
        );
    }
    if pairs == 0 {
        bail!("no numbered PNG frames to pair");
    }

    fs::create_dir_all(&opts.out)
        .with_context(|| format!("creating output dir {}", opts.out.display()))?;
    info!(
        "fusing {pairs} pairs with {} levels into {}",
        weights.depth(),
        opts.out.display()
    );

    let start = Instant::now();
    let fuse_one = |i: usize| -> Result<(usize, usize)> {
        let a = load_frame(&frames1[i])?;
        let b = load_frame(&frames2[i])?;
        let fused = engine
            .fuse_frame(&a, &b, &weights)
            .with_context(|| format!("fusing pair {i}"))?;
        save_frame(&opts.out.join(format!("fused_{i}.png")), &fused)?;
        debug!("pair {i} done");
        Ok(fused.dims())
    };

    let mut skipped = Vec::new();
    let frame_size = match opts.on_error {
        OnError::Abort => {
            let sizes = (0..pairs)
                .into_par_iter()
                .map(fuse_one)
                .collect::<Result<Vec<_>>>()?;
            sizes.first().copied()
        }
        OnError::Skip => {
            let outcomes: Vec<(usize, Result<(usize, usize)>)> = (0..pairs)
                .into_par_iter()
                .map(|i| (i, fuse_one(i)))
                .collect();
            let mut first = None;
            for (index, outcome) in outcomes {
                match outcome {
                    Ok(size) => {
                        first.get_or_insert(size);
                    }
                    Err(err) => {
                        warn!("skipping pair {index}: {err:#}");
                        skipped.push(SkippedPair {
                            index,
                            reason: format!("{err:#}"),
                        });
                    }
                }
            }
            first
        }
    };

    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;
    if let Some((w, h)) = frame_size {
        info!("frame size {w}x{h}");
    }
    info!(
        "fused {} of {pairs} pairs in {elapsed_ms:.1} ms",
        pairs - skipped.len()
    );

    let report = FuseReport {
        pairs,
        fused: pairs - skipped.len(),
        skipped,
        frame_size,
        levels: weights.depth(),
        config: cfg,
        elapsed_ms,
    };
    write_json(&opts.out.join("report.json"), &report)?;
    Ok(report)
}
