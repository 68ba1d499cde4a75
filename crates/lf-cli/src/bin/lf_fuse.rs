use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use lf_cli::compare::run_compare;
use lf_cli::frame_io::{list_frames, load_frame, save_band_vis, save_frame, write_json};
use lf_cli::fuse::{FuseOptions, OnError, run_fuse};
use lf_core::{Channel, RgbFrame};
use lf_fusion::{BorderKind, SimilarityMetric, best_match};
use lf_pyr::{LaplacianPyramid, diff_stats};
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "lf_fuse")]
#[command(about = "Fuse two aligned frame sequences in a Laplacian pyramid")]
struct Cli {
    /// Worker threads (defaults to one per core)
    #[arg(long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fuse numbered PNG frames pairwise by index
    #[command(name = "fuse")]
    Fuse(FuseArgs),
    /// Decompose one image and report round-trip error
    #[command(name = "pyramid")]
    Pyramid(PyramidArgs),
    /// Find the candidate frame most similar to a reference
    #[command(name = "match")]
    Match(MatchArgs),
    /// Write same-index frames of several directories side by side
    #[command(name = "compare")]
    Compare(CompareArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BorderArg {
    Reflect101,
    Clamp,
}

impl From<BorderArg> for BorderKind {
    fn from(arg: BorderArg) -> Self {
        match arg {
            BorderArg::Reflect101 => BorderKind::Reflect101,
            BorderArg::Clamp => BorderKind::Clamp,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MetricArg {
    Pearson,
    Mad,
}

impl From<MetricArg> for SimilarityMetric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Pearson => SimilarityMetric::PearsonCorrelation,
            MetricArg::Mad => SimilarityMetric::MeanAbsDiff,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct FuseArgs {
    /// Directory of numbered PNG frames for source A
    #[arg(long, required = true)]
    input1: PathBuf,
    /// Directory of numbered PNG frames for source B
    #[arg(long, required = true)]
    input2: PathBuf,
    /// Output directory for fused frames and report.json
    #[arg(long, required = true)]
    out: PathBuf,
    /// JSON file with alpha_r/alpha_g/alpha_b (and optional border)
    #[arg(long, conflicts_with_all = ["alpha_r", "alpha_g", "alpha_b"])]
    config: Option<PathBuf>,
    /// Red weights for source A, finest band first
    #[arg(long, num_args = 1..)]
    alpha_r: Option<Vec<f32>>,
    /// Green weights for source A, finest band first
    #[arg(long, num_args = 1..)]
    alpha_g: Option<Vec<f32>>,
    /// Blue weights for source A, finest band first
    #[arg(long, num_args = 1..)]
    alpha_b: Option<Vec<f32>>,
    /// Overrides the border mode of the config file
    #[arg(long, value_enum)]
    border: Option<BorderArg>,
    #[arg(long, value_enum, default_value_t = OnError::Abort)]
    on_error: OnError,
}

#[derive(Args, Debug, Clone)]
struct PyramidArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value_t = 5)]
    levels: usize,
    #[arg(long, value_enum, default_value_t = BorderArg::Reflect101)]
    border: BorderArg,
    #[arg(long, default_value = "pyramid_out")]
    out: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct MatchArgs {
    #[arg(long, required = true)]
    reference: PathBuf,
    /// Directory of numbered PNG candidate frames
    #[arg(long, required = true)]
    candidates: PathBuf,
    #[arg(long, value_enum, default_value_t = MetricArg::Pearson)]
    metric: MetricArg,
    /// Optional JSON output path
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct CompareArgs {
    /// Two or more directories of numbered PNG frames, left to right
    #[arg(long, required = true, num_args = 2..)]
    inputs: Vec<PathBuf>,
    #[arg(long, default_value = "compare_out")]
    out: PathBuf,
}

#[derive(Debug, Serialize)]
struct BandDto {
    index: usize,
    width: usize,
    height: usize,
    min: f32,
    max: f32,
}

#[derive(Debug, Serialize)]
struct ChannelPyramidDto {
    channel: &'static str,
    bands: Vec<BandDto>,
    round_trip_mean_abs: f32,
    round_trip_max_abs: f32,
}

#[derive(Debug, Serialize)]
struct MetaPyramid {
    requested_levels: usize,
    border: BorderKind,
    channels: Vec<ChannelPyramidDto>,
}

#[derive(Debug, Serialize)]
struct MatchDto {
    reference: String,
    metric: SimilarityMetric,
    candidates: usize,
    best: Option<String>,
    best_index: Option<usize>,
    score: Option<f64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("configuring worker threads")?;
    }

    match cli.cmd {
        Command::Fuse(args) => {
            run_fuse(&args.into())?;
            Ok(())
        }
        Command::Pyramid(args) => run_pyramid(args),
        Command::Match(args) => run_match(args),
        Command::Compare(args) => {
            run_compare(&args.inputs, &args.out)?;
            Ok(())
        }
    }
}

impl From<FuseArgs> for FuseOptions {
    fn from(args: FuseArgs) -> Self {
        Self {
            input1: args.input1,
            input2: args.input2,
            out: args.out,
            config: args.config,
            alpha_r: args.alpha_r,
            alpha_g: args.alpha_g,
            alpha_b: args.alpha_b,
            border: args.border.map(BorderKind::from),
            on_error: args.on_error,
        }
    }
}

fn run_pyramid(args: PyramidArgs) -> Result<()> {
    let frame = load_frame(&args.input)?;
    let border: BorderKind = args.border.into();
    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output dir {}", args.out.display()))?;

    let mut channels = Vec::with_capacity(3);
    let mut reconstructed = Vec::with_capacity(3);
    for channel in Channel::ALL {
        let plane = frame.plane(channel);
        let lap = LaplacianPyramid::build(&plane.as_view(), args.levels, &border.to_mode())
            .with_context(|| format!("decomposing {} channel", channel.name()))?;

        let mut bands = Vec::with_capacity(lap.len());
        for (k, band) in lap.bands().iter().enumerate() {
            save_band_vis(
                &args.out.join(format!("{}_band_{k}.png", channel.name())),
                band,
            )?;
            let (min, max) = band
                .data()
                .iter()
                .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                });
            bands.push(BandDto {
                index: k,
                width: band.width(),
                height: band.height(),
                min,
                max,
            });
        }

        let rec = lap.reconstruct()?;
        let stats = diff_stats(&rec.as_view(), &plane.as_view())?;
        info!(
            "{}: {} bands, round-trip mean {:.2e}, max {:.2e}",
            channel.name(),
            lap.len(),
            stats.mean_abs,
            stats.max_abs
        );

        channels.push(ChannelPyramidDto {
            channel: channel.name(),
            bands,
            round_trip_mean_abs: stats.mean_abs,
            round_trip_max_abs: stats.max_abs,
        });
        reconstructed.push(rec);
    }

    let [r, g, b]: [_; 3] = reconstructed
        .try_into()
        .map_err(|_| anyhow::anyhow!("expected three reconstructed channels"))?;
    save_frame(
        &args.out.join("reconstructed.png"),
        &RgbFrame::from_planes(r, g, b)?,
    )?;

    write_json(
        &args.out.join("meta.json"),
        &MetaPyramid {
            requested_levels: args.levels,
            border,
            channels,
        },
    )
}

fn run_match(args: MatchArgs) -> Result<()> {
    let reference = load_frame(&args.reference)?;
    let paths = list_frames(&args.candidates)?;
    let candidates = paths
        .par_iter()
        .map(|p| load_frame(p))
        .collect::<Result<Vec<_>>>()?;

    let metric: SimilarityMetric = args.metric.into();
    let best = best_match(&reference, &candidates, metric).context("scoring candidates")?;

    match best {
        Some(m) => info!(
            "best match: {} (index {}, score {:.4})",
            paths[m.index].display(),
            m.index,
            m.score
        ),
        None => warn!("no candidate frames in {}", args.candidates.display()),
    }

    if let Some(out) = &args.out {
        write_json(
            out,
            &MatchDto {
                reference: display_path(&args.reference),
                metric,
                candidates: candidates.len(),
                best: best.map(|m| display_path(&paths[m.index])),
                best_index: best.map(|m| m.index),
                score: best.map(|m| m.score),
            },
        )?;
    }

    Ok(())
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
