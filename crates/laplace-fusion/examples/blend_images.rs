//! Example: fuse two still images with separate coarse and fine weights.
//!
//! Takes the coarse structure mostly from `--base` and the fine detail
//! mostly from `--detail`, using the same weights for all channels.
//!
//! Run from the workspace root:
//!   cargo run -p laplace-fusion --example blend_images -- --help

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use laplace_fusion::{ChannelWeights, FusionEngine};
use lf_cli::frame_io::{load_frame, save_frame};
use log::info;

#[derive(Parser, Debug)]
#[command(about = "Blend coarse structure of one image with fine detail of another")]
struct Args {
    /// Image providing low-frequency content
    #[arg(long)]
    base: PathBuf,

    /// Image providing high-frequency content
    #[arg(long)]
    detail: PathBuf,

    /// Pyramid depth (number of downsample steps)
    #[arg(long, default_value_t = 4)]
    levels: usize,

    /// Output PNG path
    #[arg(long, default_value = "blended.png")]
    out: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let base = load_frame(&args.base)?;
    let detail = load_frame(&args.detail)?;
    if base.dims() != detail.dims() {
        bail!(
            "images differ in size: {:?} vs {:?}",
            base.dims(),
            detail.dims()
        );
    }

    // Weight is the share of `base`: fade from 0 at the finest band to 1 at
    // the base band.
    let weights: Vec<f32> = (0..=args.levels)
        .map(|k| k as f32 / args.levels.max(1) as f32)
        .collect();
    info!("weights for base image, finest to coarsest: {weights:?}");

    let fused = FusionEngine::default()
        .fuse_frame(&base, &detail, &ChannelWeights::uniform(weights)?)
        .context("fusing images")?;

    save_frame(&args.out, &fused)?;
    info!("wrote {}", args.out.display());
    Ok(())
}
