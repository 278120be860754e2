use clap::Args;
use std::fs;
use std::path::PathBuf;
use tileswap::api::{CaptchaContent, CaptchaStatus};
use tileswap::config::Config;
use tileswap::error::SolveResult;
use tileswap::geometry::compute_tile_layout;
use tileswap::optimizer::{mutation, Permutation};
use tileswap::raster::{self, ImageExtension};
use tileswap::render::apply_tile_permutation;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ScrambleArgs {
    #[command(flatten)]
    pub config: Config,

    /// Clean source image
    pub image: PathBuf,

    /// Number of random swaps applied to the image
    #[arg(long, default_value_t = 8)]
    pub swaps: usize,

    /// Random pairs appended after the undo sequence
    #[arg(long, default_value_t = 4)]
    pub decoys: usize,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    #[arg(long, default_value = "png")]
    pub extension: ImageExtension,

    /// Where to write the content bundle JSON
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Produces a bundle whose swap sequence undoes the scramble after `--swaps` steps.
pub fn run(args: ScrambleArgs, config: Config) -> SolveResult<()> {
    let img = raster::decode_bytes(&fs::read(&args.image)?)?;
    let layout = compute_tile_layout(img.width(), img.height(), config.search.tile_count);

    let mut rng = if let Some(s) = args.seed {
        fastrand::Rng::with_seed(s)
    } else {
        fastrand::Rng::new()
    };

    let scramble = mutation::random_swaps(&mut rng, layout.cell_count(), args.swaps);
    let mut permutation = Permutation::identity(layout.cell_count());
    for &(a, b) in &scramble {
        permutation.try_swap(a as i64, b as i64);
    }
    let scrambled = apply_tile_permutation(&img, &layout, permutation.as_slice())?;

    // Leading filler the solver drops, then the undo path, then noise.
    let mut steps: Vec<i64> = (0..config.search.skip_leading)
        .map(|_| rng.i64(0..layout.cell_count() as i64))
        .collect();
    steps.extend(mutation::undo_sequence(&scramble));
    for (a, b) in mutation::random_swaps(&mut rng, layout.cell_count(), args.decoys) {
        steps.extend([a as i64, b as i64]);
    }

    let content = CaptchaContent {
        status: Some(CaptchaStatus::Ok),
        extension: args.extension,
        image: Some(raster::encode_base64(&scrambled, args.extension)?),
        steps,
        track: None,
    };
    fs::write(&args.output, serde_json::to_string_pretty(&content)?)?;

    info!(
        "🔀 Wrote {} ({} swaps, {} decoys) to {}",
        args.image.display(),
        scramble.len(),
        args.decoys,
        args.output.display()
    );
    Ok(())
}
