use crate::reports;
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tileswap::config::Config;
use tileswap::error::SolveResult;
use tileswap::geometry::compute_tile_layout;
use tileswap::raster;
use tileswap::scorer::Scorer;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: Config,

    /// Image file (PNG or JPEG)
    pub image: PathBuf,
}

pub fn run(args: ScoreArgs, config: Config) -> SolveResult<()> {
    let img = raster::decode_bytes(&fs::read(&args.image)?)?;
    let layout = compute_tile_layout(img.width(), img.height(), config.search.tile_count);
    let scorer = Scorer::new(layout);
    let details = scorer.score_details(&img)?;

    reports::print_seam_report(&args.image.display().to_string(), scorer.layout(), &details);
    Ok(())
}
