pub mod engine;
pub mod types;

pub use self::types::SeamDetails;
use crate::error::{SolveResult, SolverError};
use crate::geometry::{check_tile_count, compute_tile_layout, TileLayout};
use image::RgbImage;

/// Seam-continuity scorer bound to one layout.
///
/// Lower scores mean smoother transitions across tile edges. There is no
/// ground truth to compare against, so this is the only signal the search has.
pub struct Scorer {
    layout: TileLayout,
}

impl Scorer {
    pub fn new(layout: TileLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &TileLayout {
        &self.layout
    }

    /// Total seam score (fast path for the search loop)
    pub fn score(&self, image: &RgbImage) -> SolveResult<u64> {
        Ok(self.score_details(image)?.total)
    }

    /// Per-direction breakdown for reports
    pub fn score_details(&self, image: &RgbImage) -> SolveResult<SeamDetails> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 || !self.layout.matches(width, height) {
            return Err(SolverError::InvalidImage(format!(
                "{}x{} image does not fit {}x{} layout",
                width, height, self.layout.width, self.layout.height
            )));
        }

        Ok(engine::score_details(
            image.as_raw(),
            width as usize,
            height as usize,
            &self.layout.grid,
            self.layout.tile_count,
        ))
    }
}

/// Scores `image` with a layout computed from its own dimensions.
pub fn score_seams(image: &RgbImage, tile_count: usize) -> SolveResult<u64> {
    check_tile_count(tile_count)?;
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(SolverError::InvalidImage(format!(
            "dimensions {}x{} are unusable",
            width, height
        )));
    }
    Scorer::new(compute_tile_layout(width, height, tile_count)).score(image)
}
