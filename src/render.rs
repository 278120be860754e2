use crate::error::{SolveResult, SolverError};
use crate::geometry::TileLayout;
use crate::raster;
use image::RgbImage;

/// Reassembles `source` so destination slot `d` shows source tile `permutation[d]`.
///
/// Each source tile is nearest-neighbour resized to its destination cell,
/// since rounded grid lines let cells differ by a pixel. The result has the
/// source's dimensions and every pixel is written exactly once.
pub fn apply_tile_permutation(
    source: &RgbImage,
    layout: &TileLayout,
    permutation: &[usize],
) -> SolveResult<RgbImage> {
    if !layout.matches(source.width(), source.height()) {
        return Err(SolverError::Render(format!(
            "layout is for {}x{} but image is {}x{}",
            layout.width,
            layout.height,
            source.width(),
            source.height()
        )));
    }
    if permutation.len() != layout.cell_count() {
        return Err(SolverError::Render(format!(
            "permutation has {} entries, layout has {} tiles",
            permutation.len(),
            layout.cell_count()
        )));
    }

    let mut canvas = raster::blank_canvas(source.width(), source.height());

    for (dest, &src_idx) in layout.tiles.iter().zip(permutation) {
        // Nothing to cover.
        if dest.is_empty() {
            continue;
        }
        let src = layout.tiles.get(src_idx).ok_or_else(|| {
            SolverError::Render(format!("source tile {} does not exist", src_idx))
        })?;

        let piece = raster::extract(source, src)?;
        let piece = raster::resize_nearest(&piece, dest.width, dest.height)?;
        canvas = raster::composite(canvas, &piece, dest.x, dest.y)?;
    }

    Ok(canvas)
}
