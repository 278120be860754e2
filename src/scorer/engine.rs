use super::types::SeamDetails;
use crate::geometry::GridLines;

const CHANNELS: usize = 3;

#[inline(always)]
fn pixel_diff(data: &[u8], a: usize, b: usize) -> u64 {
    data[a].abs_diff(data[b]) as u64
        + data[a + 1].abs_diff(data[b + 1]) as u64
        + data[a + 2].abs_diff(data[b + 2]) as u64
}

/// Walks every internal boundary of `grid` over a packed RGB buffer.
///
/// A boundary sitting on the image edge has no pixel on one side and is
/// skipped.
pub fn score_details(
    data: &[u8],
    width: usize,
    height: usize,
    grid: &GridLines,
    tile_count: usize,
) -> SeamDetails {
    let mut details = SeamDetails::default();

    // Vertical seams: left/right of each inner column line, per row band
    for row in 0..tile_count {
        let y_start = grid.horizontal[row] as usize;
        let y_end = grid.horizontal[row + 1] as usize;
        for col in 1..tile_count {
            let seam_x = grid.vertical[col] as usize;
            if seam_x == 0 || seam_x >= width {
                continue;
            }
            for y in y_start..y_end {
                let left = (y * width + seam_x - 1) * CHANNELS;
                let right = (y * width + seam_x) * CHANNELS;
                details.vertical += pixel_diff(data, left, right);
                details.pairs += 1;
            }
        }
    }

    // Horizontal seams: above/below each inner row line, per column band
    for col in 0..tile_count {
        let x_start = grid.vertical[col] as usize;
        let x_end = grid.vertical[col + 1] as usize;
        for row in 1..tile_count {
            let seam_y = grid.horizontal[row] as usize;
            if seam_y == 0 || seam_y >= height {
                continue;
            }
            for x in x_start..x_end {
                let top = ((seam_y - 1) * width + x) * CHANNELS;
                let bottom = (seam_y * width + x) * CHANNELS;
                details.horizontal += pixel_diff(data, top, bottom);
                details.pairs += 1;
            }
        }
    }

    details.total = details.vertical + details.horizontal;
    details
}
