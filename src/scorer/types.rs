use serde::{Deserialize, Serialize};

/// Breakdown of a seam score.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeamDetails {
    /// Sum of both directions; the value the search minimises.
    pub total: u64,

    // Boundaries between horizontally adjacent tiles
    pub vertical: u64,
    // Boundaries between vertically adjacent tiles
    pub horizontal: u64,

    /// Pixel pairs compared across all boundaries.
    pub pairs: u64,
}

impl SeamDetails {
    /// Mean per-channel difference across all compared pairs.
    pub fn mean_channel_diff(&self) -> f64 {
        if self.pairs == 0 {
            0.0
        } else {
            self.total as f64 / (self.pairs * 3) as f64
        }
    }
}
