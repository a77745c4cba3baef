//! Trade size distribution.

use statrs::statistics::{Data, Median, Statistics};

/// Summary of one trader's trade sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeDistribution {
    /// Number of sizes.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median (mean of the two middle values for an even count).
    pub median: f64,
    /// Sizes strictly below the micro threshold.
    pub micro_count: usize,
    /// micro_count / count.
    pub micro_ratio: f64,
}

impl SizeDistribution {
    /// Summarize sizes. Returns `None` for an empty slice.
    pub fn from_sizes(sizes: &[f64], micro_threshold: f64) -> Option<Self> {
        if sizes.is_empty() {
            return None;
        }

        let count = sizes.len();
        let mean = sizes.iter().mean();
        let median = Data::new(sizes.to_vec()).median();
        let micro_count = sizes.iter().filter(|&&s| s < micro_threshold).count();

        Some(Self {
            count,
            mean,
            median,
            micro_count,
            micro_ratio: micro_count as f64 / count as f64,
        })
    }
}
