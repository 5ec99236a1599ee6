use image::DynamicImage;
use log::debug;

use crate::segmentation::preprocessing::{row_stats, to_intensity};

/// Find rows where a flat band of one color gives way to a flat band of another.
///
/// Rows with intensity variance below `variance_threshold` are flat. Each flat
/// row is compared to the most recent flat row above it and emitted when
/// their means differ by more than `color_diff_threshold`. The reference mean
/// moves to every flat row whether or not it was emitted, so a slow gradient
/// never fires.
pub fn scan_color_discontinuities(
    img: &DynamicImage,
    variance_threshold: f64,
    color_diff_threshold: f64,
) -> Vec<u32> {
    let gray = to_intensity(img);
    let stats = row_stats(&gray);

    let mut candidates = Vec::new();
    let mut previous_mean: Option<f64> = None;

    for (y, row) in stats.iter().enumerate() {
        if row.variance >= variance_threshold {
            continue;
        }
        if let Some(previous) = previous_mean {
            if (row.mean - previous).abs() > color_diff_threshold {
                candidates.push(y as u32);
            }
        }
        previous_mean = Some(row.mean);
    }

    debug!("color scan: {} discontinuities over {} rows", candidates.len(), stats.len());
    candidates
}
