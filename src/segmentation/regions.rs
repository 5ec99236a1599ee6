use image::DynamicImage;
use log::debug;

use crate::models::Region;
use crate::segmentation::preprocessing::{row_laplacian_variance, to_intensity};

/// Find runs of structurally flat rows.
///
/// A row is flat when the variance of its Laplacian response is below
/// `variance_threshold`. Maximal runs of flat rows at least
/// `min_region_height` tall become regions, including a run that reaches the
/// bottom edge.
pub fn scan_low_variation_regions(
    img: &DynamicImage,
    min_region_height: u32,
    variance_threshold: f64,
) -> Vec<Region> {
    let gray = to_intensity(img);
    let height = gray.height();

    let mut regions = Vec::new();
    let mut start_row: Option<u32> = None;

    for y in 0..height {
        if row_laplacian_variance(&gray, y) < variance_threshold {
            start_row.get_or_insert(y);
        } else if let Some(start) = start_row.take() {
            if y - start >= min_region_height {
                regions.push(Region::new(start, y));
            }
        }
    }

    if let Some(start) = start_row {
        if height - start >= min_region_height {
            regions.push(Region::new(start, height));
        }
    }

    debug!("low-variation scan: {} regions over {} rows", regions.len(), height);
    regions
}

/// Midpoints of the low-variation regions, as cut candidates
pub fn scan_low_variation_candidates(
    img: &DynamicImage,
    min_region_height: u32,
    variance_threshold: f64,
) -> Vec<u32> {
    scan_low_variation_regions(img, min_region_height, variance_threshold)
        .iter()
        .map(Region::midpoint)
        .collect()
}
