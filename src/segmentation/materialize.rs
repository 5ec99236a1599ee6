use image::DynamicImage;
use log::debug;
use rayon::prelude::*;

use crate::config::CropParams;
use crate::models::Segment;
use crate::segmentation::preprocessing::{row_means, to_intensity};

/// Full list of cut rows for an image of `height` rows: the boundaries that
/// fall strictly inside the image, bracketed by `0` and `height`.
pub fn cut_points(height: u32, boundaries: &[u32]) -> Vec<u32> {
    let mut points: Vec<u32> = boundaries
        .iter()
        .copied()
        .filter(|&b| b > 0 && b < height)
        .collect();
    points.push(0);
    points.push(height);
    points.sort_unstable();
    points.dedup();
    points
}

/// Slice an image into full-width segments at the given boundaries, top to bottom
pub fn materialize(img: &DynamicImage, boundaries: &[u32]) -> Vec<DynamicImage> {
    cut_points(img.height(), boundaries)
        .windows(2)
        .map(|w| img.crop_imm(0, w[0], img.width(), w[1] - w[0]))
        .collect()
}

/// Slice an image and optionally trim blank padding from every slice.
///
/// Slices are cropped in parallel; the result stays in top-to-bottom order.
pub fn materialize_segments(
    img: &DynamicImage,
    boundaries: &[u32],
    crop: Option<&CropParams>,
) -> Vec<Segment> {
    let points = cut_points(img.height(), boundaries);
    let segments: Vec<Segment> = points
        .par_windows(2)
        .map(|w| {
            let (start_row, end_row) = (w[0], w[1]);
            let slice = img.crop_imm(0, start_row, img.width(), end_row - start_row);
            match crop {
                Some(params) => {
                    let cropped =
                        auto_crop_blank_edges(&slice, params.pixel_threshold, params.min_height);
                    let changed = cropped.height() != slice.height();
                    Segment { image: cropped, start_row, end_row, cropped: changed }
                }
                None => Segment { image: slice, start_row, end_row, cropped: false },
            }
        })
        .collect();

    debug!(
        "materialized {} segments ({} cropped)",
        segments.len(),
        segments.iter().filter(|s| s.cropped).count()
    );
    segments
}

/// Rows `[top, bottom)` that survive blank-edge trimming, or `None` if the
/// segment should be left alone or has no blank edges.
pub fn crop_window(img: &DynamicImage, pixel_threshold: u8, min_height: u32) -> Option<(u32, u32)> {
    if img.height() <= min_height {
        return None;
    }

    let means = row_means(&to_intensity(img));
    let threshold = pixel_threshold as f64;
    let is_content = |m: &f64| *m <= threshold;

    let top = means.iter().position(is_content)? as u32;
    let bottom = means.iter().rposition(is_content)? as u32 + 1;

    if bottom - top < min_height || (top == 0 && bottom == img.height()) {
        return None;
    }
    Some((top, bottom))
}

/// Trim near-white rows from the top and bottom of a segment.
///
/// A row is blank when its mean intensity exceeds `pixel_threshold`. The
/// segment comes back unchanged if it is no taller than `min_height`, if it
/// is blank throughout, or if trimming would leave fewer than `min_height`
/// rows.
pub fn auto_crop_blank_edges(img: &DynamicImage, pixel_threshold: u8, min_height: u32) -> DynamicImage {
    match crop_window(img, pixel_threshold, min_height) {
        Some((top, bottom)) => img.crop_imm(0, top, img.width(), bottom - top),
        None => img.clone(),
    }
}
