pub mod preprocessing;
pub mod regions;
pub mod color;
pub mod merge;
pub mod materialize;
pub mod drawing;
pub mod steps;

use image::{DynamicImage, ImageFormat, RgbImage};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use crate::config::{Config, CropParams, SegmentationParams};
use crate::error::{Result, SegmentError};
use crate::image_io;
use crate::models::Segment;
use crate::pipeline::Pipeline;

/// Files written by [`export_segment_files`]
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Absolute path of the directory holding the segments
    pub output_dir: PathBuf,
    /// Segment files in top-to-bottom order
    pub files: Vec<PathBuf>,
    /// How many segments auto-crop shortened
    pub cropped_count: usize,
}

/// Find the rows at which the page can be cut.
///
/// Both row scanners run in parallel over the same image; their candidates
/// are pooled and merged into a strictly increasing boundary list.
pub fn compute_boundaries(img: &DynamicImage, params: &SegmentationParams) -> Result<Vec<u32>> {
    params.validate()?;

    let (structural, color) = rayon::join(
        || regions::scan_low_variation_candidates(img, params.min_region_height, params.variance_threshold),
        || color::scan_color_discontinuities(img, params.color_variance_threshold, params.color_diff_threshold),
    );
    debug!(
        "candidates: {} structural, {} color",
        structural.len(),
        color.len()
    );

    let mut candidates = structural;
    candidates.extend(color);
    let boundaries = merge::merge_candidates(&candidates, params.merge_threshold, params.min_height);

    info!("{} boundaries from {} candidates", boundaries.len(), candidates.len());
    Ok(boundaries)
}

/// Cut the page into segments, trimming blank edges when `crop` is given
pub fn export_segments(
    img: &DynamicImage,
    params: &SegmentationParams,
    crop: Option<&CropParams>,
) -> Result<Vec<Segment>> {
    if let Some(crop) = crop {
        crop.validate()?;
    }
    let boundaries = compute_boundaries(img, params)?;
    Ok(materialize::materialize_segments(img, &boundaries, crop))
}

/// Boundaries plus a copy of the page with them drawn in
pub fn render_preview(img: &DynamicImage, params: &SegmentationParams) -> Result<(Vec<u32>, RgbImage)> {
    let boundaries = compute_boundaries(img, params)?;
    let preview = drawing::draw_horizontal_lines(img, &boundaries, drawing::PREVIEW_COLOR);
    Ok((boundaries, preview))
}

/// Slice the page at `boundaries` and encode every slice in `format`
pub fn split_and_encode(
    img: &DynamicImage,
    boundaries: &[u32],
    format: ImageFormat,
) -> Result<Vec<Vec<u8>>> {
    materialize::materialize(img, boundaries)
        .iter()
        .map(|slice| image_io::encode(slice, format))
        .collect()
}

/// Boundaries for an image file
pub fn split_file(path: &Path, params: &SegmentationParams) -> Result<Vec<u32>> {
    let img = image_io::load_image(path)?;
    info!("Loaded {} ({}x{})", path.display(), img.width(), img.height());
    compute_boundaries(&img, params)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| SegmentError::io(path, e))
}

/// Write `{base}_result.jpg` with the boundaries drawn in; returns its absolute path
pub fn write_preview(path: &Path, output_dir: &Path, params: &SegmentationParams) -> Result<PathBuf> {
    params.validate()?;
    let img = image_io::load_image(path)?;
    let (boundaries, preview) = render_preview(&img, params)?;

    let output_path = output_dir.join(image_io::preview_file_name(&image_io::base_name(path)));
    let bytes = image_io::encode(&DynamicImage::ImageRgb8(preview), ImageFormat::Jpeg)?;
    image_io::write_bytes(&output_path, &bytes)?;

    info!("Preview with {} lines written to {}", boundaries.len(), output_path.display());
    absolute(&output_path)
}

/// Write every segment of an image file as `{base}_segment_NNN.jpg`.
///
/// All segments are encoded before anything is written, and the first
/// failure aborts the export.
pub fn export_segment_files(path: &Path, output_dir: &Path, config: &Config) -> Result<ExportSummary> {
    config.validate()?;
    let img = image_io::load_image(path)?;
    let segments = export_segments(&img, &config.segmentation, config.crop_params())?;

    let encoded = segments
        .iter()
        .map(|segment| image_io::encode(&segment.image, ImageFormat::Jpeg))
        .collect::<Result<Vec<_>>>()?;

    std::fs::create_dir_all(output_dir).map_err(|e| SegmentError::io(output_dir, e))?;
    let base = image_io::base_name(path);
    let mut files = Vec::with_capacity(encoded.len());
    for (index, bytes) in encoded.iter().enumerate() {
        let file = output_dir.join(image_io::segment_file_name(&base, index, "jpg"));
        image_io::write_bytes(&file, bytes)?;
        files.push(file);
    }

    let cropped_count = segments.iter().filter(|s| s.cropped).count();
    info!("Exported {} segments ({} cropped)", files.len(), cropped_count);
    Ok(ExportSummary {
        output_dir: absolute(output_dir)?,
        files,
        cropped_count,
    })
}

/// Pipeline that cuts a page into (optionally cropped) segments
pub fn build_export_pipeline(params: SegmentationParams, crop: Option<CropParams>) -> Pipeline {
    use crate::segmentation::steps::*;

    let pipeline = Pipeline::new()
        .add_step(Arc::new(BoundaryDetectionStep { params }))
        .add_step(Arc::new(SliceStep));

    match crop {
        Some(params) => pipeline.add_step(Arc::new(AutoCropStep { params })),
        None => pipeline,
    }
}

/// Pipeline that draws detected boundaries onto the page
pub fn build_preview_pipeline(params: SegmentationParams) -> Pipeline {
    use crate::segmentation::steps::*;

    Pipeline::new()
        .add_step(Arc::new(BoundaryDetectionStep { params }))
        .add_step(Arc::new(PreviewStep::default()))
}
