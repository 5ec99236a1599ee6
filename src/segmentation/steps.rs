use crate::config::{CropParams, SegmentationParams};
use crate::pipeline::{PipelineData, PipelineStep, PipelineContext, BoundingBox, MetadataValue};
use crate::segmentation::{compute_boundaries, drawing, materialize};
use anyhow::Result;
use image::Rgb;

/// Detect cut rows and record them under "boundaries"
pub struct BoundaryDetectionStep {
    pub params: SegmentationParams,
}

impl PipelineStep for BoundaryDetectionStep {
    fn process(&self, data: Vec<PipelineData>, _context: &PipelineContext) -> Result<Vec<PipelineData>> {
        let mut result = Vec::with_capacity(data.len());
        for item in data {
            let boundaries = compute_boundaries(&item.image, &self.params)?;
            result.push(item.with_metadata("boundaries", MetadataValue::Rows(boundaries)));
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "Boundary Detection"
    }
}

/// Cut each item at its "boundaries" - splits one page into many slices
pub struct SliceStep;

impl PipelineStep for SliceStep {
    fn process(&self, data: Vec<PipelineData>, _context: &PipelineContext) -> Result<Vec<PipelineData>> {
        let mut result = Vec::new();

        for item in data {
            let boundaries = item.get_rows("boundaries")
                .ok_or_else(|| anyhow::anyhow!("Missing boundaries"))?;
            let points = materialize::cut_points(item.image.height(), boundaries);
            let (offset_x, offset_y) = item.bbox.as_ref().map_or((0, 0), |b| (b.x, b.y));
            let width = item.image.width();

            for (index, w) in points.windows(2).enumerate() {
                let (start, end) = (w[0], w[1]);
                let bbox = BoundingBox {
                    x: offset_x,
                    y: offset_y + start,
                    width,
                    height: end - start,
                };
                let slice = item.image.crop_imm(0, start, width, end - start);
                let segment = PipelineData::from_region(slice, item.original.clone(), bbox)
                    .with_metadata("segment_index", MetadataValue::Int(index as i32))
                    .with_metadata("cropped", MetadataValue::Bool(false));
                result.push(segment);
            }
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "Slice"
    }
}

/// Trim blank rows from the top and bottom of each item
pub struct AutoCropStep {
    pub params: CropParams,
}

impl PipelineStep for AutoCropStep {
    fn process(&self, data: Vec<PipelineData>, _context: &PipelineContext) -> Result<Vec<PipelineData>> {
        self.params.validate()?;
        let mut result = Vec::with_capacity(data.len());

        for mut item in data {
            let window = materialize::crop_window(
                &item.image,
                self.params.pixel_threshold,
                self.params.min_height,
            );
            if let Some((top, bottom)) = window {
                let width = item.image.width();
                item.image = item.image.crop_imm(0, top, width, bottom - top);
                let (x, y) = item.bbox.as_ref().map_or((0, 0), |b| (b.x, b.y));
                item.bbox = Some(BoundingBox { x, y: y + top, width, height: bottom - top });
            }
            let was_cropped = item.get_bool("cropped").unwrap_or(false) || window.is_some();
            item.metadata.insert("cropped".to_string(), MetadataValue::Bool(was_cropped));
            result.push(item);
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "Blank Edge Crop"
    }
}

/// Draw the item's "boundaries" as horizontal lines
pub struct PreviewStep {
    pub color: Rgb<u8>,
}

impl Default for PreviewStep {
    fn default() -> Self {
        Self { color: drawing::PREVIEW_COLOR }
    }
}

impl PipelineStep for PreviewStep {
    fn process(&self, data: Vec<PipelineData>, _context: &PipelineContext) -> Result<Vec<PipelineData>> {
        let mut result = Vec::with_capacity(data.len());
        for mut item in data {
            let boundaries = item.get_rows("boundaries")
                .ok_or_else(|| anyhow::anyhow!("Missing boundaries"))?;
            let annotated = drawing::draw_horizontal_lines(&item.image, boundaries, self.color);
            item.image = image::DynamicImage::ImageRgb8(annotated);
            result.push(item);
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "Boundary Preview"
    }
}
