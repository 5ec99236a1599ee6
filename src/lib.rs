pub mod config;
pub mod error;
pub mod image_io;
pub mod models;
pub mod pipeline;
pub mod segmentation;

pub use config::{Config, CropParams, SegmentationParams};
pub use error::{Result, SegmentError};
pub use models::{Region, Segment};
pub use segmentation::{
    compute_boundaries, export_segments, render_preview, split_and_encode,
    split_file, write_preview, export_segment_files, ExportSummary,
    build_export_pipeline, build_preview_pipeline,
};
pub use pipeline::{
    Pipeline, PipelineData, PipelineStep, PipelineContext,
    BoundingBox, MetadataValue, WorkItem, PipelineExecutor, DebugConfig
};
