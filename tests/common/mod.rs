mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from shotsplit for tests
#[allow(unused_imports)]
pub use shotsplit::{
    Config, CropParams, MetadataValue, Pipeline, PipelineData, Region, Segment, SegmentError,
    SegmentationParams,
};
