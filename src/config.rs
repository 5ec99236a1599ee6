//! Tunable parameters for boundary detection and segment export.
//!
//! Parameters can be constructed programmatically or loaded from JSON:
//!
//! ```no_run
//! use shotsplit::Config;
//! use std::path::Path;
//!
//! let config = Config::from_json_file(Path::new("shotsplit.json"))?;
//! config.validate()?;
//! # Ok::<(), shotsplit::SegmentError>(())
//! ```
//!
//! Fields missing from a JSON file fall back to their defaults.

use crate::error::{Result, SegmentError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters for the two row scanners and the candidate merger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationParams {
    /// Minimum number of consecutive low-variation rows forming a region
    pub min_region_height: u32,

    /// Row Laplacian variance below which a row counts as structurally flat
    pub variance_threshold: f64,

    /// Row intensity variance below which a row counts as a flat color row
    pub color_variance_threshold: f64,

    /// Mean intensity jump between flat rows that marks a color boundary
    pub color_diff_threshold: f64,

    /// Candidates within this many rows of a kept boundary are dropped
    pub merge_threshold: u32,

    /// Candidates above this row are discarded
    pub min_height: u32,
}

impl Default for SegmentationParams {
    fn default() -> Self {
        Self {
            min_region_height: 102,
            variance_threshold: 0.5,
            color_variance_threshold: 100.0,
            color_diff_threshold: 15.0,
            merge_threshold: 350,
            min_height: 200,
        }
    }
}

impl SegmentationParams {
    /// Reject parameters that would make the scanners meaningless
    pub fn validate(&self) -> Result<()> {
        if self.min_region_height == 0 {
            return Err(SegmentError::invalid("min_region_height", self.min_region_height));
        }
        check_threshold("variance_threshold", self.variance_threshold)?;
        check_threshold("color_variance_threshold", self.color_variance_threshold)?;
        check_threshold("color_diff_threshold", self.color_diff_threshold)?;
        Ok(())
    }
}

fn check_threshold(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SegmentError::invalid(name, value));
    }
    Ok(())
}

/// Parameters for trimming blank padding off exported segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropParams {
    /// Rows with a mean intensity above this value are blank
    pub pixel_threshold: u8,

    /// Segments at or below this height are never cropped, and no crop
    /// may leave fewer rows than this
    pub min_height: u32,
}

impl Default for CropParams {
    fn default() -> Self {
        Self {
            pixel_threshold: 240,
            min_height: 50,
        }
    }
}

impl CropParams {
    pub fn validate(&self) -> Result<()> {
        if self.min_height == 0 {
            return Err(SegmentError::invalid("crop.min_height", self.min_height));
        }
        Ok(())
    }
}

/// Complete configuration as read from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub segmentation: SegmentationParams,
    pub crop: CropParams,

    /// Apply blank-edge cropping to exported segments
    pub auto_crop: bool,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.segmentation.validate()?;
        if self.auto_crop {
            self.crop.validate()?;
        }
        Ok(())
    }

    /// Crop parameters if cropping is enabled
    pub fn crop_params(&self) -> Option<&CropParams> {
        self.auto_crop.then_some(&self.crop)
    }

    /// Load configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SegmentError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| SegmentError::Config {
            message: format!("{}: {}", path.display(), e),
        })
    }

    /// Save configuration to a JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| SegmentError::Config {
            message: e.to_string(),
        })?;
        std::fs::write(path, json).map_err(|e| SegmentError::io(path, e))
    }
}
