mod common;

use common::*;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.segmentation.min_region_height, 102);
    assert_eq!(config.segmentation.variance_threshold, 0.5);
    assert_eq!(config.segmentation.color_variance_threshold, 100.0);
    assert_eq!(config.segmentation.color_diff_threshold, 15.0);
    assert_eq!(config.segmentation.merge_threshold, 350);
    assert_eq!(config.segmentation.min_height, 200);
    assert_eq!(config.crop.pixel_threshold, 240);
    assert_eq!(config.crop.min_height, 50);
    assert!(!config.auto_crop);
    assert!(config.crop_params().is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_json_round_trip() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("shotsplit.json");

    let config = Config {
        segmentation: SegmentationParams { merge_threshold: 120, variance_threshold: 0.25, ..Default::default() },
        crop: CropParams { pixel_threshold: 230, min_height: 80 },
        auto_crop: true,
    };
    config.to_json_file(&path)?;

    let loaded = Config::from_json_file(&path)?;
    assert_eq!(loaded, config);
    assert_eq!(loaded.crop_params(), Some(&config.crop));
    Ok(())
}

#[test]
fn test_partial_json_uses_defaults() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("partial.json");
    std::fs::write(&path, r#"{"auto_crop": true, "segmentation": {"merge_threshold": 100}}"#)?;

    let loaded = Config::from_json_file(&path)?;
    assert!(loaded.auto_crop);
    assert_eq!(loaded.segmentation.merge_threshold, 100);
    assert_eq!(loaded.segmentation.min_region_height, 102);
    assert_eq!(loaded.crop, CropParams::default());
    Ok(())
}

#[test]
fn test_malformed_json() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{ not json")?;

    assert!(matches!(Config::from_json_file(&path), Err(SegmentError::Config { .. })));
    assert!(matches!(
        Config::from_json_file(&dir.path().join("missing.json")),
        Err(SegmentError::Io { .. })
    ));
    Ok(())
}

#[test]
fn test_crop_validation_only_when_enabled() {
    let mut config = Config {
        crop: CropParams { min_height: 0, ..Default::default() },
        ..Default::default()
    };
    assert!(config.validate().is_ok());

    config.auto_crop = true;
    assert!(matches!(config.validate(), Err(SegmentError::InvalidParameter { .. })));
}
