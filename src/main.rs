use clap::Parser;
use std::path::PathBuf;

use shotsplit::{image_io, segmentation, Config};

#[derive(Parser)]
#[command(name = "shotsplit")]
#[command(about = "Find safe horizontal cut lines in long page screenshots")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Save a preview with the cut lines drawn instead of printing them
    #[arg(short, long)]
    split: bool,

    /// Directory for the preview image
    #[arg(short, long, value_name = "DIR", default_value = "result")]
    output_dir: PathBuf,

    /// Export every segment as its own image
    #[arg(short, long)]
    export: bool,

    /// Directory for exported segments
    #[arg(long, value_name = "DIR", default_value = "segments")]
    segments_dir: PathBuf,

    /// Trim blank rows from the edges of exported segments
    #[arg(long)]
    auto_crop: bool,

    /// Rows brighter than this on average count as blank (0-255)
    #[arg(long)]
    crop_threshold: Option<u8>,

    /// Minimum segment height kept after cropping
    #[arg(long)]
    crop_min_height: Option<u32>,

    /// Minimum height of a low-variation region
    #[arg(long)]
    min_region_height: Option<u32>,

    /// Laplacian variance threshold for low-variation rows
    #[arg(long)]
    variance_threshold: Option<f64>,

    /// Intensity variance threshold for flat color rows
    #[arg(long)]
    color_variance_threshold: Option<f64>,

    /// Mean intensity jump that marks a color boundary
    #[arg(long)]
    color_diff_threshold: Option<f64>,

    /// Minimum distance between two cut lines
    #[arg(long)]
    merge_threshold: Option<u32>,

    /// Ignore cut lines above this row
    #[arg(long)]
    min_height: Option<u32>,

    /// Load parameters from a JSON file (flags override it)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Save intermediate pipeline images to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };

        let seg = &mut config.segmentation;
        if let Some(v) = self.min_region_height { seg.min_region_height = v; }
        if let Some(v) = self.variance_threshold { seg.variance_threshold = v; }
        if let Some(v) = self.color_variance_threshold { seg.color_variance_threshold = v; }
        if let Some(v) = self.color_diff_threshold { seg.color_diff_threshold = v; }
        if let Some(v) = self.merge_threshold { seg.merge_threshold = v; }
        if let Some(v) = self.min_height { seg.min_height = v; }
        if let Some(v) = self.crop_threshold { config.crop.pixel_threshold = v; }
        if let Some(v) = self.crop_min_height { config.crop.min_height = v; }
        config.auto_crop |= self.auto_crop;

        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = args.load_config()?;

    // Dump every stage of the matching pipeline
    if let Some(debug_dir) = &args.debug_out {
        let img = image_io::load_image(&args.image_path)?;
        let pipeline = if args.export {
            segmentation::build_export_pipeline(config.segmentation.clone(), config.crop_params().cloned())
        } else {
            segmentation::build_preview_pipeline(config.segmentation.clone())
        };
        let items = pipeline.with_debug(debug_dir.clone())?.run_with_executor(img)?;
        log::info!("Debug pipeline produced {} items in {}", items.len(), debug_dir.display());
    }

    if args.export {
        let summary = segmentation::export_segment_files(&args.image_path, &args.segments_dir, &config)?;
        let mut message = format!(
            "Exported {} segments to: {}",
            summary.files.len(),
            summary.output_dir.display()
        );
        if config.auto_crop {
            message.push_str(&format!(" (auto-cropped {} segments)", summary.cropped_count));
        }
        println!("{}", message);
    } else if args.split {
        let path = segmentation::write_preview(&args.image_path, &args.output_dir, &config.segmentation)?;
        println!("{}", path.display());
    } else {
        let boundaries = segmentation::split_file(&args.image_path, &config.segmentation)?;
        println!("{:?}", boundaries);
    }

    Ok(())
}
