use image::DynamicImage;
use log::{debug, info};
use std::sync::Arc;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender, Receiver};
use anyhow::{Context, Result};

/// Bounding box in the original image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Data that flows through the pipeline
/// Each PipelineData is a whole page or one slice of it, with associated metadata
#[derive(Clone)]
pub struct PipelineData {
    /// The image data for this item
    pub image: DynamicImage,

    /// Reference to the original page (shared via Arc)
    pub original: Arc<DynamicImage>,

    /// Bounding box in the original image (None means full image)
    pub bbox: Option<BoundingBox>,

    /// Metadata such as "boundaries", "segment_index" or "cropped"
    pub metadata: HashMap<String, MetadataValue>,
}

/// Metadata value types
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Bool(bool),
    Int(i32),
    /// Row indices, e.g. detected boundaries
    Rows(Vec<u32>),
}

impl PipelineData {
    /// Create PipelineData for a full image
    pub fn from_image(image: DynamicImage) -> Self {
        let original = Arc::new(image.clone());
        Self {
            image,
            original,
            bbox: None,
            metadata: HashMap::new(),
        }
    }

    /// Create PipelineData for a region of an image
    pub fn from_region(
        image: DynamicImage,
        original: Arc<DynamicImage>,
        bbox: BoundingBox,
    ) -> Self {
        Self {
            image,
            original,
            bbox: Some(bbox),
            metadata: HashMap::new(),
        }
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: MetadataValue) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Get metadata as bool
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.metadata.get(key) {
            Some(MetadataValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Get metadata as int
    pub fn get_int(&self, key: &str) -> Option<i32> {
        match self.metadata.get(key) {
            Some(MetadataValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Get metadata as a list of rows
    pub fn get_rows(&self, key: &str) -> Option<&[u32]> {
        match self.metadata.get(key) {
            Some(MetadataValue::Rows(v)) => Some(v.as_slice()),
            _ => None,
        }
    }
}

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
    /// Whether debug mode is enabled
    pub enabled: bool,
}

/// Context available to all pipeline steps
#[derive(Clone, Default)]
pub struct PipelineContext {
    pub debug: Option<DebugConfig>,
}

impl PipelineContext {
    fn debug_dir(&self) -> Option<&Path> {
        self.debug
            .as_ref()
            .filter(|d| d.enabled)
            .map(|d| d.output_dir.as_path())
    }
}

/// Directory name for a step's debug dumps, e.g. "02_blank_edge_crop"
fn step_dir_name(step_index: usize, step_name: &str) -> String {
    format!("{:02}_{}", step_index, step_name.to_lowercase().replace(' ', "_"))
}

fn save_debug_image(image: &DynamicImage, dir: &Path, filename: &str) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    crate::image_io::save_image(image, &path)
        .with_context(|| format!("Failed to save debug image {}", path.display()))?;
    debug!("saved debug image {}", path.display());
    Ok(())
}

/// Trait that all pipeline steps must implement
pub trait PipelineStep: Send + Sync {
    /// Process data and return transformed data
    /// Steps can split data (1 → many), filter (many → fewer), or transform (many → many)
    fn process(&self, data: Vec<PipelineData>, context: &PipelineContext) -> Result<Vec<PipelineData>>;

    /// Human-readable name for this step (used in logs and debug directories)
    fn name(&self) -> &str;
}

/// Work item for pipeline execution
/// Contains data and the remaining steps to execute
#[derive(Clone)]
pub struct WorkItem {
    /// The data to process
    pub data: PipelineData,

    /// Remaining pipeline steps (steps not yet executed)
    pub remaining_steps: Vec<Arc<dyn PipelineStep>>,

    /// Step index (for tracking progress)
    pub current_step_index: usize,

    /// Lineage: IDs from previous steps that led to this item
    /// E.g., [1, 3] means: item 1 from step 0 → item 3 from step 1
    pub lineage: Vec<usize>,
}

impl WorkItem {
    /// Create a new work item
    pub fn new(data: PipelineData, steps: Vec<Arc<dyn PipelineStep>>) -> Self {
        Self {
            data,
            remaining_steps: steps,
            current_step_index: 0,
            lineage: vec![],
        }
    }

    /// Check if this work item is complete (no more steps)
    pub fn is_complete(&self) -> bool {
        self.remaining_steps.is_empty()
    }

    /// Generate filename from lineage (e.g., "01-03.png")
    pub fn lineage_filename(&self, extension: &str) -> String {
        if self.lineage.is_empty() {
            format!("01.{}", extension)
        } else {
            let ids: Vec<String> = self.lineage.iter().map(|id| format!("{:02}", id)).collect();
            format!("{}.{}", ids.join("-"), extension)
        }
    }

    fn save_debug_output(&self, context: &PipelineContext, step_name: &str) -> Result<()> {
        if let Some(root) = context.debug_dir() {
            let dir = root.join(step_dir_name(self.current_step_index, step_name));
            save_debug_image(&self.data.image, &dir, &self.lineage_filename("png"))?;
        }
        Ok(())
    }

    /// Run the next step and create work items for its results
    pub fn process_next_step(&mut self, context: &PipelineContext) -> Result<Vec<WorkItem>> {
        if self.remaining_steps.is_empty() {
            return Ok(vec![]);
        }

        let step = self.remaining_steps[0].clone();
        let remaining_after = self.remaining_steps[1..].to_vec();
        let step_name = step.name();

        // Process the step (this may split 1 item into many)
        let results = step.process(vec![self.data.clone()], context)
            .with_context(|| format!("Step '{}' failed", step_name))?;

        let mut new_items = Vec::with_capacity(results.len());
        for (idx, result_data) in results.into_iter().enumerate() {
            let mut new_lineage = self.lineage.clone();
            new_lineage.push(idx + 1); // 1-indexed for readability

            let new_item = WorkItem {
                data: result_data,
                remaining_steps: remaining_after.clone(),
                current_step_index: self.current_step_index + 1,
                lineage: new_lineage,
            };

            new_item.save_debug_output(context, step_name)?;
            new_items.push(new_item);
        }

        Ok(new_items)
    }
}

/// Pipeline executor using MPSC channel for work distribution
pub struct PipelineExecutor {
    sender: Sender<WorkItem>,
    receiver: Receiver<WorkItem>,
    context: PipelineContext,
}

impl PipelineExecutor {
    /// Create a new executor
    pub fn new(context: PipelineContext) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            context,
        }
    }

    /// Execute the pipeline by processing work items from the channel.
    /// Items are handled first-in first-out, so results keep their order.
    pub fn execute(&self, initial_items: Vec<WorkItem>) -> Result<Vec<PipelineData>> {
        let mut pending_count = initial_items.len();
        for item in initial_items {
            self.sender.send(item)
                .map_err(|e| anyhow::anyhow!("Failed to send work item: {}", e))?;
        }

        let mut completed_results = Vec::new();

        // Every pending item is already queued, so recv never waits
        while pending_count > 0 {
            let mut item = self.receiver.recv()
                .map_err(|e| anyhow::anyhow!("Work queue closed: {}", e))?;
            pending_count -= 1;

            if item.is_complete() {
                completed_results.push(item.data);
            } else {
                let new_items = item.process_next_step(&self.context)?;
                for new_item in new_items {
                    self.sender.send(new_item)
                        .map_err(|e| anyhow::anyhow!("Failed to send work item: {}", e))?;
                    pending_count += 1;
                }
            }
        }

        Ok(completed_results)
    }
}

/// Composable pipeline builder
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    context: PipelineContext,
}

impl Pipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            context: PipelineContext::default(),
        }
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.context.debug = Some(DebugConfig {
            output_dir,
            enabled: true,
        });

        Ok(self)
    }

    /// Add a processing step to the pipeline
    pub fn add_step(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    fn save_debug_input(&self, input: &DynamicImage) -> Result<()> {
        if let Some(root) = self.context.debug_dir() {
            save_debug_image(input, &root.join("00_input"), "01.png")?;
        }
        Ok(())
    }

    /// Run the pipeline step by step over the whole batch
    pub fn run(&self, input: DynamicImage) -> Result<Vec<PipelineData>> {
        self.save_debug_input(&input)?;

        let mut data = vec![PipelineData::from_image(input)];

        for (step_idx, step) in self.steps.iter().enumerate() {
            info!("Running step: {} (processing {} items)", step.name(), data.len());

            let step_name = step.name();
            data = step.process(data, &self.context)
                .with_context(|| format!("Step '{}' failed", step_name))?;

            if let Some(root) = self.context.debug_dir() {
                let dir = root.join(step_dir_name(step_idx + 1, step_name));
                for (idx, item) in data.iter().enumerate() {
                    save_debug_image(&item.image, &dir, &format!("{:02}.png", idx + 1))?;
                }
            }

            debug!("  → {} items", data.len());
        }

        Ok(data)
    }

    /// Run the pipeline using the executor with work queue
    pub fn run_with_executor(&self, input: DynamicImage) -> Result<Vec<PipelineData>> {
        self.save_debug_input(&input)?;

        let initial_data = PipelineData::from_image(input);
        let initial_item = WorkItem::new(initial_data, self.steps.clone());

        let executor = PipelineExecutor::new(self.context.clone());
        executor.execute(vec![initial_item])
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
