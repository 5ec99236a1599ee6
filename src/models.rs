use image::DynamicImage;

/// A run of consecutive low-variation rows, half-open `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start: u32,
    pub end: u32,
}

impl Region {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start < end, "region must span at least one row");
        Self { start, end }
    }

    pub fn height(&self) -> u32 {
        self.end - self.start
    }

    /// Candidate cut row for this region (floor of the midpoint)
    pub fn midpoint(&self) -> u32 {
        self.start + self.height() / 2
    }
}

/// One vertical slice of a source image
#[derive(Debug, Clone)]
pub struct Segment {
    pub image: DynamicImage,

    /// First source row covered by the slice before any cropping
    pub start_row: u32,

    /// One past the last source row covered by the slice
    pub end_row: u32,

    /// Whether blank-edge cropping changed the slice height
    pub cropped: bool,
}

impl Segment {
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
