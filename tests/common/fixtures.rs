#![allow(dead_code)]

use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use std::path::{Path, PathBuf};

pub const WHITE: [u8; 3] = [255, 255, 255];
pub const MID_GRAY: [u8; 3] = [128, 128, 128];
/// Intensity 111 after conversion
pub const BANNER_BLUE: [u8; 3] = [100, 100, 200];
/// Intensity 23; a Rec. 709 conversion would give 14
pub const DEEP_BLUE: [u8; 3] = [0, 0, 200];
/// Intensity 235; a Rec. 709 conversion would give 241
pub const PALE_YELLOW: [u8; 3] = [250, 250, 120];

/// How a band of rows is filled
#[derive(Debug, Clone, Copy)]
pub enum Fill {
    Solid([u8; 3]),
    /// Columns alternating black and white: every row is full of edges
    Stripes,
    /// Columns alternating between two colors
    Columns([u8; 3], [u8; 3]),
}

impl Fill {
    fn pixel(&self, x: u32) -> Rgb<u8> {
        match self {
            Fill::Solid(c) => Rgb(*c),
            Fill::Stripes if x % 2 == 0 => Rgb([0, 0, 0]),
            Fill::Stripes => Rgb(WHITE),
            Fill::Columns(even, _) if x % 2 == 0 => Rgb(*even),
            Fill::Columns(_, odd) => Rgb(*odd),
        }
    }
}

/// Build an image from bands of `(rows, fill)`, top to bottom
pub fn banded(width: u32, bands: &[(u32, Fill)]) -> RgbImage {
    let height: u32 = bands.iter().map(|(h, _)| h).sum();
    let mut fills = Vec::with_capacity(height as usize);
    for (rows, fill) in bands {
        fills.extend(std::iter::repeat(*fill).take(*rows as usize));
    }
    ImageBuffer::from_fn(width, height, |x, y| fills[y as usize].pixel(x))
}

pub fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    ImageBuffer::from_fn(width, height, |_, _| Rgb(color))
}

/// Grayscale image whose rows take the given intensities
pub fn gray_rows(width: u32, rows: &[u8]) -> DynamicImage {
    let img: GrayImage =
        ImageBuffer::from_fn(width, rows.len() as u32, |_, y| Luma([rows[y as usize]]));
    DynamicImage::ImageLuma8(img)
}

/// Every pixel different from its neighbours, for exact reconstruction checks
pub fn noisy(width: u32, height: u32) -> RgbImage {
    ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(y % 256) as u8, (x % 256) as u8, ((x * 7 + y * 13) % 256) as u8])
    })
}

/// A 200x2000 page:
/// stripes 0..150, white 150..550, stripes 550..800,
/// blue banner 800..1400, white 1400..2000.
/// With default parameters its boundaries are [350, 800, 1400].
pub fn sample_page() -> DynamicImage {
    DynamicImage::ImageRgb8(banded(
        200,
        &[
            (150, Fill::Stripes),
            (400, Fill::Solid(WHITE)),
            (250, Fill::Stripes),
            (600, Fill::Solid(BANNER_BLUE)),
            (600, Fill::Solid(WHITE)),
        ],
    ))
}

pub const SAMPLE_PAGE_BOUNDARIES: [u32; 3] = [350, 800, 1400];

/// Stack images top to bottom as 8-bit RGB
pub fn stack_vertically(parts: &[DynamicImage]) -> RgbImage {
    let width = parts.first().map_or(0, |p| p.width());
    let height = parts.iter().map(|p| p.height()).sum();
    let mut out = RgbImage::new(width, height);
    let mut y = 0;
    for part in parts {
        image::imageops::replace(&mut out, &part.to_rgb8(), 0, y as i64);
        y += part.height();
    }
    out
}

/// Save `img` as PNG under `dir` and return its path
pub fn write_png(img: &DynamicImage, dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    img.save_with_format(&path, image::ImageFormat::Png)
        .expect("Failed to save test image");
    path
}

/// Deterministic pseudo-random generator for layout sweeps
pub struct Lcg(pub u64);

impl Lcg {
    pub fn next(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    pub fn below(&mut self, bound: u32) -> u32 {
        self.next() % bound
    }
}

/// Random page of bands mixing stripes and solid colors
pub fn random_page(rng: &mut Lcg, width: u32, bands: usize) -> DynamicImage {
    let layout: Vec<(u32, Fill)> = (0..bands)
        .map(|_| {
            let rows = 20 + rng.below(300);
            let fill = match rng.below(3) {
                0 => Fill::Stripes,
                _ => {
                    let v = rng.below(256) as u8;
                    Fill::Solid([v, v, v])
                }
            };
            (rows, fill)
        })
        .collect();
    DynamicImage::ImageRgb8(banded(width, &layout))
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
