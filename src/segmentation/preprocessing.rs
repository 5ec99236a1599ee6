use image::{DynamicImage, GrayImage, Luma};

/// Mean and population variance of one image row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowStats {
    pub mean: f64,
    pub variance: f64,
}

/// Rec. 601 luma weights in 14-bit fixed point, summing to `1 << 14`
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// Rec. 601 luma of one pixel, rounded to nearest
pub fn luma_601(r: u8, g: u8, b: u8) -> u8 {
    let weighted = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32;
    ((weighted + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

/// Convert image to single-channel intensity.
///
/// Color input is weighted 0.299 / 0.587 / 0.114 (Rec. 601). Alpha is
/// ignored. 8-bit grayscale input is used as is.
pub fn to_intensity(img: &DynamicImage) -> GrayImage {
    if let DynamicImage::ImageLuma8(gray) = img {
        return gray.clone();
    }
    let rgb = img.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        Luma([luma_601(r, g, b)])
    })
}

fn row(gray: &GrayImage, y: u32) -> &[u8] {
    let width = gray.width() as usize;
    let start = y as usize * width;
    &gray.as_raw()[start..start + width]
}

fn mean_and_variance(values: &[f64]) -> RowStats {
    if values.is_empty() {
        return RowStats { mean: 0.0, variance: 0.0 };
    }
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / count;
    RowStats { mean, variance }
}

/// Per-row intensity mean and variance, top to bottom
pub fn row_stats(gray: &GrayImage) -> Vec<RowStats> {
    (0..gray.height())
        .map(|y| {
            let values: Vec<f64> = row(gray, y).iter().map(|&p| p as f64).collect();
            mean_and_variance(&values)
        })
        .collect()
}

/// Per-row mean intensity, top to bottom
pub fn row_means(gray: &GrayImage) -> Vec<f64> {
    let width = gray.width().max(1) as f64;
    (0..gray.height())
        .map(|y| row(gray, y).iter().map(|&p| p as u64).sum::<u64>() as f64 / width)
        .collect()
}

/// Variance of the Laplacian response of a single row.
///
/// The row is filtered in isolation, so the vertical neighbours are the row
/// itself and the 3x3 Laplacian reduces to `left + right - 2 * center`.
/// Borders reflect without repeating the edge pixel (`x = -1` reads `x = 1`).
/// A one-pixel-wide row has no structure and scores zero.
pub fn row_laplacian_variance(gray: &GrayImage, y: u32) -> f64 {
    let pixels = row(gray, y);
    let n = pixels.len();
    if n < 2 {
        return 0.0;
    }

    let response: Vec<f64> = (0..n)
        .map(|x| {
            let left = if x == 0 { pixels[1] } else { pixels[x - 1] };
            let right = if x == n - 1 { pixels[n - 2] } else { pixels[x + 1] };
            left as f64 + right as f64 - 2.0 * pixels[x] as f64
        })
        .collect();
    mean_and_variance(&response).variance
}
