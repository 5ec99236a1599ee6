use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;

/// Line color used for boundary previews
pub const PREVIEW_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Draw full-width horizontal lines, two pixels thick, on a copy of the image.
///
/// Rows at or past the bottom edge are skipped.
pub fn draw_horizontal_lines(img: &DynamicImage, rows: &[u32], color: Rgb<u8>) -> RgbImage {
    let mut canvas = img.to_rgb8();
    let (width, height) = canvas.dimensions();
    let right = width.saturating_sub(1) as f32;

    for &row in rows {
        for y in [row, row.saturating_add(1)] {
            if y >= height {
                continue;
            }
            draw_line_segment_mut(&mut canvas, (0.0, y as f32), (right, y as f32), color);
        }
    }
    canvas
}
