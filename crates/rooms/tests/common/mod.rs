use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{DynamicImage, GrayImage, ImageFormat, Luma};

pub fn blank_page(width: u32, height: u32) -> GrayImage {
    GrayImage::from_pixel(width, height, Luma([255u8]))
}

/// Paint a rectangular wall outline in black. The outer edge spans
/// `x0..x0+width` by `y0..y0+height`; walls are `thickness` pixels thick.
pub fn draw_wall_outline(
    page: &mut GrayImage,
    x0: u32,
    y0: u32,
    width: u32,
    height: u32,
    thickness: u32,
) {
    for y in y0..y0 + height {
        for x in x0..x0 + width {
            let inside_x = x >= x0 + thickness && x < x0 + width - thickness;
            let inside_y = y >= y0 + thickness && y < y0 + height - thickness;
            if !(inside_x && inside_y) {
                page.put_pixel(x, y, Luma([0u8]));
            }
        }
    }
}

/// Cut a doorway-style gap of `gap` pixels out of the top wall.
pub fn cut_top_wall_gap(page: &mut GrayImage, x_start: u32, gap: u32, y0: u32, thickness: u32) {
    for y in y0..y0 + thickness {
        for x in x_start..x_start + gap {
            page.put_pixel(x, y, Luma([255u8]));
        }
    }
}

/// Encode a page as a base64 PNG payload, the transport input format.
pub fn png_payload(page: &GrayImage) -> String {
    let mut buf = Vec::new();
    DynamicImage::ImageLuma8(page.clone())
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("in-memory png encode");
    STANDARD.encode(buf)
}
