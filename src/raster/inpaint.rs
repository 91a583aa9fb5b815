use image::{Rgb, RgbImage};

use crate::blocks::BoundingBox;

/// Erase the text inside `bbox` by painting the box with the median color
/// of the pixel bands just outside it.
///
/// Four bands of `band` pixels are sampled immediately outside the box:
/// above and below spanning the box's width, left and right spanning the
/// box's vertical range. Band coordinates are clamped to the image, and a
/// band left empty by clamping simply contributes no samples. When every
/// band is empty (a box flush with all four image edges) the fill falls
/// back to white.
///
/// A solid median fill is a deliberately cheap stand-in for real
/// inpainting; scanned-paper backgrounds are uniform enough that it blends.
/// Pixels outside the box are never written.
///
/// Returns the fill color that was painted.
pub fn inpaint_block(image: &mut RgbImage, bbox: &BoundingBox, band: u32) -> Rgb<u8> {
    let fill = border_median(image, bbox, band).unwrap_or(Rgb([255, 255, 255]));
    fill_rect(image, bbox, fill);
    fill
}

/// Per-channel median over the four border bands, or `None` when no band
/// sample survives clamping.
fn border_median(image: &RgbImage, bbox: &BoundingBox, band: u32) -> Option<Rgb<u8>> {
    let (width, height) = image.dimensions();
    let mut channels: [Vec<u8>; 3] = [Vec::new(), Vec::new(), Vec::new()];

    let mut sample = |x0: u32, x1: u32, y0: u32, y1: u32| {
        for y in y0..y1.min(height) {
            for x in x0..x1.min(width) {
                let px = image.get_pixel(x, y);
                channels[0].push(px[0]);
                channels[1].push(px[1]);
                channels[2].push(px[2]);
            }
        }
    };

    // top and bottom bands span the box's width
    sample(
        bbox.x_min,
        bbox.x_max,
        bbox.y_min.saturating_sub(band),
        bbox.y_min,
    );
    sample(
        bbox.x_min,
        bbox.x_max,
        bbox.y_max,
        bbox.y_max.saturating_add(band),
    );
    // left and right bands span the box's vertical range
    sample(
        bbox.x_min.saturating_sub(band),
        bbox.x_min,
        bbox.y_min,
        bbox.y_max,
    );
    sample(
        bbox.x_max,
        bbox.x_max.saturating_add(band),
        bbox.y_min,
        bbox.y_max,
    );

    if channels[0].is_empty() {
        return None;
    }

    let [mut r, mut g, mut b] = channels;
    Some(Rgb([
        channel_median(&mut r),
        channel_median(&mut g),
        channel_median(&mut b),
    ]))
}

/// Median of one channel; even counts take the rounded mean of the two
/// central values.
fn channel_median(values: &mut [u8]) -> u8 {
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        ((u16::from(values[mid - 1]) + u16::from(values[mid])).div_ceil(2)) as u8
    }
}

fn fill_rect(image: &mut RgbImage, bbox: &BoundingBox, color: Rgb<u8>) {
    let (width, height) = image.dimensions();
    for y in bbox.y_min..bbox.y_max.min(height) {
        for x in bbox.x_min..bbox.x_max.min(width) {
            image.put_pixel(x, y, color);
        }
    }
}
