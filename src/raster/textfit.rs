use image::RgbImage;
use rusttype::{Font, PositionedGlyph, Scale, point};

use crate::blocks::BoundingBox;

/// Bounds of the descending font-size search.
#[derive(Debug, Clone)]
pub struct FitOptions {
    pub max_font_size: f32,
    pub min_font_size: f32,
    pub font_step: f32,
}

impl Default for FitOptions {
    fn default() -> Self {
        FitOptions {
            max_font_size: 72.0,
            min_font_size: 8.0,
            font_step: 2.0,
        }
    }
}

/// Outcome of fitting one block's text.
///
/// `fitted` is false when even the smallest tried size overflowed the box;
/// the text is rendered at that size regardless, and the caller surfaces
/// the miss as a warning.
#[derive(Debug, Clone)]
pub struct TextFit {
    pub font_size: f32,
    pub lines: Vec<String>,
    pub height: u32,
    pub fitted: bool,
}

/// Draw `text` word-wrapped into `bbox` at the largest font size whose
/// wrapped height fits, compositing black glyphs onto the image.
///
/// Translated text length is unrelated to the source text the box was
/// measured around, so the box stays fixed and the text shrinks to fit:
/// starting at `max_font_size`, each candidate size greedily wraps the
/// words and measures the block's real raster extent; the size is stepped
/// down until the block fits or `min_font_size` is reached. Lines render
/// left-aligned from the box's top-left corner.
///
/// `font_step` must be positive; [`MergedConfig::validate`] enforces that
/// before any page work starts.
///
/// [`MergedConfig::validate`]: crate::config::merged::MergedConfig::validate
pub fn fit_and_render(
    image: &mut RgbImage,
    font: &Font<'_>,
    text: &str,
    bbox: &BoundingBox,
    opts: &FitOptions,
) -> TextFit {
    let max_width = bbox.width() as f32;
    let max_height = bbox.height();

    let mut size = opts.max_font_size;
    let (font_size, lines, height, fitted) = loop {
        let scale = Scale::uniform(size);
        let lines = wrap_lines(font, scale, text, max_width);
        let height = block_pixel_height(font, scale, &lines);
        if height <= max_height {
            break (size, lines, height, true);
        }
        if size - opts.font_step < opts.min_font_size {
            break (size, lines, height, false);
        }
        size -= opts.font_step;
    };

    let origin = (bbox.x_min as f32, bbox.y_min as f32);
    for glyph in layout_block(font, Scale::uniform(font_size), &lines, origin) {
        draw_glyph(image, &glyph);
    }

    TextFit {
        font_size,
        lines,
        height,
        fitted,
    }
}

/// Greedily pack words into lines no wider than `max_width`.
///
/// Words are appended (with a separating space) while the rendered line
/// width stays within the budget. A single word wider than the budget is
/// placed alone on its own line; it is never hyphenated. Text that fits on
/// one line is returned unsplit.
pub fn wrap_lines(font: &Font<'_>, scale: Scale, text: &str, max_width: f32) -> Vec<String> {
    if line_width(font, scale, text) <= max_width {
        return vec![text.to_string()];
    }

    let words: Vec<&str> = text.split(' ').collect();
    let mut lines = Vec::new();
    let mut i = 0;
    while i < words.len() {
        let mut line = String::new();
        while i < words.len() && line_width(font, scale, &format!("{line}{}", words[i])) <= max_width
        {
            line.push_str(words[i]);
            line.push(' ');
            i += 1;
        }
        if line.is_empty() {
            // oversized single word
            line.push_str(words[i]);
            i += 1;
        }
        lines.push(line.trim_end().to_string());
    }
    lines
}

/// Advance width of one laid-out line, kerning included.
pub fn line_width(font: &Font<'_>, scale: Scale, line: &str) -> f32 {
    font.layout(line, scale, point(0.0, 0.0))
        .last()
        .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Vertical raster extent of the wrapped block: topmost to bottommost drawn
/// pixel across all glyphs, not line-count times line-height, since actual
/// glyph extents vary with the text.
fn block_pixel_height(font: &Font<'_>, scale: Scale, lines: &[String]) -> u32 {
    let mut min_y = i32::MAX;
    let mut max_y = i32::MIN;
    for glyph in layout_block(font, scale, lines, (0.0, 0.0)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            min_y = min_y.min(bb.min.y);
            max_y = max_y.max(bb.max.y);
        }
    }
    if min_y > max_y {
        0
    } else {
        (max_y - min_y) as u32
    }
}

/// Lay out wrapped lines below `origin`, first baseline one ascent down,
/// advancing by the face's full line height.
fn layout_block<'font>(
    font: &Font<'font>,
    scale: Scale,
    lines: &[String],
    origin: (f32, f32),
) -> Vec<PositionedGlyph<'font>> {
    let v = font.v_metrics(scale);
    let line_advance = (v.ascent - v.descent + v.line_gap).ceil();

    let mut glyphs = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let baseline = origin.1 + v.ascent + i as f32 * line_advance;
        glyphs.extend(font.layout(line, scale, point(origin.0, baseline)));
    }
    glyphs
}

/// Composite one glyph in black, clipped to the image (not the box: an
/// unfit fallback overflows the box on purpose).
///
/// Each covered pixel darkens to at most `(1 - coverage) * 255`, so
/// repainting the same glyph over its own output changes nothing and
/// re-rendering a page stays pixel-stable.
fn draw_glyph(image: &mut RgbImage, glyph: &PositionedGlyph<'_>) {
    let (width, height) = image.dimensions();
    let Some(bb) = glyph.pixel_bounding_box() else {
        return;
    };
    glyph.draw(|gx, gy, coverage| {
        let x = bb.min.x + gx as i32;
        let y = bb.min.y + gy as i32;
        if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
            return;
        }
        let shade = ((1.0 - coverage) * 255.0).round() as u8;
        let px = image.get_pixel_mut(x as u32, y as u32);
        for c in px.0.iter_mut() {
            *c = (*c).min(shade);
        }
    });
}
