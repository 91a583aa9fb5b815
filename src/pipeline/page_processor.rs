use std::path::Path;

use image::RgbImage;
use tracing::{debug, warn};

use crate::blocks::overlap::correct_overlaps;
use crate::blocks::{TextBlock, validate_blocks};
use crate::config::merged::MergedConfig;
use crate::error::PdfRetextError;
use crate::font::LoadedFont;
use crate::raster::RenderedPage;
use crate::raster::inpaint::inpaint_block;
use crate::raster::jpeg::encode_rgb_to_jpeg;
use crate::raster::textfit::{FitOptions, fit_and_render};

/// Single page processing result.
pub struct ProcessedPage {
    pub page_index: u32,
    pub output: RenderedPage,
    /// Blocks whose text still overflowed at the smallest tried font size.
    pub unfitted_blocks: usize,
}

/// Rewrite one page: erase every block's original text region and draw its
/// translated text shrunk to the original box, then encode the result.
///
/// The page image is converted to 8-bit RGB up front (dropping any alpha
/// channel), block geometry is validated against the page dimensions, and
/// overlapping boxes are corrected before any pixel is written. A page with
/// no blocks passes through unmodified and is still encoded.
///
/// Any error here fails this page only; the caller excludes it from
/// assembly and keeps going.
pub fn process_page(
    page_index: u32,
    image_path: &Path,
    blocks: &mut [TextBlock],
    font: &LoadedFont,
    config: &MergedConfig,
) -> crate::error::Result<ProcessedPage> {
    let image = image::open(image_path)
        .map_err(|e| PdfRetextError::page_load(format!("{}: {e}", image_path.display())))?;
    let mut rgb = image.to_rgb8();

    validate_blocks(blocks, rgb.width(), rgb.height())?;

    let unfitted_blocks = render_blocks(&mut rgb, blocks, font, config);
    debug!(
        "page {page_index}: {} blocks rewritten, {unfitted_blocks} unfitted",
        blocks.len()
    );

    let (width, height) = rgb.dimensions();
    let jpeg = encode_rgb_to_jpeg(&rgb, config.jpeg_quality)?;

    Ok(ProcessedPage {
        page_index,
        output: RenderedPage {
            page_index,
            jpeg,
            width,
            height,
        },
        unfitted_blocks,
    })
}

/// Correct overlaps, then inpaint and re-render every block against the
/// page buffer, in discovery order.
///
/// The buffer is edited sequentially: later blocks must see earlier blocks'
/// inpainting and text, both because a later erase may legitimately cover an
/// earlier block's spill and because border sampling reads neighboring
/// pixels. Parallelism belongs at the page level, never here.
///
/// Returns how many blocks missed a fitting font size. Each miss is
/// surfaced as a warning and the block is still rendered at the smallest
/// tried size, never dropped.
pub fn render_blocks(
    image: &mut RgbImage,
    blocks: &mut [TextBlock],
    font: &LoadedFont,
    config: &MergedConfig,
) -> usize {
    correct_overlaps(blocks);

    let fit_opts = FitOptions {
        max_font_size: config.max_font_size,
        min_font_size: config.min_font_size,
        font_step: config.font_step,
    };

    let mut unfitted = 0;
    for block in blocks.iter() {
        inpaint_block(image, &block.bbox, config.border_band);
        let fit = fit_and_render(
            image,
            &font.font,
            &block.translated_text,
            &block.bbox,
            &fit_opts,
        );
        if !fit.fitted {
            unfitted += 1;
            warn!(
                "{}",
                PdfRetextError::FitNotAchieved {
                    page: block.page_index,
                    width: block.bbox.width(),
                    height: block.bbox.height(),
                    font_size: fit.font_size,
                }
            );
        }
    }
    unfitted
}
