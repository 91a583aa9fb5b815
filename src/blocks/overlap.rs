use super::TextBlock;

/// Resolve vertical bounding-box overlaps between consecutive blocks.
///
/// The recognizer emits paragraph boxes in top-to-bottom discovery order,
/// but curved lines or page skew can make a box's vertical extent bleed
/// into its predecessor's. Left unresolved, inpainting one block would
/// erase part of the next, so an overlapping block's top edge is pushed
/// down to the predecessor's bottom edge.
///
/// A block overlaps its predecessor when its top lies above the
/// predecessor's bottom AND the horizontal ranges intersect: either the
/// predecessor's right edge falls strictly inside the block's span, or the
/// block's right edge falls strictly inside the predecessor's span.
///
/// Boxes only ever have their top edge raised; `x_min`, `x_max` and
/// `y_max` are never written, and the first block is never modified. The
/// running previous-block values are taken from each box as read, before
/// any shift is applied.
pub fn correct_overlaps(blocks: &mut [TextBlock]) {
    let Some(first) = blocks.first() else {
        return;
    };
    let mut y_max_prev = first.bbox.y_max;
    let mut x_min_prev = first.bbox.x_min;
    let mut x_max_prev = first.bbox.x_max;

    for block in &mut blocks[1..] {
        let (y_min, y_max) = (block.bbox.y_min, block.bbox.y_max);
        let (x_min, x_max) = (block.bbox.x_min, block.bbox.x_max);

        let vertical_overlap = y_min < y_max_prev;
        let straddles_prev_right = x_min < x_max_prev && x_max_prev < x_max;
        let nested_in_prev = x_min_prev < x_max && x_max < x_max_prev;

        if vertical_overlap && (straddles_prev_right || nested_in_prev) {
            block.bbox.y_min = y_max_prev;
        }

        y_max_prev = y_max;
        x_min_prev = x_min;
        x_max_prev = x_max;
    }
}
