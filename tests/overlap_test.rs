// Overlap correction tests

use pdf_retext::blocks::overlap::correct_overlaps;
use pdf_retext::blocks::{BoundingBox, TextBlock};

fn block(x_min: u32, y_min: u32, x_max: u32, y_max: u32) -> TextBlock {
    TextBlock {
        page_index: 1,
        bbox: BoundingBox {
            x_min,
            y_min,
            x_max,
            y_max,
        },
        translated_text: String::new(),
    }
}

// ============================================================
// 1. Spec scenario: overlapping pair
// ============================================================

#[test]
fn test_overlapping_pair_pushes_top_edge_down() {
    // A: y 100-150, x 10-200; B: y 140-190, x 50-150 (nested under A's span)
    let mut blocks = vec![block(10, 100, 200, 150), block(50, 140, 150, 190)];

    correct_overlaps(&mut blocks);

    assert_eq!(blocks[1].bbox.y_min, 150, "B's top edge moves to A's bottom");
    assert_eq!(blocks[1].bbox.y_max, 190);
    assert_eq!(blocks[1].bbox.x_min, 50);
    assert_eq!(blocks[1].bbox.x_max, 150);
}

#[test]
fn test_first_block_never_modified() {
    let mut blocks = vec![block(10, 100, 200, 150), block(50, 140, 150, 190)];
    let first = blocks[0].clone();

    correct_overlaps(&mut blocks);

    assert_eq!(blocks[0], first);
}

// ============================================================
// 2. Horizontal intersection forms
// ============================================================

#[test]
fn test_straddle_form_corrects() {
    // previous x 10-100; current x 50-200: prev's x_max (100) falls strictly
    // inside current's span
    let mut blocks = vec![block(10, 100, 100, 150), block(50, 140, 200, 190)];

    correct_overlaps(&mut blocks);

    assert_eq!(blocks[1].bbox.y_min, 150);
}

#[test]
fn test_nested_form_corrects() {
    // previous x 10-300; current x 50-150: current's x_max strictly inside
    // prev's span and above prev's x_min
    let mut blocks = vec![block(10, 100, 300, 150), block(50, 140, 150, 190)];

    correct_overlaps(&mut blocks);

    assert_eq!(blocks[1].bbox.y_min, 150);
}

#[test]
fn test_boundary_touch_is_not_overlap() {
    // current's x_max equals prev's x_max: both horizontal conditions are
    // strict, so no correction
    let mut blocks = vec![block(10, 100, 200, 150), block(50, 140, 200, 190)];

    correct_overlaps(&mut blocks);

    assert_eq!(blocks[1].bbox.y_min, 140);
}

#[test]
fn test_vertical_touch_is_not_overlap() {
    // current's y_min equals prev's y_max exactly
    let mut blocks = vec![block(10, 100, 200, 150), block(50, 150, 150, 190)];

    correct_overlaps(&mut blocks);

    assert_eq!(blocks[1].bbox.y_min, 150);
}

#[test]
fn test_horizontally_disjoint_blocks_untouched() {
    // vertical overlap but side-by-side columns
    let mut blocks = vec![block(10, 100, 100, 150), block(120, 140, 250, 190)];

    correct_overlaps(&mut blocks);

    assert_eq!(blocks[1].bbox.y_min, 140);
}

// ============================================================
// 3. Only y_min ever changes
// ============================================================

#[test]
fn test_only_top_edge_is_written() {
    let mut blocks = vec![
        block(10, 100, 200, 150),
        block(50, 140, 150, 190),
        block(20, 180, 180, 240),
    ];
    let originals = blocks.clone();

    correct_overlaps(&mut blocks);

    for (corrected, original) in blocks.iter().zip(&originals) {
        assert_eq!(corrected.bbox.x_min, original.bbox.x_min);
        assert_eq!(corrected.bbox.x_max, original.bbox.x_max);
        assert_eq!(corrected.bbox.y_max, original.bbox.y_max);
        assert!(
            corrected.bbox.y_min >= original.bbox.y_min,
            "top edge only ever moves down"
        );
    }
}

// ============================================================
// 4. Chained correction tracks boxes as read
// ============================================================

#[test]
fn test_chain_uses_previous_box_as_read() {
    // Block 2 is corrected against block 1; block 3 must be checked against
    // block 2's original extents, not its shifted ones.
    let mut blocks = vec![
        block(10, 100, 200, 150),
        block(50, 140, 150, 190),
        block(60, 185, 140, 240),
    ];

    correct_overlaps(&mut blocks);

    assert_eq!(blocks[1].bbox.y_min, 150);
    // block 3: y_min 185 < block 2's y_max 190, nested inside 50-150
    assert_eq!(blocks[2].bbox.y_min, 190);
}

#[test]
fn test_adjacent_pairs_no_longer_overlap_after_correction() {
    let mut blocks = vec![
        block(10, 100, 200, 160),
        block(50, 120, 150, 200),
        block(40, 170, 160, 260),
    ];

    correct_overlaps(&mut blocks);

    for pair in blocks.windows(2) {
        let prev = &pair[0].bbox;
        let cur = &pair[1].bbox;
        let straddle = cur.x_min < prev.x_max && prev.x_max < cur.x_max;
        let nested = prev.x_min < cur.x_max && cur.x_max < prev.x_max;
        if straddle || nested {
            assert!(
                cur.y_min >= prev.y_max,
                "horizontally intersecting neighbors must not overlap vertically"
            );
        }
    }
}

// ============================================================
// 5. Degenerate inputs
// ============================================================

#[test]
fn test_single_block_is_a_no_op() {
    let mut blocks = vec![block(10, 100, 200, 150)];
    let original = blocks[0].clone();

    correct_overlaps(&mut blocks);

    assert_eq!(blocks[0], original);
}

#[test]
fn test_empty_slice_is_a_no_op() {
    let mut blocks: Vec<TextBlock> = Vec::new();
    correct_overlaps(&mut blocks);
    assert!(blocks.is_empty());
}
