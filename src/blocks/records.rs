use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use super::{BoundingBox, TextBlock};

/// One block record as emitted by the OCR/translation collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockRecord {
    pub page_index: u32,
    pub x_min: u32,
    pub y_min: u32,
    pub x_max: u32,
    pub y_max: u32,
    #[serde(default)]
    pub translated_text: String,
}

impl From<BlockRecord> for TextBlock {
    fn from(r: BlockRecord) -> Self {
        TextBlock {
            page_index: r.page_index,
            bbox: BoundingBox {
                x_min: r.x_min,
                y_min: r.y_min,
                x_max: r.x_max,
                y_max: r.y_max,
            },
            translated_text: r.translated_text,
        }
    }
}

/// Load the block record JSON file for one job.
pub fn load_block_records(path: &Path) -> crate::error::Result<Vec<BlockRecord>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::error::PdfRetextError::block_record(format!("{}: {e}", path.display()))
    })?;
    let records: Vec<BlockRecord> = serde_json::from_str(&content)?;
    Ok(records)
}

/// Group records by page, preserving the recognizer's discovery order
/// within each page.
///
/// The overlap corrector and the page renderer both depend on that order;
/// nothing downstream re-sorts blocks. Records referencing a page with no
/// page image are dropped with a warning.
pub fn group_by_page(
    records: Vec<BlockRecord>,
    known_pages: &BTreeSet<u32>,
) -> BTreeMap<u32, Vec<TextBlock>> {
    let mut by_page: BTreeMap<u32, Vec<TextBlock>> = BTreeMap::new();
    for record in records {
        if !known_pages.contains(&record.page_index) {
            warn!(
                "dropping block record for unknown page {} ({:?})",
                record.page_index,
                truncate(&record.translated_text)
            );
            continue;
        }
        by_page
            .entry(record.page_index)
            .or_default()
            .push(record.into());
    }
    by_page
}

fn truncate(text: &str) -> &str {
    match text.char_indices().nth(32) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
