use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JobFile {
    pub jobs: Vec<Job>,
}

/// One reconstruction job: a directory of page images plus the block records
/// produced by the upstream recognizer/translator, written out as one PDF.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    /// Directory containing `page_<n>.png` images (1-based page numbers).
    pub images: String,
    /// JSON file with the translated block records.
    pub blocks: String,
    /// Output PDF path.
    pub output: String,
    pub font: Option<PathBuf>,
    pub max_font_size: Option<f32>,
    pub min_font_size: Option<f32>,
    pub font_step: Option<f32>,
    pub border_band: Option<u32>,
    pub jpeg_quality: Option<u8>,
}
