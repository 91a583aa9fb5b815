use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path to the replacement typeface. When absent, a system sans-serif
    /// face is resolved at job startup.
    pub font: Option<PathBuf>,
    pub max_font_size: f32,
    pub min_font_size: f32,
    pub font_step: f32,
    pub border_band: u32,
    pub jpeg_quality: u8,
    pub parallel_workers: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            font: None,
            max_font_size: 72.0,
            min_font_size: 8.0,
            font_step: 2.0,
            border_band: 5,
            jpeg_quality: 90,
            parallel_workers: 0,
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        serde_yml::from_str(yaml).map_err(|e| {
            crate::error::PdfRetextError::config(format!("Failed to parse settings YAML: {e}"))
        })
    }

    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}
