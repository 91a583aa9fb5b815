use std::path::PathBuf;

use super::job::Job;
use super::settings::Settings;

#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub font: Option<PathBuf>,
    pub max_font_size: f32,
    pub min_font_size: f32,
    pub font_step: f32,
    pub border_band: u32,
    pub jpeg_quality: u8,
    pub parallel_workers: usize,
}

impl MergedConfig {
    /// Job values win where present; settings values fill the rest.
    pub fn new(settings: &Settings, job: &Job) -> Self {
        MergedConfig {
            font: job.font.clone().or_else(|| settings.font.clone()),
            max_font_size: job.max_font_size.unwrap_or(settings.max_font_size),
            min_font_size: job.min_font_size.unwrap_or(settings.min_font_size),
            font_step: job.font_step.unwrap_or(settings.font_step),
            border_band: job.border_band.unwrap_or(settings.border_band),
            jpeg_quality: job.jpeg_quality.unwrap_or(settings.jpeg_quality),
            parallel_workers: settings.parallel_workers,
        }
    }

    /// Reject value combinations that would break the font-size search or
    /// the border sampling before any page work starts.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.font_step <= 0.0 {
            return Err(crate::error::PdfRetextError::config(format!(
                "font_step must be positive, got {}",
                self.font_step
            )));
        }
        if self.min_font_size <= 0.0 {
            return Err(crate::error::PdfRetextError::config(format!(
                "min_font_size must be positive, got {}",
                self.min_font_size
            )));
        }
        if self.min_font_size > self.max_font_size {
            return Err(crate::error::PdfRetextError::config(format!(
                "min_font_size ({}) exceeds max_font_size ({})",
                self.min_font_size, self.max_font_size
            )));
        }
        if self.border_band == 0 {
            return Err(crate::error::PdfRetextError::config(
                "border_band must be at least 1 pixel",
            ));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(crate::error::PdfRetextError::config(format!(
                "jpeg_quality must be 1-100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}
