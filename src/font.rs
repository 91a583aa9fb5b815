use std::path::Path;

use rusttype::Font;

use crate::error::PdfRetextError;

/// The replacement typeface, loaded once per job and shared read-only
/// across all pages.
pub struct LoadedFont {
    pub font: Font<'static>,
    pub name: String,
}

/// Common TrueType locations tried before asking the system database.
/// rusttype needs glyf outlines, and these faces are known to carry them.
const FALLBACK_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Resolve the typeface for a job.
///
/// Search order:
/// 1. The `font` path from configuration, when set (failure to load it is
///    an error rather than a silent fallback)
/// 2. Well-known TrueType file locations
/// 3. A sans-serif face resolved through the system font database
///
/// Absence of any usable face is fatal for the job before any page is
/// processed; it is never a per-page failure.
pub fn load_font(configured: Option<&Path>) -> crate::error::Result<LoadedFont> {
    if let Some(path) = configured {
        let data = std::fs::read(path).map_err(|e| {
            PdfRetextError::font(format!("cannot read font {}: {e}", path.display()))
        })?;
        let font = Font::try_from_vec(data).ok_or_else(|| {
            PdfRetextError::font(format!(
                "{} is not a usable TrueType face",
                path.display()
            ))
        })?;
        return Ok(LoadedFont {
            font,
            name: path.display().to_string(),
        });
    }

    for path in FALLBACK_FONT_PATHS {
        if let Ok(data) = std::fs::read(path)
            && let Some(font) = Font::try_from_vec(data)
        {
            return Ok(LoadedFont {
                font,
                name: (*path).to_string(),
            });
        }
    }

    system_sans_serif()
}

/// Ask the system font database for a sans-serif face.
fn system_sans_serif() -> crate::error::Result<LoadedFont> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let query = fontdb::Query {
        families: &[fontdb::Family::SansSerif],
        ..fontdb::Query::default()
    };
    let id = db.query(&query).ok_or_else(|| {
        PdfRetextError::font("no system sans-serif face found; set `font` in settings.yaml")
    })?;

    let name = db
        .face(id)
        .map(|info| info.post_script_name.clone())
        .unwrap_or_else(|| "sans-serif".to_string());

    let font = db
        .with_face_data(id, |data, face_index| {
            Font::try_from_vec_and_index(data.to_vec(), face_index)
        })
        .flatten()
        .ok_or_else(|| {
            PdfRetextError::font(format!(
                "system face {name} has no TrueType outlines; set `font` in settings.yaml"
            ))
        })?;

    Ok(LoadedFont { font, name })
}
