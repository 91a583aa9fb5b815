use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfRetextError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid block geometry on page {page}: {reason}")]
    InvalidGeometry { page: u32, reason: String },

    #[error("Block record error: {0}")]
    BlockRecordError(String),

    #[error("Font error: {0}")]
    FontError(String),

    #[error(
        "Text does not fit on page {page}: box is {width}x{height}px, smallest tried font size {font_size}"
    )]
    FitNotAchieved {
        page: u32,
        width: u32,
        height: u32,
        font_size: f32,
    },

    #[error("Page load error: {0}")]
    PageLoadError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Empty document: {0}")]
    EmptyDocumentError(String),

    #[error("PDF write error: {0}")]
    PdfWriteError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Generates factory methods for [`PdfRetextError`] variants that wrap a `String`.
macro_rules! error_constructors {
    ($(
        $(#[doc = $doc:expr])*
        $method:ident => $variant:ident
    ),* $(,)?) => {
        impl PdfRetextError {
            $(
                $(#[doc = $doc])*
                pub fn $method(msg: impl Into<String>) -> Self {
                    Self::$variant(msg.into())
                }
            )*
        }
    };
}

error_constructors! {
    /// Create a configuration error.
    config => ConfigError,
    /// Create a block record error.
    block_record => BlockRecordError,
    /// Create a font error.
    font => FontError,
    /// Create a page load error.
    page_load => PageLoadError,
    /// Create a render error.
    render => RenderError,
    /// Create an empty document error.
    empty_document => EmptyDocumentError,
    /// Create a PDF write error.
    pdf_write => PdfWriteError,
}

impl From<lopdf::Error> for PdfRetextError {
    fn from(e: lopdf::Error) -> Self {
        Self::PdfWriteError(e.to_string())
    }
}

impl From<serde_json::Error> for PdfRetextError {
    fn from(e: serde_json::Error) -> Self {
        Self::BlockRecordError(e.to_string())
    }
}

impl From<serde_yml::Error> for PdfRetextError {
    fn from(e: serde_yml::Error) -> Self {
        Self::ConfigError(e.to_string())
    }
}

impl From<image::ImageError> for PdfRetextError {
    fn from(e: image::ImageError) -> Self {
        Self::RenderError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PdfRetextError>;
