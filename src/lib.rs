//! Rebuilds page-image documents after translation: each recognized text
//! region is erased with a background fill sampled from its border and the
//! translated text is redrawn shrunk to the original box, then the pages
//! are reassembled into a single PDF.

pub mod blocks;
pub mod config;
pub mod error;
pub mod font;
pub mod pdf;
pub mod pipeline;
pub mod raster;
