use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{error, info};

use crate::blocks::TextBlock;
use crate::blocks::records::{group_by_page, load_block_records};
use crate::config::merged::MergedConfig;
use crate::error::PdfRetextError;
use crate::font::{self, LoadedFont};
use crate::pdf::writer::PageWriter;
use crate::pipeline::page_processor::{ProcessedPage, process_page};

/// Configuration for a single job.
pub struct JobConfig {
    pub images_dir: PathBuf,
    pub blocks_path: PathBuf,
    pub output_path: PathBuf,
    pub config: MergedConfig,
}

/// One page that could not be rendered; the rest of the document is still
/// produced without it.
pub struct PageFailure {
    pub page_index: u32,
    pub reason: String,
}

/// Result of processing a single job.
pub struct JobResult {
    pub output_path: PathBuf,
    pub pages_processed: usize,
    pub failed_pages: Vec<PageFailure>,
}

/// Work unit for one page: its image path plus its blocks in discovery
/// order.
struct PageWork {
    page_index: u32,
    image_path: PathBuf,
    blocks: Vec<TextBlock>,
}

/// Run a single reconstruction job.
///
/// Phase A: discover page images and group block records per page
/// Phase B: load the typeface (fatal before any page work)
/// Phase C: per-page rewrite (rayon parallel; pages are independent)
/// Phase D: PDF assembly in ascending page order (sequential)
///
/// A failed page is logged, reported in the result, and excluded from the
/// output; the job only fails when no page survives.
pub fn run_job(job: &JobConfig) -> crate::error::Result<JobResult> {
    job.config.validate()?;

    // --- Phase A: inputs ---
    let pages = discover_page_images(&job.images_dir)?;
    if pages.is_empty() {
        return Err(PdfRetextError::empty_document(format!(
            "no page images (page_<n>.png) found in {}",
            job.images_dir.display()
        )));
    }
    let page_total = pages.len();

    let records = load_block_records(&job.blocks_path)?;
    let known_pages: BTreeSet<u32> = pages.iter().map(|(index, _)| *index).collect();
    let mut blocks_by_page = group_by_page(records, &known_pages);

    // --- Phase B: typeface, loaded once and shared read-only ---
    let font = font::load_font(job.config.font.as_deref())?;
    info!("typeface: {}", font.name);

    let work: Vec<PageWork> = pages
        .into_iter()
        .map(|(page_index, image_path)| PageWork {
            page_index,
            image_path,
            blocks: blocks_by_page.remove(&page_index).unwrap_or_default(),
        })
        .collect();

    // --- Phase C: per-page rewrite (parallel across pages only) ---
    let results = run_pages(work, &font, &job.config)?;

    let mut rendered: Vec<ProcessedPage> = Vec::new();
    let mut failed_pages: Vec<PageFailure> = Vec::new();
    for (page_index, result) in results {
        match result {
            Ok(page) => rendered.push(page),
            Err(e) => {
                error!("page {page_index}: {e}");
                failed_pages.push(PageFailure {
                    page_index,
                    reason: e.to_string(),
                });
            }
        }
    }

    // Output order equals ascending page index
    rendered.sort_by_key(|p| p.page_index);

    if rendered.is_empty() {
        return Err(PdfRetextError::empty_document(format!(
            "all {page_total} pages failed for {}",
            job.images_dir.display()
        )));
    }

    // --- Phase D: assembly ---
    let mut writer = PageWriter::new();
    for page in &rendered {
        writer.add_page(&page.output);
    }
    writer.finish()?;
    writer.save_to_file(&job.output_path)?;

    Ok(JobResult {
        output_path: job.output_path.clone(),
        pages_processed: rendered.len(),
        failed_pages,
    })
}

type PageOutcome = (u32, crate::error::Result<ProcessedPage>);

fn run_pages(
    work: Vec<PageWork>,
    font: &LoadedFont,
    config: &MergedConfig,
) -> crate::error::Result<Vec<PageOutcome>> {
    let process = |mut w: PageWork| -> PageOutcome {
        let result = process_page(w.page_index, &w.image_path, &mut w.blocks, font, config);
        (w.page_index, result)
    };

    if config.parallel_workers > 0 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.parallel_workers)
            .build()
            .map_err(|e| PdfRetextError::config(format!("cannot build worker pool: {e}")))?;
        Ok(pool.install(|| work.into_par_iter().map(process).collect()))
    } else {
        Ok(work.into_par_iter().map(process).collect())
    }
}

/// Discover `page_<n>.png` images in a directory, ascending by page number.
///
/// Page numbers are 1-based; a `page_0.png` is a configuration error.
/// Files that do not match the naming scheme are ignored.
pub fn discover_page_images(dir: &Path) -> crate::error::Result<Vec<(u32, PathBuf)>> {
    let mut pages = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Some(index) = parse_page_file_name(name) else {
            continue;
        };
        if index == 0 {
            return Err(PdfRetextError::config(format!(
                "page numbering is 1-based: {name}"
            )));
        }
        pages.push((index, entry.path()));
    }
    pages.sort_by_key(|(index, _)| *index);
    Ok(pages)
}

fn parse_page_file_name(name: &str) -> Option<u32> {
    let stem = name.strip_prefix("page_")?.strip_suffix(".png")?;
    stem.parse().ok()
}
