pub mod classify;
pub mod detail;
pub mod normalize;
pub mod page;
pub mod patterns;
pub mod scanner;
pub mod strategy;
pub mod structured;
pub mod table;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::record::ExhibitorRecord;
pub use page::Page;
pub use strategy::{Coordinator, Extraction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Html,
    Text,
}

/// Raw content of one fetched listing page.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub source: String,
    pub kind: PageKind,
    pub content: String,
}

/// Strategy cascade for a single page. Records are not yet normalized.
pub fn process_page(
    coordinator: &Coordinator,
    content: &str,
    kind: PageKind,
) -> Result<Extraction, EngineError> {
    let page = match kind {
        PageKind::Html => Page::html(content)?,
        PageKind::Text => Page::text(content)?,
    };
    Ok(coordinator.extract(&page))
}

/// Extract every page in parallel, concatenate in page order, then normalize.
pub fn process_pages(coordinator: &Coordinator, pages: &[RawPage]) -> Vec<ExhibitorRecord> {
    let per_page: Vec<Vec<ExhibitorRecord>> = pages
        .par_iter()
        .map(|p| match process_page(coordinator, &p.content, p.kind) {
            Ok(extraction) => {
                match extraction.strategy {
                    Some(name) => debug!(
                        source = %p.source,
                        strategy = name,
                        records = extraction.records.len(),
                        "page extracted"
                    ),
                    None => warn!(source = %p.source, "no data on this page"),
                }
                extraction.records
            }
            Err(e) => {
                warn!(source = %p.source, error = %e, "skipping page");
                Vec::new()
            }
        })
        .collect();

    normalize::normalize(per_page.into_iter().flatten().collect())
}
