use tracing::debug;

use super::page::Page;
use super::{scanner, structured, table};
use crate::record::ExhibitorRecord;

/// One way of turning a page into exhibitor records.
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;
    /// Empty when the page does not have the shape this strategy reads.
    fn extract(&self, page: &Page) -> Vec<ExhibitorRecord>;
}

pub struct StructuredStrategy;

impl Strategy for StructuredStrategy {
    fn name(&self) -> &'static str {
        "structured"
    }

    fn extract(&self, page: &Page) -> Vec<ExhibitorRecord> {
        page.document()
            .map(structured::extract_structured)
            .unwrap_or_default()
    }
}

pub struct PatternStrategy;

impl Strategy for PatternStrategy {
    fn name(&self) -> &'static str {
        "pattern"
    }

    /// Needs at least one pavilion/stand marker; marker-free text is left to
    /// the strategies after this one.
    fn extract(&self, page: &Page) -> Vec<ExhibitorRecord> {
        let scan = scanner::scan(&page.visible_text());
        if scan.markers == 0 {
            return Vec::new();
        }
        scan.records
    }
}

pub struct TableStrategy;

impl Strategy for TableStrategy {
    fn name(&self) -> &'static str {
        "table"
    }

    fn extract(&self, page: &Page) -> Vec<ExhibitorRecord> {
        page.document().map(table::extract_tables).unwrap_or_default()
    }
}

/// Records from the first productive strategy.
#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<ExhibitorRecord>,
    /// `None` when no strategy found anything on the page.
    pub strategy: Option<&'static str>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub struct Coordinator {
    strategies: Vec<Box<dyn Strategy>>,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(vec![
            Box::new(StructuredStrategy),
            Box::new(PatternStrategy),
            Box::new(TableStrategy),
        ])
    }
}

impl Coordinator {
    pub fn new(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self { strategies }
    }

    pub fn extract(&self, page: &Page) -> Extraction {
        for strategy in &self.strategies {
            let records = strategy.extract(page);
            debug!(strategy = strategy.name(), records = records.len(), "strategy attempted");
            if !records.is_empty() {
                return Extraction {
                    records,
                    strategy: Some(strategy.name()),
                };
            }
        }
        Extraction::default()
    }
}
