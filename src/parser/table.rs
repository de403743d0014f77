use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::page::squash;
use super::patterns::parse_location;
use crate::record::ExhibitorRecord;

static TABLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());
static ROW_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td, th").unwrap());

/// Every table on the page, rows concatenated in document order.
pub fn extract_tables(doc: &Html) -> Vec<ExhibitorRecord> {
    doc.select(&TABLE_SELECTOR).flat_map(extract_table).collect()
}

/// First cell is the name, second holds the pavilion/stand text.
pub fn extract_table(table: ElementRef) -> Vec<ExhibitorRecord> {
    table
        .select(&ROW_SELECTOR)
        .filter_map(|row| {
            let cells: Vec<ElementRef> = row.select(&CELL_SELECTOR).collect();
            if cells.len() < 2 || cells.iter().all(|c| c.value().name() == "th") {
                return None;
            }
            row_record(&cells[0], &cells[1])
        })
        .collect()
}

fn row_record(name_cell: &ElementRef, location_cell: &ElementRef) -> Option<ExhibitorRecord> {
    let name = squash(name_cell.text());
    if name.is_empty() {
        return None;
    }
    let (pavilion, stand) = parse_location(&squash(location_cell.text()));
    Some(ExhibitorRecord {
        name,
        pavilion,
        stand,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_row_dropped() {
        let doc = Html::parse_document(
            "<table><tr><td>Beta Snacks</td><td>Padiglione 2 - Stand B 5</td></tr>\
             <tr><td></td><td></td></tr></table>",
        );
        let recs = extract_tables(&doc);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].name, "Beta Snacks");
        assert_eq!(recs[0].pavilion, "2");
        assert_eq!(recs[0].stand, "B 5");
    }

    #[test]
    fn header_and_short_rows_skipped() {
        let doc = Html::parse_document(
            "<table><thead><tr><th>Nome</th><th>Posizione</th></tr></thead>\
             <tbody><tr><td>Solo</td></tr>\
             <tr><td>Delta</td><td>Stand C 7</td><td>extra</td></tr></tbody></table>",
        );
        let recs = extract_tables(&doc);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].name, "Delta");
        assert!(recs[0].pavilion.is_empty());
        assert_eq!(recs[0].stand, "C 7");
    }

    #[test]
    fn tables_concatenated_in_order() {
        let doc = Html::parse_document(
            "<table><tr><td>Uno</td><td>Padiglione 1 - Stand A 1</td></tr></table>\
             <p>separator</p>\
             <table><tr><td>Due</td><td>Padiglione 2 - Stand A 2</td></tr></table>",
        );
        let names: Vec<_> = extract_tables(&doc).into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["Uno", "Due"]);
    }
}
