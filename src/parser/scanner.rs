use std::iter::Peekable;

use super::patterns::{is_marker, parse_marker};
use crate::record::{ExhibitorRecord, ExhibitorType};

/// Records reconstructed from free page text.
#[derive(Debug, Default)]
pub struct Scan {
    pub records: Vec<ExhibitorRecord>,
    /// How many records were opened by a pavilion/stand marker line.
    pub markers: usize,
}

enum State {
    Idle,
    Accumulating(ExhibitorRecord),
}

/// Walk non-empty trimmed lines with a single forward cursor and one line of
/// lookahead. Lines before the first marker fold into one unanchored record.
pub fn scan(text: &str) -> Scan {
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .peekable();
    let mut out = Scan::default();
    let mut state = State::Idle;

    while let Some(line) = lines.next() {
        if let Some(marker) = parse_marker(line) {
            if let State::Accumulating(done) = state {
                out.records.push(done);
            }
            let mut record = ExhibitorRecord::at(marker.pavilion, marker.stand);
            take_header(&mut lines, &mut record);
            out.markers += 1;
            state = State::Accumulating(record);
            continue;
        }

        if let State::Idle = state {
            state = State::Accumulating(ExhibitorRecord::default());
        }
        if let State::Accumulating(record) = &mut state {
            absorb(record, line);
        }
    }

    if let State::Accumulating(done) = state {
        out.records.push(done);
    }
    out
}

pub fn scan_records(text: &str) -> Vec<ExhibitorRecord> {
    scan(text).records
}

/// Line right after a marker: a type keyword, or else the name unless it is
/// itself a marker. Only consumed lines advance the cursor.
fn take_header<'a, I>(lines: &mut Peekable<I>, record: &mut ExhibitorRecord)
where
    I: Iterator<Item = &'a str>,
{
    let Some(next) = lines.peek().copied() else {
        return;
    };
    if let Some(kind) = ExhibitorType::from_keyword(next) {
        record.kind = kind;
        lines.next();
    } else if !is_marker(next) {
        record.name = next.to_string();
        lines.next();
    }
}

fn absorb(record: &mut ExhibitorRecord, line: &str) {
    if let Some(kind) = ExhibitorType::from_keyword(line) {
        record.kind = kind;
    } else if record.name.is_empty() {
        record.name = line.to_string();
    } else {
        record.push_description(line);
    }
}
