use std::collections::HashSet;

use crate::record::{Contact, ExhibitorRecord};

/// Trim, drop unidentified records, keep the first of each
/// `(name, pavilion, stand)`. Order is preserved.
pub fn normalize(records: Vec<ExhibitorRecord>) -> Vec<ExhibitorRecord> {
    let mut seen: HashSet<(String, String, String)> = HashSet::new();
    let mut out = Vec::with_capacity(records.len());

    for mut record in records {
        trim_record(&mut record);
        if !record.is_identified() {
            continue;
        }
        let key = (
            record.name.clone(),
            record.pavilion.clone(),
            record.stand.clone(),
        );
        if seen.insert(key) {
            out.push(record);
        }
    }
    out
}

fn trim_record(r: &mut ExhibitorRecord) {
    let Contact {
        address,
        phone,
        email,
        website,
    } = &mut r.contact;
    for field in [
        &mut r.name,
        &mut r.pavilion,
        &mut r.stand,
        &mut r.description,
        address,
        phone,
        email,
        website,
    ] {
        trim_in_place(field);
    }
}

fn trim_in_place(s: &mut String) {
    let trimmed = s.trim();
    if trimmed.len() != s.len() {
        *s = trimmed.to_string();
    }
}
