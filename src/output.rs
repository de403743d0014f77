use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::record::{DetailRecord, ExhibitorRecord};

pub const DETAIL_COLUMNS: [&str; 6] = ["Name", "Link", "Address", "Phone", "Email", "Website"];
pub const LISTING_COLUMNS: [&str; 9] = [
    "Name",
    "Pavilion",
    "Stand",
    "Type",
    "Description",
    "Address",
    "Phone",
    "Email",
    "Website",
];

#[derive(Debug, Serialize)]
pub struct Envelope<'a> {
    pub exhibitors: &'a [ExhibitorRecord],
    pub scraped_at: DateTime<Utc>,
    pub total_exhibitors: usize,
}

impl<'a> Envelope<'a> {
    pub fn new(exhibitors: &'a [ExhibitorRecord]) -> Self {
        Self {
            exhibitors,
            scraped_at: Utc::now(),
            total_exhibitors: exhibitors.len(),
        }
    }
}

pub fn write_json<W: Write>(writer: W, records: &[ExhibitorRecord]) -> Result<()> {
    serde_json::to_writer_pretty(writer, &Envelope::new(records))?;
    Ok(())
}

/// Listing + detail flow.
pub fn write_csv<W: Write>(writer: W, rows: &[DetailRecord]) -> Result<()> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(DETAIL_COLUMNS)?;
    for r in rows {
        let c = &r.contact;
        w.write_record([
            &r.name, &r.link, &c.address, &c.phone, &c.email, &c.website,
        ])?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_csv_exhibitors<W: Write>(writer: W, records: &[ExhibitorRecord]) -> Result<()> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(LISTING_COLUMNS)?;
    for r in records {
        let c = &r.contact;
        w.write_record([
            r.name.as_str(),
            r.pavilion.as_str(),
            r.stand.as_str(),
            r.kind.label(),
            r.description.as_str(),
            c.address.as_str(),
            c.phone.as_str(),
            c.email.as_str(),
            c.website.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
