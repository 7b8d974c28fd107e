//! Tabular output collaborator: CSV with the fixed picking-list columns
//! `[Product Name, Variant, SKU, Quantity]`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::ExtractError;
use crate::parser::OrderRecord;

pub fn write_csv<W: Write>(records: &[OrderRecord], out: W) -> Result<(), ExtractError> {
    let mut wtr = csv::Writer::from_writer(out);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv_file(records: &[OrderRecord], path: &Path) -> Result<(), ExtractError> {
    let file = File::create(path)?;
    write_csv(records, file)
}

// ── Tests ──
