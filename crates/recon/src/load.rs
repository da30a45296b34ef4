//! CSV loaders for the three input tables.
//!
//! Column lookup happens once per table, before any row is read, so a missing
//! column fails the whole load without producing rows.

use csv::StringRecord;

use crate::alias::AliasTable;
use crate::config::{InstalledColumns, TemplateColumns};
use crate::error::ReconError;
use crate::model::{InstalledRecord, Requirement, TrackingMode};
use crate::numeric::coerce_count;

fn reader(csv_data: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes())
}

fn header_index(headers: &StringRecord, table: &str, column: &str) -> Result<usize, ReconError> {
    headers
        .iter()
        .position(|h| h.trim() == column.trim())
        .ok_or_else(|| ReconError::MissingColumn {
            table: table.into(),
            column: column.into(),
        })
}

/// Physical lines a record occupies, counting newlines inside quoted fields.
fn lines_spanned(record: &StringRecord) -> u64 {
    1 + record
        .iter()
        .map(|field| field.matches('\n').count() as u64)
        .sum::<u64>()
}

fn cell(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("").trim()
}

/// Load the installed-units export.
///
/// Part numbers and identifiers are trimmed; quantity stays raw text.
pub fn load_installed_rows(
    csv_data: &str,
    columns: &InstalledColumns,
) -> Result<Vec<InstalledRecord>, ReconError> {
    let mut reader = reader(csv_data);
    let headers = reader.headers()?.clone();

    let idx = |name: &str| header_index(&headers, "installed", name);
    let part_no_idx = idx(&columns.part_no)?;
    let serial_idx = idx(&columns.serial)?;
    let lot_idx = idx(&columns.lot)?;
    let description_idx = idx(&columns.description)?;
    let quantity_idx = idx(&columns.quantity)?;
    let parent_idx = idx(&columns.parent_serial)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(InstalledRecord {
            part_no: cell(&record, part_no_idx).to_string(),
            serial: cell(&record, serial_idx).to_string(),
            lot: cell(&record, lot_idx).to_string(),
            description: cell(&record, description_idx).to_string(),
            quantity: record.get(quantity_idx).unwrap_or("").to_string(),
            parent_serial: cell(&record, parent_idx).to_string(),
        });
    }

    log::info!("installed records loaded: {}", rows.len());
    Ok(rows)
}

/// Load BOM requirements from the template.
///
/// Reading stops at the first empty line or blank part number. Required
/// quantities are coerced leniently; unrecognised tracking values count as SN.
pub fn load_requirement_rows(
    csv_data: &str,
    columns: &TemplateColumns,
) -> Result<Vec<Requirement>, ReconError> {
    let mut reader = reader(csv_data);
    let headers = reader.headers()?.clone();

    let idx = |name: &str| header_index(&headers, "template", name);
    let part_no_idx = idx(&columns.part_no)?;
    let description_idx = idx(&columns.description)?;
    let qty_idx = idx(&columns.qty)?;
    let tracking_idx = idx(&columns.tracking)?;

    // The reader drops empty lines silently; a jump in start line numbers is
    // the only trace of one.
    let mut next_line = headers.position().map(|p| p.line() + lines_spanned(&headers));

    let mut requirements = Vec::new();
    for record in reader.records() {
        let record = record?;
        let start = record.position().map(|p| p.line());
        if let (Some(expected), Some(line)) = (next_line, start) {
            if line > expected {
                break;
            }
        }
        next_line = start.map(|line| line + lines_spanned(&record));

        let part_no = cell(&record, part_no_idx);
        if part_no.is_empty() {
            break;
        }

        let tracking_cell = cell(&record, tracking_idx);
        let tracking = TrackingMode::parse_or_default(tracking_cell);
        if !tracking_cell.is_empty() && TrackingMode::parse(tracking_cell).is_none() {
            log::warn!("{part_no}: unrecognised tracking mode '{tracking_cell}', using SN");
        }

        requirements.push(Requirement {
            primary_part_no: part_no.to_string(),
            template_description: cell(&record, description_idx).to_string(),
            qty_required: coerce_count(cell(&record, qty_idx)),
            tracking,
        });
    }

    log::info!("total requirements: {}", requirements.len());
    Ok(requirements)
}

/// Load the alias sheet: first column primary, remaining columns alternates.
pub fn load_alias_rows(csv_data: &str) -> Result<AliasTable, ReconError> {
    let mut reader = reader(csv_data);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<String>>());
    }

    let table = AliasTable::from_rows(rows);
    log::info!("alias groups loaded: {}", table.len());
    Ok(table)
}
