//! Derived dataset builders: report tables layered on top of match results.

use serde::Serialize;

use crate::config::ReportConfig;
use crate::describe::DescriptionMode;
use crate::error::ReconError;
use crate::matcher::strip_lot_suffix;
use crate::model::{MatchResult, Status, TrackingMode};

/// A named, versioned table of report rows.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedDataset<R> {
    pub schema: String,
    pub version: u32,
    pub rows: Vec<R>,
}

impl<R: Serialize> DerivedDataset<R> {
    pub fn new(schema: &str) -> Self {
        Self {
            schema: schema.to_string(),
            version: 1,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as CSV text with a header line.
    pub fn to_csv(&self) -> Result<String, ReconError> {
        let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
        for row in &self.rows {
            writer.serialize(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| ReconError::Io(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| ReconError::Io(e.to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DerivedOutputs {
    pub results: DerivedDataset<ResultRow>,
    pub intake: DerivedDataset<IntakeRow>,
    pub shortfall: DerivedDataset<ShortfallRow>,
}

/// Full result table row. `ids` are newline-separated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub primary_part_no: String,
    pub matched_part_no: String,
    pub description: String,
    pub tracking: TrackingMode,
    pub qty_required: u64,
    pub qty_actual: u64,
    pub ids: String,
    pub status: Status,
}

/// One installed identifier to book in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntakeRow {
    pub primary_part_no: String,
    pub matched_part_no: String,
    pub identifier: String,
    pub tracking: TrackingMode,
    pub description: String,
}

/// A requirement that still needs parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortfallRow {
    pub primary_part_no: String,
    pub matched_part_no: String,
    pub description: String,
    pub tracking: TrackingMode,
    pub qty_required: u64,
    pub qty_actual: u64,
    pub missing_qty: u64,
    pub status: Status,
}

pub fn build_derived(results: &[MatchResult], reports: &ReportConfig) -> DerivedOutputs {
    DerivedOutputs {
        results: build_result_table(results, reports.results),
        intake: build_intake(results, reports.intake),
        shortfall: build_shortfall(results, reports.shortfall),
    }
}

/// Build the `results.v1` dataset: one row per result.
pub fn build_result_table(results: &[MatchResult], mode: DescriptionMode) -> DerivedDataset<ResultRow> {
    let mut dataset = DerivedDataset::new("results");
    dataset.rows = results
        .iter()
        .map(|r| ResultRow {
            primary_part_no: r.requirement.primary_part_no.clone(),
            matched_part_no: r.matched_part_no.clone(),
            description: mode.select(r).to_string(),
            tracking: r.requirement.tracking,
            qty_required: r.requirement.qty_required,
            qty_actual: r.qty_actual,
            ids: r.ids.join("\n"),
            status: r.status,
        })
        .collect();
    dataset
}

/// Build the `intake.v1` dataset: one row per installed identifier.
///
/// Unresolved results contribute nothing. LOT ids lose their ` (xN)` suffix.
pub fn build_intake(results: &[MatchResult], mode: DescriptionMode) -> DerivedDataset<IntakeRow> {
    let mut dataset = DerivedDataset::new("intake");
    for r in results {
        if r.status == Status::NotFound || !r.is_resolved() {
            continue;
        }
        for id in &r.ids {
            let identifier = match r.requirement.tracking {
                TrackingMode::Lot => strip_lot_suffix(id),
                TrackingMode::Sn => id.as_str(),
            };
            dataset.rows.push(IntakeRow {
                primary_part_no: r.requirement.primary_part_no.clone(),
                matched_part_no: r.matched_part_no.clone(),
                identifier: identifier.to_string(),
                tracking: r.requirement.tracking,
                description: mode.select(r).to_string(),
            });
        }
    }
    dataset
}

/// Build the `shortfall.v1` dataset: one row per unfulfilled result.
pub fn build_shortfall(results: &[MatchResult], mode: DescriptionMode) -> DerivedDataset<ShortfallRow> {
    let mut dataset = DerivedDataset::new("shortfall");
    dataset.rows = results
        .iter()
        .filter(|r| !r.status.is_fulfilled())
        .map(|r| ShortfallRow {
            primary_part_no: r.requirement.primary_part_no.clone(),
            matched_part_no: r.matched_part_no.clone(),
            description: mode.select(r).to_string(),
            tracking: r.requirement.tracking,
            qty_required: r.requirement.qty_required,
            qty_actual: r.qty_actual,
            missing_qty: r.missing_qty(),
            status: r.status,
        })
        .collect();
    dataset
}
