use std::collections::BTreeMap;

use serde::Serialize;

use crate::derived::DerivedOutputs;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// How a part is counted on the installed side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrackingMode {
    /// Serialized: one unit per distinct serial.
    Sn,
    /// Batch-tracked: quantities summed per lot.
    Lot,
}

impl TrackingMode {
    /// Case-insensitive `SN` / `LOT`. Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "SN" => Some(Self::Sn),
            "LOT" => Some(Self::Lot),
            _ => None,
        }
    }

    /// Template cells that are blank or unrecognised fall back to `Sn`.
    pub fn parse_or_default(value: &str) -> Self {
        Self::parse(value).unwrap_or(Self::Sn)
    }
}

impl std::fmt::Display for TrackingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sn => write!(f, "SN"),
            Self::Lot => write!(f, "LOT"),
        }
    }
}

/// One BOM line from the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    pub primary_part_no: String,
    pub template_description: String,
    pub qty_required: u64,
    pub tracking: TrackingMode,
}

/// One row of the installed-units export.
///
/// `quantity` is kept as raw text; it is only coerced when a LOT part is
/// counted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledRecord {
    pub part_no: String,
    pub serial: String,
    pub lot: String,
    pub description: String,
    pub quantity: String,
    pub parent_serial: String,
}

/// Everything the engine consumes, already loaded.
pub struct ReconInput {
    pub requirements: Vec<Requirement>,
    pub installed: Vec<InstalledRecord>,
    pub aliases: crate::alias::AliasTable,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Satisfied,
    NotSatisfied,
    NotFound,
    /// Zero-quantity requirement with at least one installed unit.
    Found,
    /// Zero-quantity requirement with nothing installed.
    Missing,
}

impl Status {
    /// Whether the requirement needs no further action.
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Self::Satisfied | Self::Found)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfied => write!(f, "SATISFIED"),
            Self::NotSatisfied => write!(f, "NOT_SATISFIED"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Found => write!(f, "FOUND"),
            Self::Missing => write!(f, "MISSING"),
        }
    }
}

/// Outcome for a single requirement.
///
/// `matched_part_no` is empty when no alias candidate is installed.
/// `description` is the as-built description; reports that want the
/// nominal text read it from `requirement` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub requirement: Requirement,
    pub matched_part_no: String,
    pub qty_actual: u64,
    pub ids: Vec<String>,
    pub description: String,
    pub status: Status,
}

impl MatchResult {
    pub fn is_resolved(&self) -> bool {
        !self.matched_part_no.is_empty()
    }

    /// Never negative.
    pub fn missing_qty(&self) -> u64 {
        self.requirement.qty_required.saturating_sub(self.qty_actual)
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReconSummary {
    pub total_requirements: usize,
    pub evaluated: usize,
    pub skipped: usize,
    pub satisfied: usize,
    pub not_satisfied: usize,
    pub not_found: usize,
    pub found: usize,
    pub missing: usize,
    /// Evaluated lines with no installed alias candidate.
    pub unresolved: usize,
    pub status_counts: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub results: Vec<MatchResult>,
    pub derived: DerivedOutputs,
}

impl ReconResult {
    pub fn to_json(&self) -> Result<String, crate::error::ReconError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::error::ReconError::Io(format!("JSON serialization error: {e}")))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
}
