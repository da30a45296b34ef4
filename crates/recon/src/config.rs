use std::path::Path;

use serde::Deserialize;

use crate::describe::DescriptionMode;
use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ReconConfig {
    pub name: String,
    #[serde(default)]
    pub zero_qty_policy: ZeroQtyPolicy,
    #[serde(default)]
    pub installed: InstalledColumns,
    #[serde(default)]
    pub template: TemplateColumns,
    #[serde(default)]
    pub anchor: Option<AnchorConfig>,
    #[serde(default)]
    pub reports: ReportConfig,
}

/// What to do with BOM lines whose required quantity is zero.
///
/// Applies to every requirement in the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroQtyPolicy {
    /// Evaluate with binary FOUND / MISSING status.
    #[default]
    Presence,
    /// Drop the line; it produces no result.
    Skip,
}

impl std::fmt::Display for ZeroQtyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Presence => write!(f, "presence"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

// ---------------------------------------------------------------------------
// Column mappings
// ---------------------------------------------------------------------------

/// Header names in the installed-units export.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InstalledColumns {
    pub part_no: String,
    pub serial: String,
    pub lot: String,
    pub description: String,
    pub quantity: String,
    pub parent_serial: String,
}

impl Default for InstalledColumns {
    fn default() -> Self {
        Self {
            part_no: "ProductNo".into(),
            serial: "Serial #".into(),
            lot: "Lot #".into(),
            description: "Component Description".into(),
            quantity: "Qty".into(),
            parent_serial: "Parent Serial #".into(),
        }
    }
}

impl InstalledColumns {
    fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("part_no", self.part_no.as_str()),
            ("serial", self.serial.as_str()),
            ("lot", self.lot.as_str()),
            ("description", self.description.as_str()),
            ("quantity", self.quantity.as_str()),
            ("parent_serial", self.parent_serial.as_str()),
        ]
    }
}

/// Header names in the BOM template.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TemplateColumns {
    pub part_no: String,
    pub description: String,
    pub qty: String,
    pub tracking: String,
}

impl Default for TemplateColumns {
    fn default() -> Self {
        Self {
            part_no: "PartNo".into(),
            description: "Description".into(),
            qty: "Qty".into(),
            tracking: "SN/LOT".into(),
        }
    }
}

impl TemplateColumns {
    fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("part_no", self.part_no.as_str()),
            ("description", self.description.as_str()),
            ("qty", self.qty.as_str()),
            ("tracking", self.tracking.as_str()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Anchor + Reports
// ---------------------------------------------------------------------------

/// Part whose installed records name the unit being reconciled.
#[derive(Debug, Clone, Deserialize)]
pub struct AnchorConfig {
    pub part_no: String,
}

/// Description mode per report.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub results: DescriptionMode,
    pub intake: DescriptionMode,
    pub shortfall: DescriptionMode,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            results: DescriptionMode::AsBuilt,
            intake: DescriptionMode::AsBuilt,
            shortfall: DescriptionMode::Nominal,
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    /// Config with default column names and policies.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            zero_qty_policy: ZeroQtyPolicy::default(),
            installed: InstalledColumns::default(),
            template: TemplateColumns::default(),
            anchor: None,
            reports: ReportConfig::default(),
        }
    }

    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ReconError> {
        let input = std::fs::read_to_string(path)
            .map_err(|e| ReconError::Io(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&input)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.name.trim().is_empty() {
            return Err(ReconError::ConfigValidation("name must not be empty".into()));
        }

        let installed = self.installed.fields().map(|(k, v)| ("installed", k, v));
        let template = self.template.fields().map(|(k, v)| ("template", k, v));
        for (section, key, column) in installed.into_iter().chain(template) {
            if column.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "[{section}] {key} must name a column"
                )));
            }
        }

        if let Some(ref anchor) = self.anchor {
            if anchor.part_no.trim().is_empty() {
                return Err(ReconError::ConfigValidation(
                    "[anchor] part_no must not be empty".into(),
                ));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
name = "Unit 44807"
zero_qty_policy = "skip"

[installed]
part_no       = "PN"
serial        = "SN"
lot           = "LOT"
description   = "DESC"
quantity      = "QTY"
parent_serial = "PARENT"

[template]
part_no     = "Part"
description = "Desc"
qty         = "Required"
tracking    = "Mode"

[anchor]
part_no = "100-0001"

[reports]
results   = "nominal"
intake    = "as_built"
shortfall = "as_built"
"#;

    #[test]
    fn parse_full() {
        let config = ReconConfig::from_toml(FULL).unwrap();
        assert_eq!(config.name, "Unit 44807");
        assert_eq!(config.zero_qty_policy, ZeroQtyPolicy::Skip);
        assert_eq!(config.installed.part_no, "PN");
        assert_eq!(config.installed.parent_serial, "PARENT");
        assert_eq!(config.template.tracking, "Mode");
        assert_eq!(config.anchor.as_ref().unwrap().part_no, "100-0001");
        assert_eq!(config.reports.results, DescriptionMode::Nominal);
        assert_eq!(config.reports.shortfall, DescriptionMode::AsBuilt);
    }

    #[test]
    fn parse_minimal_uses_defaults() {
        let config = ReconConfig::from_toml(r#"name = "Minimal""#).unwrap();
        assert_eq!(config.zero_qty_policy, ZeroQtyPolicy::Presence);
        assert_eq!(config.installed.part_no, "ProductNo");
        assert_eq!(config.installed.serial, "Serial #");
        assert_eq!(config.template.qty, "Qty");
        assert!(config.anchor.is_none());
        assert_eq!(config.reports.results, DescriptionMode::AsBuilt);
        assert_eq!(config.reports.shortfall, DescriptionMode::Nominal);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let input = r#"
name = "Partial"
[installed]
quantity = "Menge"
"#;
        let config = ReconConfig::from_toml(input).unwrap();
        assert_eq!(config.installed.quantity, "Menge");
        assert_eq!(config.installed.lot, "Lot #");
    }

    #[test]
    fn reject_unknown_policy() {
        let input = r#"
name = "Bad"
zero_qty_policy = "ignore"
"#;
        let err = ReconConfig::from_toml(input).unwrap_err();
        assert!(matches!(err, ReconError::ConfigParse(_)));
    }

    #[test]
    fn reject_blank_column() {
        let input = r#"
name = "Bad"
[template]
qty = "  "
"#;
        let err = ReconConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("[template] qty"));
    }

    #[test]
    fn reject_blank_anchor() {
        let input = r#"
name = "Bad"
[anchor]
part_no = ""
"#;
        let err = ReconConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("anchor"));
    }

    #[test]
    fn reject_empty_name() {
        let err = ReconConfig::from_toml(r#"name = """#).unwrap_err();
        assert!(err.to_string().contains("name must not be empty"));
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unit.recon.toml");
        std::fs::write(&path, FULL).unwrap();
        let config = ReconConfig::from_file(&path).unwrap();
        assert_eq!(config.name, "Unit 44807");

        let missing = ReconConfig::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(missing, ReconError::Io(_)));
    }
}
