use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),
    /// Config validation error (blank column mapping, empty name, etc.).
    #[error("config validation error: {0}")]
    ConfigValidation(String),
    /// Missing required column in an input table.
    #[error("{table} table: missing column '{column}'")]
    MissingColumn { table: String, column: String },
    /// The anchor part number has no installed records.
    #[error("anchor part '{part_no}' not found in installed records")]
    AnchorNotFound { part_no: String },
    /// The anchor part is installed but none of its records carry a parent serial.
    #[error("anchor part '{part_no}' has no parent serial values")]
    AnchorWithoutParent { part_no: String },
    /// IO error (file read, CSV decode, etc.).
    #[error("IO error: {0}")]
    Io(String),
}

impl From<csv::Error> for ReconError {
    fn from(e: csv::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<std::io::Error> for ReconError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
