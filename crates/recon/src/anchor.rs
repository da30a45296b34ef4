use crate::describe::majority;
use crate::error::ReconError;
use crate::index::InstalledIndex;

/// Derive the run identifier from the anchor part's installed records.
///
/// The identifier is the most frequent non-blank parent serial among records
/// whose part number equals `anchor_part_no` (ties go to the value seen first).
pub fn derive_run_id(anchor_part_no: &str, index: &InstalledIndex<'_>) -> Result<String, ReconError> {
    let anchor_part_no = anchor_part_no.trim();
    let records = index.get(anchor_part_no);
    if records.is_empty() {
        return Err(ReconError::AnchorNotFound {
            part_no: anchor_part_no.into(),
        });
    }

    majority(records.iter().map(|r| r.parent_serial.as_str())).ok_or_else(|| {
        ReconError::AnchorWithoutParent {
            part_no: anchor_part_no.into(),
        }
    })
}
