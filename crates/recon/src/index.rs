use std::collections::HashMap;

use crate::model::InstalledRecord;

/// Installed records grouped by trimmed part number.
///
/// Built once per run from the full installed table and only read afterwards.
/// Groups keep the order records appear in the export.
#[derive(Debug)]
pub struct InstalledIndex<'a> {
    records: &'a [InstalledRecord],
    groups: HashMap<String, Vec<&'a InstalledRecord>>,
}

impl<'a> InstalledIndex<'a> {
    pub fn build(records: &'a [InstalledRecord]) -> Self {
        let mut groups: HashMap<String, Vec<&'a InstalledRecord>> = HashMap::new();
        for record in records {
            groups
                .entry(record.part_no.trim().to_string())
                .or_default()
                .push(record);
        }
        Self { records, groups }
    }

    pub fn contains(&self, part_no: &str) -> bool {
        self.groups.contains_key(part_no)
    }

    /// Records for `part_no`, or an empty slice.
    pub fn get(&self, part_no: &str) -> &[&'a InstalledRecord] {
        self.groups.get(part_no).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// The full installed table, in export order.
    pub fn all(&self) -> &'a [InstalledRecord] {
        self.records
    }

    /// Number of distinct part numbers.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
