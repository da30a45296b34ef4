//! Alias table: acceptable alternate identifiers per canonical part number.

use std::collections::{HashMap, HashSet};

/// A primary part number and its deduplicated alternates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasGroup {
    pub primary: String,
    pub alternates: Vec<String>,
}

impl AliasGroup {
    /// Build a group from raw cells. Blank cells are dropped; duplicates
    /// (including repeats of the primary) keep their first position.
    pub fn new<I, S>(primary: &str, alternates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let primary = primary.trim().to_string();
        let mut seen: HashSet<String> = HashSet::from([primary.clone()]);
        let mut deduped = Vec::new();
        for alt in alternates {
            let alt = alt.as_ref().trim();
            if alt.is_empty() || !seen.insert(alt.to_string()) {
                continue;
            }
            deduped.push(alt.to_string());
        }
        Self {
            primary,
            alternates: deduped,
        }
    }

    /// Primary first, then alternates in declared order.
    pub fn candidates(&self) -> Vec<String> {
        std::iter::once(self.primary.clone())
            .chain(self.alternates.iter().cloned())
            .collect()
    }
}

/// Read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    groups: HashMap<String, AliasGroup>,
}

impl AliasTable {
    /// Build from raw rows: first cell is the primary, the rest alternates.
    ///
    /// Rows with a blank primary are skipped. A primary declared on more
    /// than one row keeps the last row.
    pub fn from_rows<R, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = Vec<S>>,
        S: AsRef<str>,
    {
        let mut groups = HashMap::new();
        for row in rows {
            let mut cells = row.iter().map(|c| c.as_ref());
            let Some(primary) = cells.next().map(str::trim) else {
                continue;
            };
            if primary.is_empty() {
                continue;
            }
            let group = AliasGroup::new(primary, cells);
            if groups.insert(group.primary.clone(), group).is_some() {
                log::warn!("alias primary '{primary}' declared more than once; last row wins");
            }
        }
        Self { groups }
    }

    /// Ordered candidate list for `primary`. Element 0 is always `primary`.
    pub fn lookup(&self, primary: &str) -> Vec<String> {
        match self.groups.get(primary) {
            Some(group) => group.candidates(),
            None => vec![primary.to_string()],
        }
    }

    pub fn get(&self, primary: &str) -> Option<&AliasGroup> {
        self.groups.get(primary)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
