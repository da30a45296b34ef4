use crate::alias::AliasTable;
use crate::index::InstalledIndex;

/// Find the identifier `required_pn` is actually installed under.
///
/// Candidates are tried in alias order; the first one present in the index
/// wins, even if a later alternate is also installed.
pub fn resolve_part_no(
    required_pn: &str,
    index: &InstalledIndex<'_>,
    aliases: &AliasTable,
) -> Option<String> {
    first_installed(&aliases.lookup(required_pn), index)
}

/// First of an already looked-up candidate list that is in the index.
pub fn first_installed(candidates: &[String], index: &InstalledIndex<'_>) -> Option<String> {
    candidates
        .iter()
        .find(|candidate| index.contains(candidate))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InstalledRecord;

    fn rec(pn: &str) -> InstalledRecord {
        InstalledRecord {
            part_no: pn.into(),
            ..Default::default()
        }
    }

    fn aliases() -> AliasTable {
        AliasTable::from_rows(vec![vec!["P", "P-REV-B", "P-REV-C"]])
    }

    #[test]
    fn primary_installed() {
        let records = vec![rec("P"), rec("P-REV-C")];
        let index = InstalledIndex::build(&records);
        assert_eq!(resolve_part_no("P", &index, &aliases()).as_deref(), Some("P"));
    }

    #[test]
    fn earlier_alternate_wins_tie() {
        let records = vec![rec("P-REV-C"), rec("P-REV-B")];
        let index = InstalledIndex::build(&records);
        assert_eq!(
            resolve_part_no("P", &index, &aliases()).as_deref(),
            Some("P-REV-B")
        );
    }

    #[test]
    fn first_installed_keeps_candidate_order() {
        let records = vec![rec("C"), rec("B")];
        let index = InstalledIndex::build(&records);
        let candidates: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        assert_eq!(first_installed(&candidates, &index).as_deref(), Some("B"));
        assert_eq!(first_installed(&[], &index), None);
    }

    #[test]
    fn nothing_installed() {
        let records = vec![rec("OTHER")];
        let index = InstalledIndex::build(&records);
        assert_eq!(resolve_part_no("P", &index, &aliases()), None);
        assert_eq!(resolve_part_no("Q", &index, &AliasTable::default()), None);
    }
}
