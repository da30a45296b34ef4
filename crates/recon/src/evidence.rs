use std::collections::BTreeMap;

use crate::model::{MatchResult, ReconSummary, Status};

/// Compute summary statistics from reconciled results.
///
/// `total_requirements` is the template line count, so skipped lines show up
/// as the difference to `evaluated`.
pub fn compute_summary(total_requirements: usize, results: &[MatchResult]) -> ReconSummary {
    let mut status_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut satisfied = 0;
    let mut not_satisfied = 0;
    let mut not_found = 0;
    let mut found = 0;
    let mut missing = 0;
    let mut unresolved = 0;

    for r in results {
        if !r.is_resolved() {
            unresolved += 1;
        }

        *status_counts.entry(r.status.to_string()).or_insert(0) += 1;

        match r.status {
            Status::Satisfied => satisfied += 1,
            Status::NotSatisfied => not_satisfied += 1,
            Status::NotFound => not_found += 1,
            Status::Found => found += 1,
            Status::Missing => missing += 1,
        }
    }

    ReconSummary {
        total_requirements,
        evaluated: results.len(),
        skipped: total_requirements.saturating_sub(results.len()),
        satisfied,
        not_satisfied,
        not_found,
        found,
        missing,
        unresolved,
        status_counts,
    }
}
