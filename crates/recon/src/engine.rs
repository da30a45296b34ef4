use crate::alias::AliasTable;
use crate::anchor::derive_run_id;
use crate::classify::classify_status;
use crate::config::{ReconConfig, ZeroQtyPolicy};
use crate::derived::build_derived;
use crate::describe::{resolve_description, DescribeContext, DescriptionMode};
use crate::error::ReconError;
use crate::evidence::compute_summary;
use crate::index::InstalledIndex;
use crate::matcher::{match_quantity, QuantityMatch};
use crate::model::{MatchResult, ReconInput, ReconMeta, ReconResult, Requirement};
use crate::resolve::first_installed;

/// Run reconciliation per config. Returns per-requirement results, summary
/// and derived reports.
///
/// Fails before producing anything if the anchor lookup fails.
pub fn run(config: &ReconConfig, input: &ReconInput) -> Result<ReconResult, ReconError> {
    let index = InstalledIndex::build(&input.installed);
    log::info!("unique part numbers installed: {}", index.len());

    let run_id = match config.anchor {
        Some(ref anchor) => Some(derive_run_id(&anchor.part_no, &index)?),
        None => None,
    };

    let results = reconcile(
        &input.requirements,
        &index,
        &input.aliases,
        config.zero_qty_policy,
    );

    let summary = compute_summary(input.requirements.len(), &results);
    log::info!(
        "reconciled {} of {} requirements: {} satisfied, {} not satisfied, {} not found",
        summary.evaluated,
        summary.total_requirements,
        summary.satisfied,
        summary.not_satisfied,
        summary.not_found,
    );

    let derived = build_derived(&results, &config.reports);

    Ok(ReconResult {
        meta: ReconMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            run_id,
        },
        summary,
        results,
        derived,
    })
}

/// Reconcile every requirement, in order.
///
/// Deterministic for fixed inputs. Under `ZeroQtyPolicy::Skip` zero-quantity
/// requirements are left out of the output.
pub fn reconcile(
    requirements: &[Requirement],
    index: &InstalledIndex<'_>,
    aliases: &AliasTable,
    policy: ZeroQtyPolicy,
) -> Vec<MatchResult> {
    requirements
        .iter()
        .filter_map(|req| reconcile_one(req, index, aliases, policy))
        .collect()
}

fn reconcile_one(
    req: &Requirement,
    index: &InstalledIndex<'_>,
    aliases: &AliasTable,
    policy: ZeroQtyPolicy,
) -> Option<MatchResult> {
    if req.qty_required == 0 && policy == ZeroQtyPolicy::Skip {
        log::debug!("{}: zero quantity required, skipped", req.primary_part_no);
        return None;
    }

    let candidates = aliases.lookup(&req.primary_part_no);
    let matched = first_installed(&candidates, index);

    let quantity = match matched {
        Some(ref pn) => match_quantity(index.get(pn), req.tracking),
        None => {
            log::debug!(
                "{}: not installed under any of {:?}",
                req.primary_part_no,
                candidates
            );
            QuantityMatch::default()
        }
    };

    let status = classify_status(matched.is_some(), req.qty_required, quantity.qty_actual, policy)?;

    let ctx = DescribeContext {
        requirement: req,
        candidates: &candidates,
        matched_part_no: matched.as_deref(),
        index,
    };
    let description = resolve_description(&ctx, DescriptionMode::AsBuilt);

    Some(MatchResult {
        requirement: req.clone(),
        matched_part_no: matched.unwrap_or_default(),
        qty_actual: quantity.qty_actual,
        ids: quantity.ids,
        description,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InstalledRecord, Status, TrackingMode};

    fn sn_rec(pn: &str, serial: &str, desc: &str) -> InstalledRecord {
        InstalledRecord {
            part_no: pn.into(),
            serial: serial.into(),
            description: desc.into(),
            parent_serial: "UNIT-1".into(),
            ..Default::default()
        }
    }

    fn lot_rec(pn: &str, lot: &str, qty: &str) -> InstalledRecord {
        InstalledRecord {
            part_no: pn.into(),
            lot: lot.into(),
            quantity: qty.into(),
            description: "Washer".into(),
            ..Default::default()
        }
    }

    fn req(pn: &str, qty: u64, tracking: TrackingMode) -> Requirement {
        Requirement {
            primary_part_no: pn.into(),
            template_description: format!("{pn} nominal"),
            qty_required: qty,
            tracking,
        }
    }

    fn input() -> ReconInput {
        ReconInput {
            requirements: vec![
                req("PUMP", 2, TrackingMode::Sn),
                req("VALVE", 2, TrackingMode::Sn),
                req("WASHER", 10, TrackingMode::Lot),
                req("GHOST-01", 1, TrackingMode::Sn),
                req("LABEL", 0, TrackingMode::Sn),
            ],
            installed: vec![
                sn_rec("PUMP", "P1", "Pump"),
                sn_rec("PUMP", "P2", "Pump"),
                sn_rec("VALVE-B", "V1", "Valve rev B"),
                lot_rec("WASHER", "L1", "4"),
                lot_rec("WASHER", "L2", "4.5"),
                sn_rec("GHOST-99", "G1", "Ghost family"),
            ],
            aliases: AliasTable::from_rows(vec![vec!["VALVE", "VALVE-A", "VALVE-B"]]),
        }
    }

    #[test]
    fn reconcile_statuses_in_order() {
        let input = input();
        let index = InstalledIndex::build(&input.installed);
        let results = reconcile(
            &input.requirements,
            &index,
            &input.aliases,
            ZeroQtyPolicy::Presence,
        );

        let statuses: Vec<Status> = results.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                Status::Satisfied,
                Status::NotSatisfied,
                Status::NotSatisfied,
                Status::NotFound,
                Status::Missing,
            ]
        );

        assert_eq!(results[1].matched_part_no, "VALVE-B");
        assert_eq!(results[1].ids, vec!["V1"]);
        assert_eq!(results[1].description, "Valve rev B");

        assert_eq!(results[2].qty_actual, 8);
        assert_eq!(results[2].ids, vec!["L1 (x4)", "L2 (x4)"]);

        let ghost = &results[3];
        assert_eq!(ghost.matched_part_no, "");
        assert_eq!(ghost.qty_actual, 0);
        assert!(ghost.ids.is_empty());
        // Base-prefix fallback: "GHOST-99" starts with "GHOST".
        assert_eq!(ghost.description, "Ghost family");

        assert_eq!(results[4].description, "LABEL nominal");
    }

    #[test]
    fn skip_policy_drops_zero_quantity() {
        let input = input();
        let index = InstalledIndex::build(&input.installed);
        let results = reconcile(&input.requirements, &index, &input.aliases, ZeroQtyPolicy::Skip);
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.requirement.qty_required > 0));
    }

    #[test]
    fn rerun_is_identical() {
        let input = input();
        let index = InstalledIndex::build(&input.installed);
        let a = reconcile(&input.requirements, &index, &input.aliases, ZeroQtyPolicy::Presence);
        let b = reconcile(&input.requirements, &index, &input.aliases, ZeroQtyPolicy::Presence);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn run_with_anchor() {
        let mut config = ReconConfig::named("engine test");
        config.anchor = Some(crate::config::AnchorConfig {
            part_no: "PUMP".into(),
        });
        let result = run(&config, &input()).unwrap();
        assert_eq!(result.meta.run_id.as_deref(), Some("UNIT-1"));
        assert_eq!(result.meta.config_name, "engine test");
        assert_eq!(result.results.len(), 5);
        assert_eq!(result.summary.satisfied, 1);
    }

    #[test]
    fn run_fails_on_missing_anchor() {
        let mut config = ReconConfig::named("engine test");
        config.anchor = Some(crate::config::AnchorConfig {
            part_no: "NOT-THERE".into(),
        });
        let err = run(&config, &input()).unwrap_err();
        assert!(matches!(err, ReconError::AnchorNotFound { .. }));
    }
}
