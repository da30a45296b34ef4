//! Status classification for a single requirement.
//!
//! Requirements with a positive quantity use the three-way status:
//! - NotFound: no alias candidate is installed
//! - Satisfied: actual ≥ required
//! - NotSatisfied: resolved but short
//!
//! Zero-quantity requirements are governed by `ZeroQtyPolicy`. Under
//! `Presence` they get a binary Found / Missing status; under `Skip` they
//! never reach classification.

use crate::config::ZeroQtyPolicy;
use crate::model::Status;

/// Classify one requirement. Returns `None` when the policy drops it.
pub fn classify_status(
    resolved: bool,
    qty_required: u64,
    qty_actual: u64,
    policy: ZeroQtyPolicy,
) -> Option<Status> {
    if qty_required == 0 {
        return match policy {
            ZeroQtyPolicy::Skip => None,
            ZeroQtyPolicy::Presence => Some(if resolved && qty_actual > 0 {
                Status::Found
            } else {
                Status::Missing
            }),
        };
    }

    Some(if !resolved {
        Status::NotFound
    } else if qty_actual >= qty_required {
        Status::Satisfied
    } else {
        Status::NotSatisfied
    })
}
