use std::collections::{BTreeSet, HashMap};

use crate::model::{InstalledRecord, TrackingMode};
use crate::numeric::{clamp_count, coerce_number, truncate};

/// Actual quantity and display identifiers for one resolved part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuantityMatch {
    pub qty_actual: u64,
    pub ids: Vec<String>,
}

/// Count installed units of a part according to its tracking mode.
pub fn match_quantity(records: &[&InstalledRecord], tracking: TrackingMode) -> QuantityMatch {
    if records.is_empty() {
        return QuantityMatch::default();
    }
    match tracking {
        TrackingMode::Sn => match_serials(records),
        TrackingMode::Lot => match_lots(records),
    }
}

/// Distinct non-blank serials, sorted.
fn match_serials(records: &[&InstalledRecord]) -> QuantityMatch {
    let serials: BTreeSet<&str> = records
        .iter()
        .map(|r| r.serial.trim())
        .filter(|s| !s.is_empty())
        .collect();

    QuantityMatch {
        qty_actual: serials.len() as u64,
        ids: serials.into_iter().map(String::from).collect(),
    }
}

/// Per-lot quantity sums, lots in first-seen order.
fn match_lots(records: &[&InstalledRecord]) -> QuantityMatch {
    let mut order: Vec<&str> = Vec::new();
    let mut sums: HashMap<&str, f64> = HashMap::new();

    for record in records {
        let lot = record.lot.trim();
        if lot.is_empty() {
            continue;
        }
        let qty = coerce_number(&record.quantity);
        match sums.get_mut(lot) {
            Some(sum) => *sum += qty,
            None => {
                order.push(lot);
                sums.insert(lot, qty);
            }
        }
    }

    let mut total = 0.0;
    let mut ids = Vec::with_capacity(order.len());
    for lot in order {
        let sum = sums[lot];
        total += sum;
        ids.push(format_lot_id(lot, truncate(sum)));
    }

    QuantityMatch {
        qty_actual: clamp_count(total),
        ids,
    }
}

pub fn format_lot_id(lot: &str, qty: i64) -> String {
    format!("{lot} (x{qty})")
}

/// Strip the ` (x<N>)` quantity suffix from a LOT display id.
///
/// Serial ids and anything without the suffix come back unchanged.
pub fn strip_lot_suffix(id: &str) -> &str {
    let Some(body) = id.strip_suffix(')') else {
        return id;
    };
    let Some(pos) = body.rfind(" (x") else {
        return id;
    };
    let digits = &body[pos + 3..];
    let digits = digits.strip_prefix('-').unwrap_or(digits);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        &id[..pos]
    } else {
        id
    }
}
