//! Description resolution: picks the text shown next to each requirement.
//!
//! The as-built chain is an ordered list of strategies. Each one either
//! yields a non-blank description or passes to the next:
//!
//! 1. `ResolvedGroup`: majority description of the resolved part's records.
//! 2. `AliasExact`: unresolved parts only; majority description of any
//!    installed record whose part number equals an alias candidate.
//! 3. `AliasBasePrefix`: unresolved parts only; majority description of any
//!    installed record whose part number starts with a candidate's base
//!    (text before the first hyphen).
//! 4. `Template`: the BOM template's own description.
//!
//! The nominal mode skips straight to the template text.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::index::InstalledIndex;
use crate::model::{InstalledRecord, MatchResult, Requirement};

/// Which description a report shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionMode {
    /// Derived from installed data, falling back to the template.
    #[default]
    AsBuilt,
    /// Always the template description.
    Nominal,
}

impl DescriptionMode {
    pub fn select<'r>(&self, result: &'r MatchResult) -> &'r str {
        match self {
            Self::AsBuilt => &result.description,
            Self::Nominal => &result.requirement.template_description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionStrategy {
    ResolvedGroup,
    AliasExact,
    AliasBasePrefix,
    Template,
}

impl DescriptionStrategy {
    pub const AS_BUILT: [Self; 4] = [
        Self::ResolvedGroup,
        Self::AliasExact,
        Self::AliasBasePrefix,
        Self::Template,
    ];

    pub const NOMINAL: [Self; 1] = [Self::Template];

    pub fn chain(mode: DescriptionMode) -> &'static [Self] {
        match mode {
            DescriptionMode::AsBuilt => &Self::AS_BUILT,
            DescriptionMode::Nominal => &Self::NOMINAL,
        }
    }

    fn attempt(&self, ctx: &DescribeContext<'_, '_>) -> Option<String> {
        match self {
            Self::ResolvedGroup => {
                let matched = ctx.matched_part_no?;
                majority_description(ctx.index.get(matched).iter().copied())
            }
            Self::AliasExact => {
                // Index keys are the same trimmed part numbers the resolver
                // checks, so after `first_installed` finds nothing this scan
                // finds nothing either. It only fires for contexts whose
                // `matched_part_no` was left unset without consulting the index.
                if ctx.matched_part_no.is_some() {
                    return None;
                }
                majority_description(ctx.index.all().iter().filter(|r| {
                    let pn = r.part_no.trim();
                    ctx.candidates.iter().any(|c| c == pn)
                }))
            }
            Self::AliasBasePrefix => {
                if ctx.matched_part_no.is_some() {
                    return None;
                }
                let bases: Vec<&str> = ctx
                    .candidates
                    .iter()
                    .map(|c| base_part_no(c))
                    .filter(|b| !b.is_empty())
                    .collect();
                if bases.is_empty() {
                    return None;
                }
                majority_description(ctx.index.all().iter().filter(|r| {
                    let pn = r.part_no.trim();
                    bases.iter().any(|b| pn.starts_with(*b))
                }))
            }
            Self::Template => non_blank(&ctx.requirement.template_description),
        }
    }
}

/// Inputs shared by every strategy for one requirement.
pub struct DescribeContext<'i, 'r> {
    pub requirement: &'r Requirement,
    pub candidates: &'r [String],
    pub matched_part_no: Option<&'r str>,
    pub index: &'r InstalledIndex<'i>,
}

/// Run the strategy chain for `mode`. Returns an empty string when every
/// strategy comes up blank.
pub fn resolve_description(ctx: &DescribeContext<'_, '_>, mode: DescriptionMode) -> String {
    for strategy in DescriptionStrategy::chain(mode) {
        if let Some(text) = strategy.attempt(ctx) {
            if *strategy != DescriptionStrategy::ResolvedGroup {
                log::debug!(
                    "{}: description from {:?}",
                    ctx.requirement.primary_part_no,
                    strategy
                );
            }
            return text;
        }
    }
    String::new()
}

/// Most frequent non-blank description. Ties go to the value seen first.
pub fn majority_description<'a, I>(records: I) -> Option<String>
where
    I: IntoIterator<Item = &'a InstalledRecord>,
{
    majority(records.into_iter().map(|r| r.description.as_str()))
}

/// Most frequent non-blank (trimmed) value. Ties go to the value seen first.
pub fn majority<'a, I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let count = counts.entry(value).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for value in order {
        let count = counts[value];
        if best.map_or(true, |(_, n)| count > n) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.to_string())
}

/// Part number up to (not including) the first hyphen.
pub fn base_part_no(part_no: &str) -> &str {
    match part_no.find('-') {
        Some(pos) => &part_no[..pos],
        None => part_no,
    }
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
