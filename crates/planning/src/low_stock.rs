//! Low-stock evaluation for the active vulcanizer.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::part::Part;
use crate::vulcanizer::Vulcanizer;

/// Part codes whose stock undershoots the minimum-cycles threshold.
///
/// Derived state: recomputed after every mutation, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LowStockSet {
    parts: BTreeSet<String>,
}

impl LowStockSet {
    pub fn contains(&self, part_no: &str) -> bool {
        self.parts.contains(part_no)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(String::as_str)
    }
}

impl FromIterator<String> for LowStockSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            parts: iter.into_iter().collect(),
        }
    }
}

/// Stock a part must hold to cover `min_cycles_required` cycles.
///
/// Demand is counted in odd+even pairs: `(odd + even) * ceil(min_cycles_required / 2)`,
/// or 0 when no cycles are required. The pairing over-counts odd minimums on purpose.
/// Saturates at `i64::MAX` rather than overflowing.
pub fn min_required(part: &Part, min_cycles_required: u32) -> i64 {
    if min_cycles_required == 0 {
        return 0;
    }
    let demand_per_pair = part.odd().saturating_add(part.even());
    demand_per_pair.saturating_mul(i64::from(min_cycles_required.div_ceil(2)))
}

/// Flag every part of `vulcanizer` whose total stock is below [`min_required`].
pub fn evaluate(vulcanizer: &Vulcanizer, min_cycles_required: u32) -> LowStockSet {
    vulcanizer
        .parts()
        .iter()
        .filter(|part| part.total_stock() < min_required(part, min_cycles_required))
        .map(|part| part.part_no().to_string())
        .collect()
}
