//! Per-vulcanizer, per-part, per-cycle record of produced quantities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::vulcanizer::Vulcanizer;

/// Produced quantities of one part, one slot per cycle.
///
/// The row references its part by code and keeps the length it was materialized with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionRow {
    part: String,
    values: Vec<i64>,
}

impl ProductionRow {
    pub fn new(part: impl Into<String>, values: Vec<i64>) -> Self {
        Self {
            part: part.into(),
            values,
        }
    }

    fn zeroed(part: &str, cycles: u32) -> Self {
        Self::new(part, vec![0; cycles as usize])
    }

    pub fn part(&self) -> &str {
        &self.part
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Stored quantity, or `None` past the materialized length.
    pub fn get(&self, cycle_index: usize) -> Option<i64> {
        self.values.get(cycle_index).copied()
    }

    /// Stored quantity, 0 past the materialized length.
    pub fn value(&self, cycle_index: usize) -> i64 {
        self.get(cycle_index).unwrap_or(0)
    }

    /// First slot holding exactly 0. A slot set back to 0 counts as open again, even when
    /// later slots already hold values.
    pub fn next_open_cycle(&self) -> Option<usize> {
        self.values.iter().position(|value| *value == 0)
    }

    pub(crate) fn set(&mut self, cycle_index: usize, value: i64) -> bool {
        match self.values.get_mut(cycle_index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

/// Production rows keyed by vulcanizer code.
///
/// Rows for a vulcanizer exist only once something has been written. They are sized
/// against the vulcanizer's cycle count and part list *at that moment* and are never
/// resized afterwards; later cycle or part changes leave them stale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductionLedger {
    by_vulcanizer: BTreeMap<String, Vec<ProductionRow>>,
}

impl ProductionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_materialized(&self, vulc_no: &str) -> bool {
        self.by_vulcanizer.contains_key(vulc_no)
    }

    /// Create one all-zero row per part (length = current cycle count) unless rows already
    /// exist for this vulcanizer. Returns `true` when rows were created.
    pub fn materialize(&mut self, vulcanizer: &Vulcanizer) -> bool {
        if self.is_materialized(vulcanizer.vulc_no()) {
            return false;
        }

        let rows = vulcanizer
            .parts()
            .iter()
            .map(|part| ProductionRow::zeroed(part.part_no(), vulcanizer.cycles()))
            .collect::<Vec<_>>();
        tracing::debug!(
            vulcanizer = vulcanizer.vulc_no(),
            parts = rows.len(),
            cycles = vulcanizer.cycles(),
            "materialized production ledger"
        );
        self.by_vulcanizer.insert(vulcanizer.vulc_no().to_string(), rows);
        true
    }

    pub fn rows(&self, vulc_no: &str) -> Option<&[ProductionRow]> {
        self.by_vulcanizer.get(vulc_no).map(Vec::as_slice)
    }

    pub(crate) fn rows_mut(&mut self, vulc_no: &str) -> Option<&mut Vec<ProductionRow>> {
        self.by_vulcanizer.get_mut(vulc_no)
    }

    /// Row for `part_no`, matched by code (first match wins).
    pub fn row_for_part(&self, vulc_no: &str, part_no: &str) -> Option<&ProductionRow> {
        self.rows(vulc_no)?.iter().find(|row| row.part() == part_no)
    }

    /// Stored quantity at (`part_index`, `cycle_index`); 0 for anything not materialized.
    pub fn read_cell(&self, vulc_no: &str, part_index: usize, cycle_index: usize) -> i64 {
        self.rows(vulc_no)
            .and_then(|rows| rows.get(part_index))
            .map(|row| row.value(cycle_index))
            .unwrap_or(0)
    }
}
