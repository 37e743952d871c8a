use serde::{Deserialize, Serialize};

use vulcplan_inventory::BinLedger;

use crate::demand;

/// A consumable item required by a vulcanizer's cycles, stocked across bins.
///
/// `odd`/`even` are the planned quantities for odd- and even-numbered cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    part_no: String,
    bins: BinLedger,
    odd: i64,
    even: i64,
}

impl Part {
    /// A part created from the planning surface: no bins, no planned demand.
    pub fn new(part_no: impl Into<String>) -> Self {
        Self::seeded(part_no, BinLedger::default(), 0, 0)
    }

    /// A part loaded with its bins (bins only ever come from seeding/loading).
    pub fn seeded(part_no: impl Into<String>, bins: BinLedger, odd: i64, even: i64) -> Self {
        Self {
            part_no: part_no.into(),
            bins,
            odd,
            even,
        }
    }

    pub fn part_no(&self) -> &str {
        &self.part_no
    }

    pub fn bins(&self) -> &BinLedger {
        &self.bins
    }

    pub fn odd(&self) -> i64 {
        self.odd
    }

    pub fn even(&self) -> i64 {
        self.even
    }

    pub fn total_stock(&self) -> i64 {
        self.bins.total_stock()
    }

    /// FIFO deduction from this part's bins; see [`BinLedger::deduct`].
    pub fn deduct(&mut self, quantity: i64) -> bool {
        self.bins.deduct(quantity)
    }

    pub fn planned_quantity(&self, cycle_index: usize) -> i64 {
        demand::planned_quantity(self, cycle_index)
    }

    pub fn flip_parity(&mut self) {
        std::mem::swap(&mut self.odd, &mut self.even);
    }

    pub(crate) fn set_part_no(&mut self, part_no: String) {
        self.part_no = part_no;
    }

    pub(crate) fn set_odd(&mut self, odd: i64) {
        self.odd = odd;
    }

    pub(crate) fn set_even(&mut self, even: i64) {
        self.even = even;
    }
}
