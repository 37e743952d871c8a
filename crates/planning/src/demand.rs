//! Cycle demand model: planned quantity as a function of cycle parity.

use serde::{Deserialize, Serialize};

use crate::part::Part;

/// Odd/even position of a cycle, counted from 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleParity {
    Odd,
    Even,
}

impl CycleParity {
    /// Parity of a 0-based cycle slot (slot 0 is cycle 1, which is odd).
    pub fn of_index(cycle_index: usize) -> Self {
        if cycle_index % 2 == 0 {
            CycleParity::Odd
        } else {
            CycleParity::Even
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CycleParity::Odd => "odd",
            CycleParity::Even => "even",
        }
    }
}

/// Planned quantity of `part` for the 0-based `cycle_index`.
///
/// Depends only on the slot's parity and the part's current odd/even fields, never on
/// what was produced in earlier cycles.
pub fn planned_quantity(part: &Part, cycle_index: usize) -> i64 {
    match CycleParity::of_index(cycle_index) {
        CycleParity::Odd => part.odd(),
        CycleParity::Even => part.even(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use vulcplan_inventory::{Bin, BinLedger};

    fn part(odd: i64, even: i64) -> Part {
        Part::seeded("P101", BinLedger::new(vec![Bin::new("L101", "B101", 100)]), odd, even)
    }

    #[test]
    fn first_cycle_is_odd() {
        assert_eq!(CycleParity::of_index(0), CycleParity::Odd);
        assert_eq!(CycleParity::of_index(1), CycleParity::Even);
        assert_eq!(CycleParity::of_index(2), CycleParity::Odd);
    }

    #[test]
    fn planned_quantity_alternates_by_parity() {
        let p = part(10, 12);
        assert_eq!(planned_quantity(&p, 0), 10);
        assert_eq!(planned_quantity(&p, 1), 12);
        assert_eq!(planned_quantity(&p, 8), 10);
        assert_eq!(planned_quantity(&p, 9), 12);
    }

    #[test]
    fn flipping_swaps_which_cycles_get_which_quantity() {
        let mut p = part(10, 12);
        p.flip_parity();
        assert_eq!(planned_quantity(&p, 0), 12);
        assert_eq!(planned_quantity(&p, 1), 10);
        assert_eq!(p.bins().total_stock(), 100);
    }

    proptest! {
        /// Property: production history never influences the planned quantity.
        #[test]
        fn planned_quantity_depends_only_on_parity(
            odd in 0i64..1_000,
            even in 0i64..1_000,
            cycle_index in 0usize..500,
            consumed in 0i64..100,
        ) {
            let fresh = part(odd, even);
            let mut used = part(odd, even);
            used.deduct(consumed);

            let expected = if cycle_index % 2 == 0 { odd } else { even };
            prop_assert_eq!(planned_quantity(&fresh, cycle_index), expected);
            prop_assert_eq!(planned_quantity(&used, cycle_index), expected);
            prop_assert_eq!(
                planned_quantity(&fresh, cycle_index),
                planned_quantity(&fresh, cycle_index + 2)
            );
        }
    }
}
