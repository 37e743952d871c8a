//! Cycle-wise read model of the active vulcanizer, as consumed by a renderer.

use serde::Serialize;

use crate::demand::CycleParity;
use crate::engine::SchedulingEngine;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleCell {
    /// 1-based cycle number.
    pub cycle: usize,
    pub parity: CycleParity,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CyclewiseRow {
    pub part_no: String,
    pub lot_nos: Vec<String>,
    pub bin_nos: Vec<String>,
    pub total_stock: i64,
    pub low_stock: bool,
    pub cells: Vec<CycleCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CyclewiseView {
    pub vulc_no: String,
    pub cycles: u32,
    pub rows: Vec<CyclewiseRow>,
}

impl CyclewiseView {
    /// Snapshot the active vulcanizer; `None` when nothing is selected.
    ///
    /// Reading never materializes the ledger: rows are matched to parts by code and any
    /// slot without a stored value (no ledger yet, or a stale shorter row) shows as 0.
    /// The grid always spans the vulcanizer's *current* cycle count.
    pub fn of_active(engine: &SchedulingEngine) -> Option<Self> {
        let vulcanizer = engine.active_vulcanizer()?;
        let ledger = engine.production();

        let rows = vulcanizer
            .parts()
            .iter()
            .map(|part| {
                let row = ledger.row_for_part(vulcanizer.vulc_no(), part.part_no());
                let cells = (0..vulcanizer.cycles() as usize)
                    .map(|cycle_index| CycleCell {
                        cycle: cycle_index + 1,
                        parity: CycleParity::of_index(cycle_index),
                        value: row.map(|r| r.value(cycle_index)).unwrap_or(0),
                    })
                    .collect();

                CyclewiseRow {
                    part_no: part.part_no().to_string(),
                    lot_nos: part.bins().lot_numbers().into_iter().map(String::from).collect(),
                    bin_nos: part.bins().bin_numbers().into_iter().map(String::from).collect(),
                    total_stock: part.total_stock(),
                    low_stock: engine.low_stock().contains(part.part_no()),
                    cells,
                }
            })
            .collect();

        Some(Self {
            vulc_no: vulcanizer.vulc_no().to_string(),
            cycles: vulcanizer.cycles(),
            rows,
        })
    }
}
