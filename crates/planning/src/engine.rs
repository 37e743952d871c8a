//! Scheduling engine: auto-fill and manual edits reconciled against bin stock.
//!
//! Every entry point runs to completion, re-runs the low-stock evaluator for the active
//! vulcanizer, and returns a [`Mutation`] describing what happened. Nothing here redraws
//! or persists; callers own both.

use vulcplan_core::{DomainError, Entity, VulcanizerId};

use crate::command::{PartField, PlanCommand, VulcanizerField};
use crate::demand::CycleParity;
use crate::event::{Mutation, NO_ACTIVE_VULCANIZER, Notice, SchedulingEvent};
use crate::low_stock::{self, LowStockSet};
use crate::production::{ProductionLedger, ProductionRow};
use crate::vulcanizer::Vulcanizer;

/// Default minimum number of cycles a part's stock should cover.
pub const DEFAULT_MIN_CYCLES_REQUIRED: u32 = 2;

/// Root scheduling state for one planning session.
///
/// The production ledger is keyed by vulcanizer code and lives beside the vulcanizer
/// tree rather than inside it, which is why its rows can go stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulingEngine {
    vulcanizers: Vec<Vulcanizer>,
    selected: Option<String>,
    min_cycles_required: u32,
    low_stock: LowStockSet,
    production: ProductionLedger,
}

impl Default for SchedulingEngine {
    fn default() -> Self {
        Self::new(Vec::new(), ProductionLedger::new(), DEFAULT_MIN_CYCLES_REQUIRED)
    }
}

impl SchedulingEngine {
    /// Build a session from loaded state. The first vulcanizer (if any) becomes active.
    pub fn new(
        vulcanizers: Vec<Vulcanizer>,
        production: ProductionLedger,
        min_cycles_required: u32,
    ) -> Self {
        let selected = vulcanizers.first().map(|v| v.vulc_no().to_string());
        let mut engine = Self {
            vulcanizers,
            selected,
            min_cycles_required,
            low_stock: LowStockSet::default(),
            production,
        };
        engine.refresh_low_stock();
        engine
    }

    pub fn vulcanizers(&self) -> &[Vulcanizer] {
        &self.vulcanizers
    }

    /// Code of the active vulcanizer.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn active_vulcanizer(&self) -> Option<&Vulcanizer> {
        self.active_index().map(|idx| &self.vulcanizers[idx])
    }

    pub fn min_cycles_required(&self) -> u32 {
        self.min_cycles_required
    }

    pub fn low_stock(&self) -> &LowStockSet {
        &self.low_stock
    }

    pub fn production(&self) -> &ProductionLedger {
        &self.production
    }

    /// Ledger rows of the active vulcanizer, if materialized.
    pub fn production_for_active(&self) -> Option<&[ProductionRow]> {
        self.production.rows(self.selected.as_deref()?)
    }

    /// Route a command to its entry point.
    pub fn handle(&mut self, command: PlanCommand) -> Mutation {
        match command {
            PlanCommand::SelectVulcanizer { vulc_no } => self.select_vulcanizer(&vulc_no),
            PlanCommand::AddVulcanizer => self.add_vulcanizer(),
            PlanCommand::AddPart => self.add_part(),
            PlanCommand::FlipParity => self.flip_parity(),
            PlanCommand::EditVulcanizer { id, field } => self.edit_vulcanizer(id, field),
            PlanCommand::EditPart { part_index, field } => self.edit_part(part_index, field),
            PlanCommand::EditCell {
                part_index,
                cycle_index,
                value,
            } => self.edit_production_cell(part_index, cycle_index, value),
            PlanCommand::AutoFillNextCycle => self.auto_fill_next_cycle(),
            PlanCommand::SetMinCyclesRequired { cycles } => self.set_min_cycles_required(cycles),
        }
    }

    pub fn select_vulcanizer(&mut self, vulc_no: &str) -> Mutation {
        if !self.vulcanizers.iter().any(|v| v.vulc_no() == vulc_no) {
            return self.not_found(format!("vulcanizer {vulc_no}"));
        }

        let mut mutation = Mutation::default();
        self.selected = Some(vulc_no.to_string());
        mutation.record(SchedulingEvent::VulcanizerSelected {
            vulc_no: vulc_no.to_string(),
        });
        self.finish(mutation)
    }

    /// Append a vulcanizer `V-<id>` with `id = max existing + 1`, no cycles and no parts.
    pub fn add_vulcanizer(&mut self) -> Mutation {
        let id = VulcanizerId::next_after(self.vulcanizers.iter().map(|v| *v.id()));
        let vulc_no = format!("V-{id}");
        self.vulcanizers.push(Vulcanizer::new(id, vulc_no.clone(), 0));
        tracing::info!(%id, vulcanizer = %vulc_no, "added vulcanizer");

        let mut mutation = Mutation::default();
        mutation.record(SchedulingEvent::VulcanizerAdded {
            id,
            vulc_no: vulc_no.clone(),
        });
        mutation.notify(Notice::Info(format!("Added new vulcanizer: {vulc_no}")));
        self.finish(mutation)
    }

    pub fn add_part(&mut self) -> Mutation {
        let Some(idx) = self.active_index() else {
            return self.not_found(NO_ACTIVE_VULCANIZER);
        };

        let vulcanizer = &mut self.vulcanizers[idx];
        let part_index = vulcanizer.add_part();
        let vulc_no = vulcanizer.vulc_no().to_string();
        let part_no = vulcanizer.parts()[part_index].part_no().to_string();
        tracing::info!(vulcanizer = %vulc_no, part = %part_no, "added part");

        let mut mutation = Mutation::default();
        mutation.record(SchedulingEvent::PartAdded {
            vulc_no: vulc_no.clone(),
            part_index,
            part_no,
        });
        mutation.notify(Notice::Info(format!("Added new part to {vulc_no}")));
        self.finish(mutation)
    }

    pub fn flip_parity(&mut self) -> Mutation {
        let Some(idx) = self.active_index() else {
            return self.not_found(NO_ACTIVE_VULCANIZER);
        };

        let vulcanizer = &mut self.vulcanizers[idx];
        vulcanizer.flip_parity();

        let mut mutation = Mutation::default();
        mutation.record(SchedulingEvent::ParityFlipped {
            vulc_no: vulcanizer.vulc_no().to_string(),
        });
        mutation.notify(Notice::Info("Odd and Even values flipped!".to_string()));
        self.finish(mutation)
    }

    /// Edit a vulcanizer's code or cycle count, addressed by its stable id.
    ///
    /// A rename of the active vulcanizer keeps it active: the selection follows the new
    /// code instead of staying on the old one, where later commands would find nothing.
    /// Existing ledger rows stay under the old code,
    /// and a cycle change does not resize rows already materialized.
    pub fn edit_vulcanizer(&mut self, id: VulcanizerId, field: VulcanizerField) -> Mutation {
        let Some(idx) = self.vulcanizers.iter().position(|v| *v.id() == id) else {
            return self.not_found(format!("vulcanizer #{id}"));
        };

        let mut mutation = Mutation::default();
        let vulcanizer = &mut self.vulcanizers[idx];
        match field {
            VulcanizerField::Code(code) => {
                let from = vulcanizer.vulc_no().to_string();
                if from == code {
                    return self.finish(mutation);
                }
                vulcanizer.set_vulc_no(code.clone());
                if self.selected.as_deref() == Some(from.as_str()) {
                    self.selected = Some(code.clone());
                }
                if self.production.is_materialized(&from) {
                    tracing::warn!(from = %from, to = %code, "renamed vulcanizer keeps its ledger under the old code");
                }
                mutation.record(SchedulingEvent::VulcanizerRenamed { id, from, to: code });
            }
            VulcanizerField::Cycles(cycles) => {
                vulcanizer.set_cycles(cycles);
                mutation.record(SchedulingEvent::CycleCountChanged {
                    id,
                    vulc_no: vulcanizer.vulc_no().to_string(),
                    cycles,
                });
            }
        }
        self.finish(mutation)
    }

    /// Edit a part of the active vulcanizer. Negative planned quantities are rejected.
    pub fn edit_part(&mut self, part_index: usize, field: PartField) -> Mutation {
        let Some(idx) = self.active_index() else {
            return self.not_found(NO_ACTIVE_VULCANIZER);
        };

        let mut mutation = Mutation::default();
        let vulcanizer = &mut self.vulcanizers[idx];
        let vulc_no = vulcanizer.vulc_no().to_string();
        let Some(part) = vulcanizer.part_mut(part_index) else {
            return self.not_found(format!("part #{} of {vulc_no}", part_index + 1));
        };

        match field {
            PartField::Code(code) => {
                let from = part.part_no().to_string();
                part.set_part_no(code.clone());
                mutation.record(SchedulingEvent::PartRenamed {
                    vulc_no,
                    part_index,
                    from,
                    to: code,
                });
            }
            PartField::Odd(quantity) | PartField::Even(quantity) if quantity < 0 => {
                mutation.notify(Notice::Rejected(DomainError::validation(format!(
                    "planned quantity cannot be negative (got {quantity})"
                ))));
            }
            PartField::Odd(quantity) => {
                part.set_odd(quantity);
                mutation.record(SchedulingEvent::PlannedQuantityChanged {
                    vulc_no,
                    part_no: part.part_no().to_string(),
                    parity: CycleParity::Odd,
                    quantity,
                });
            }
            PartField::Even(quantity) => {
                part.set_even(quantity);
                mutation.record(SchedulingEvent::PlannedQuantityChanged {
                    vulc_no,
                    part_no: part.part_no().to_string(),
                    parity: CycleParity::Even,
                    quantity,
                });
            }
        }
        self.finish(mutation)
    }

    pub fn set_min_cycles_required(&mut self, cycles: u32) -> Mutation {
        self.min_cycles_required = cycles;
        let mut mutation = Mutation::default();
        mutation.record(SchedulingEvent::MinCyclesRequiredChanged { cycles });
        self.finish(mutation)
    }

    /// Fill the next open cycle of every part of the active vulcanizer.
    ///
    /// Per part, in order: find the first slot holding 0 (skip the part if there is none),
    /// take the planned quantity for that slot's parity, and fill `min(planned, stock)`,
    /// deducting the filled amount from the bins. A part with no stock gets a shortage
    /// notice and is skipped. Partial fills are not distinguished from full ones.
    pub fn auto_fill_next_cycle(&mut self) -> Mutation {
        let Some(idx) = self.active_index() else {
            return self.not_found(NO_ACTIVE_VULCANIZER);
        };

        let mut mutation = Mutation::default();
        let vulcanizer = &mut self.vulcanizers[idx];
        let vulc_no = vulcanizer.vulc_no().to_string();
        if self.production.materialize(vulcanizer) {
            mutation.record(SchedulingEvent::LedgerMaterialized {
                vulc_no: vulc_no.clone(),
                parts: vulcanizer.parts().len(),
                cycles: vulcanizer.cycles(),
            });
        }

        if let Some(rows) = self.production.rows_mut(&vulc_no) {
            for part in vulcanizer.parts_mut() {
                let Some(row) = rows.iter_mut().find(|row| row.part() == part.part_no()) else {
                    tracing::debug!(part = part.part_no(), "no ledger row for part; skipping");
                    continue;
                };
                let Some(cycle_index) = row.next_open_cycle() else {
                    continue;
                };

                let cycle = cycle_index + 1;
                let planned = part.planned_quantity(cycle_index);
                let stock = part.total_stock();
                if stock <= 0 {
                    tracing::warn!(part = part.part_no(), cycle, "no stock to fill cycle");
                    mutation.notify(Notice::Shortage {
                        part_no: part.part_no().to_string(),
                        cycle,
                    });
                    continue;
                }

                let filled = planned.min(stock);
                row.set(cycle_index, filled);
                part.deduct(filled);
                tracing::info!(part = part.part_no(), cycle, planned, filled, "filled cycle");

                mutation.record(SchedulingEvent::CycleFilled {
                    vulc_no: vulc_no.clone(),
                    part_no: part.part_no().to_string(),
                    cycle,
                    planned,
                    filled,
                    stock_after: part.total_stock(),
                });
                mutation.notify(Notice::Info(format!(
                    "Filled cycle {cycle} for part {}.",
                    part.part_no()
                )));
            }
        }

        self.finish(mutation)
    }

    /// Set one production cell of the active vulcanizer to `value`.
    ///
    /// The change `delta = value - previous` is reconciled against stock: an increase must
    /// be covered by the part's total stock and is deducted FIFO; a decrease is recorded
    /// without returning anything to the bins. A rejected edit leaves ledger and bins as
    /// they were.
    ///
    /// Negative values are rejected up front, before the ledger is materialized, rather
    /// than recorded as a stock-neutral decrease.
    pub fn edit_production_cell(&mut self, part_index: usize, cycle_index: usize, value: i64) -> Mutation {
        let Some(idx) = self.active_index() else {
            return self.not_found(NO_ACTIVE_VULCANIZER);
        };

        let mut mutation = Mutation::default();
        if value < 0 {
            mutation.notify(Notice::Rejected(DomainError::validation(format!(
                "produced quantity cannot be negative (got {value})"
            ))));
            return self.finish(mutation);
        }

        let vulcanizer = &mut self.vulcanizers[idx];
        let vulc_no = vulcanizer.vulc_no().to_string();
        if self.production.materialize(vulcanizer) {
            mutation.record(SchedulingEvent::LedgerMaterialized {
                vulc_no: vulc_no.clone(),
                parts: vulcanizer.parts().len(),
                cycles: vulcanizer.cycles(),
            });
        }

        let row = self
            .production
            .rows_mut(&vulc_no)
            .and_then(|rows| rows.get_mut(part_index));
        let (Some(row), Some(part)) = (row, vulcanizer.part_mut(part_index)) else {
            tracing::warn!(vulcanizer = %vulc_no, part_index, "edit for a part without a ledger row");
            mutation.notify(Notice::NotFound(DomainError::not_found(format!(
                "production row #{} of {vulc_no}",
                part_index + 1
            ))));
            mutation.low_stock = self.low_stock.clone();
            mutation.redraw = !mutation.events.is_empty();
            return mutation;
        };

        let Some(previous) = row.get(cycle_index) else {
            mutation.notify(Notice::Rejected(DomainError::validation(format!(
                "cycle {} is outside the materialized ledger ({} cycles)",
                cycle_index + 1,
                row.values().len()
            ))));
            return self.finish(mutation);
        };

        let delta = value - previous;
        if delta != 0 {
            let stock = part.total_stock();
            if stock >= delta && part.deduct(delta) {
                row.set(cycle_index, value);
                let stock_after = part.total_stock();
                tracing::info!(part = part.part_no(), cycle = cycle_index + 1, delta, stock_after, "edited production cell");

                mutation.record(SchedulingEvent::CellEdited {
                    vulc_no,
                    part_no: part.part_no().to_string(),
                    cycle: cycle_index + 1,
                    previous,
                    value,
                    deducted: stock - stock_after,
                    stock_after,
                });
                mutation.notify(Notice::Info(format!(
                    "Stock for {} updated. New stock: {stock_after}",
                    part.part_no()
                )));
            } else {
                tracing::warn!(part = part.part_no(), delta, stock, "insufficient stock for edit");
                mutation.notify(Notice::Rejected(DomainError::insufficient_stock(
                    part.part_no(),
                    delta,
                    stock,
                )));
            }
        }

        self.finish(mutation)
    }

    fn active_index(&self) -> Option<usize> {
        let selected = self.selected.as_deref()?;
        self.vulcanizers.iter().position(|v| v.vulc_no() == selected)
    }

    fn refresh_low_stock(&mut self) {
        self.low_stock = match self.active_index() {
            Some(idx) => low_stock::evaluate(&self.vulcanizers[idx], self.min_cycles_required),
            None => LowStockSet::default(),
        };
    }

    /// Re-run the evaluator and ask for a redraw.
    fn finish(&mut self, mut mutation: Mutation) -> Mutation {
        self.refresh_low_stock();
        mutation.low_stock = self.low_stock.clone();
        mutation.redraw = true;
        mutation
    }

    /// No-op outcome for a reference that does not resolve.
    fn not_found(&self, what: impl Into<String>) -> Mutation {
        let err = DomainError::not_found(what);
        tracing::warn!(error = %err, "ignoring command");
        Mutation {
            notices: vec![Notice::NotFound(err)],
            low_stock: self.low_stock.clone(),
            ..Mutation::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use vulcplan_inventory::{Bin, BinLedger};

    use crate::part::Part;
    use crate::view::CyclewiseView;

    fn bins(stocks: &[i64]) -> BinLedger {
        stocks
            .iter()
            .enumerate()
            .map(|(i, stock)| Bin::new(format!("L{}", 101 + i), format!("B{}", 101 + i), *stock))
            .collect()
    }

    fn stocks(engine: &SchedulingEngine, part_index: usize) -> Vec<i64> {
        engine.active_vulcanizer().unwrap().parts()[part_index]
            .bins()
            .bins()
            .iter()
            .map(Bin::stock)
            .collect()
    }

    fn total(engine: &SchedulingEngine, part_index: usize) -> i64 {
        engine.active_vulcanizer().unwrap().parts()[part_index].total_stock()
    }

    fn cell(engine: &SchedulingEngine, part_index: usize, cycle_index: usize) -> i64 {
        engine
            .production()
            .read_cell(engine.selected().unwrap(), part_index, cycle_index)
    }

    fn engine_with(parts: Vec<Part>, cycles: u32) -> SchedulingEngine {
        let v1 = Vulcanizer::new(VulcanizerId::new(1), "V-1", cycles).with_parts(parts);
        SchedulingEngine::new(vec![v1], ProductionLedger::new(), DEFAULT_MIN_CYCLES_REQUIRED)
    }

    fn plant() -> SchedulingEngine {
        let v1 = Vulcanizer::new(VulcanizerId::new(1), "V-1", 10).with_parts(vec![
            Part::seeded("P101", bins(&[100, 50]), 10, 12),
            Part::seeded("P102", bins(&[80]), 8, 15),
        ]);
        let v2 = Vulcanizer::new(VulcanizerId::new(2), "V-2", 8)
            .with_parts(vec![Part::seeded("P103", bins(&[150]), 12, 10)]);
        SchedulingEngine::new(vec![v1, v2], ProductionLedger::new(), DEFAULT_MIN_CYCLES_REQUIRED)
    }

    #[test]
    fn first_vulcanizer_is_active_after_load() {
        let engine = plant();
        assert_eq!(engine.selected(), Some("V-1"));
        assert!(engine.production_for_active().is_none());
        assert!(engine.low_stock().is_empty());
    }

    #[test]
    fn auto_fill_fills_odd_then_even_cycle_fifo() {
        let mut engine = engine_with(vec![Part::seeded("P101", bins(&[100, 50]), 10, 12)], 10);

        let first = engine.auto_fill_next_cycle();
        assert!(first.redraw);
        assert_eq!(cell(&engine, 0, 0), 10);
        assert_eq!(stocks(&engine, 0), vec![90, 50]);
        assert!(matches!(
            first.events.as_slice(),
            [SchedulingEvent::LedgerMaterialized { parts: 1, cycles: 10, .. }, SchedulingEvent::CycleFilled { cycle: 1, filled: 10, .. }]
        ));
        assert_eq!(first.notices[0].message(), "Filled cycle 1 for part P101.");

        engine.auto_fill_next_cycle();
        assert_eq!(cell(&engine, 0, 1), 12);
        assert_eq!(stocks(&engine, 0), vec![78, 50]);
    }

    #[test]
    fn auto_fill_partially_fills_when_stock_is_short() {
        let mut engine = engine_with(vec![Part::seeded("P101", bins(&[4, 3]), 10, 12)], 4);

        let mutation = engine.auto_fill_next_cycle();

        assert_eq!(cell(&engine, 0, 0), 7);
        assert!(stocks(&engine, 0).is_empty());
        assert!(!mutation.is_rejected());
        assert!(matches!(
            mutation.events.last(),
            Some(SchedulingEvent::CycleFilled { planned: 10, filled: 7, stock_after: 0, .. })
        ));
    }

    #[test]
    fn auto_fill_reports_shortage_and_continues_with_other_parts() {
        let mut engine = engine_with(
            vec![
                Part::seeded("P101", BinLedger::default(), 10, 12),
                Part::seeded("P102", bins(&[80]), 8, 15),
            ],
            4,
        );

        let mutation = engine.auto_fill_next_cycle();

        assert_eq!(mutation.shortages().collect::<Vec<_>>(), vec![("P101", 1)]);
        assert_eq!(
            mutation.notices[0].message(),
            "No stock available for part P101 to fill cycle 1."
        );
        assert_eq!(cell(&engine, 0, 0), 0);
        assert_eq!(cell(&engine, 1, 0), 8);
        assert_eq!(total(&engine, 1), 72);
    }

    #[test]
    fn auto_fill_skips_fully_scheduled_parts() {
        let mut engine = engine_with(vec![Part::seeded("P101", bins(&[100]), 10, 12)], 2);
        engine.auto_fill_next_cycle();
        engine.auto_fill_next_cycle();
        assert_eq!(total(&engine, 0), 78);

        let mutation = engine.auto_fill_next_cycle();

        assert!(mutation.events.is_empty());
        assert_eq!(total(&engine, 0), 78);
        assert!(mutation.redraw);
    }

    #[test]
    fn auto_fill_refills_a_reopened_slot_before_later_ones() {
        let mut engine = engine_with(vec![Part::seeded("P101", bins(&[100]), 10, 12)], 4);
        for _ in 0..3 {
            engine.auto_fill_next_cycle();
        }
        assert_eq!(total(&engine, 0), 68);

        // Zeroing cycle 2 reopens it without refunding stock.
        engine.edit_production_cell(0, 1, 0);
        assert_eq!(total(&engine, 0), 68);

        engine.auto_fill_next_cycle();
        assert_eq!(cell(&engine, 0, 1), 12);
        assert_eq!(cell(&engine, 0, 3), 0);
        assert_eq!(total(&engine, 0), 56);
    }

    #[test]
    fn edit_increase_deducts_fifo_and_decrease_refunds_nothing() {
        let mut engine = engine_with(vec![Part::seeded("P101", bins(&[100, 50]), 10, 12)], 10);
        engine.auto_fill_next_cycle();
        assert_eq!(total(&engine, 0), 140);

        // delta = 110 <= 140: first bin (90) emptied and removed, second 50 -> 30.
        let up = engine.edit_production_cell(0, 0, 120);
        assert!(!up.is_rejected());
        assert_eq!(cell(&engine, 0, 0), 120);
        assert_eq!(stocks(&engine, 0), vec![30]);
        assert_eq!(up.notices[0].message(), "Stock for P101 updated. New stock: 30");

        let down = engine.edit_production_cell(0, 0, 10);
        assert!(!down.is_rejected());
        assert_eq!(cell(&engine, 0, 0), 10);
        assert_eq!(stocks(&engine, 0), vec![30]);
        assert!(matches!(
            down.events.as_slice(),
            [SchedulingEvent::CellEdited { previous: 120, value: 10, deducted: 0, stock_after: 30, .. }]
        ));
    }

    #[test]
    fn edit_on_fresh_ledger_drains_first_bin_into_second() {
        let mut engine = engine_with(vec![Part::seeded("P101", bins(&[100, 50]), 10, 12)], 10);

        engine.edit_production_cell(0, 0, 110);
        assert_eq!(stocks(&engine, 0), vec![40]);
        assert_eq!(engine.active_vulcanizer().unwrap().parts()[0].bins().lot_numbers(), vec!["L102"]);

        engine.edit_production_cell(0, 0, 10);
        assert_eq!(cell(&engine, 0, 0), 10);
        assert_eq!(stocks(&engine, 0), vec![40]);
    }

    #[test]
    fn edit_beyond_stock_is_rejected_and_changes_nothing() {
        let mut engine = engine_with(vec![Part::seeded("P101", bins(&[100, 50]), 10, 12)], 10);
        engine.auto_fill_next_cycle();

        let mutation = engine.edit_production_cell(0, 0, 200);

        assert_eq!(
            mutation.rejection(),
            Some(&DomainError::insufficient_stock("P101", 190, 140))
        );
        assert_eq!(mutation.notices[0].message(), "Insufficient stock to make this change.");
        assert!(mutation.events.is_empty());
        assert!(mutation.redraw);
        assert_eq!(cell(&engine, 0, 0), 10);
        assert_eq!(stocks(&engine, 0), vec![90, 50]);
    }

    #[test]
    fn unchanged_value_is_a_no_op() {
        let mut engine = engine_with(vec![Part::seeded("P101", bins(&[100]), 10, 12)], 4);
        engine.auto_fill_next_cycle();

        let mutation = engine.edit_production_cell(0, 0, 10);

        assert!(mutation.events.is_empty());
        assert!(mutation.notices.is_empty());
        assert!(mutation.redraw);
        assert_eq!(total(&engine, 0), 90);
    }

    #[test]
    fn negative_cell_value_is_rejected() {
        let mut engine = engine_with(vec![Part::seeded("P101", bins(&[100]), 10, 12)], 4);

        let mutation = engine.edit_production_cell(0, 0, -5);

        assert!(matches!(mutation.rejection(), Some(DomainError::Validation(_))));
        assert!(engine.production_for_active().is_none());
        assert_eq!(total(&engine, 0), 100);
    }

    #[test]
    fn stale_ledger_is_not_resized_after_cycle_change() {
        let mut engine = engine_with(vec![Part::seeded("P101", bins(&[100]), 10, 12)], 2);
        engine.auto_fill_next_cycle();

        engine.edit_vulcanizer(VulcanizerId::new(1), VulcanizerField::Cycles(4));
        assert_eq!(engine.production_for_active().unwrap()[0].values().len(), 2);

        let mutation = engine.edit_production_cell(0, 3, 5);
        assert!(matches!(mutation.rejection(), Some(DomainError::Validation(_))));
        assert_eq!(total(&engine, 0), 90);

        let view = CyclewiseView::of_active(&engine).unwrap();
        let values: Vec<i64> = view.rows[0].cells.iter().map(|c| c.value).collect();
        assert_eq!(values, vec![10, 0, 0, 0]);
    }

    #[test]
    fn part_added_after_materialization_has_no_ledger_row() {
        let mut engine = engine_with(vec![Part::seeded("P101", bins(&[100]), 10, 12)], 2);
        engine.auto_fill_next_cycle();
        engine.add_part();

        let edit = engine.edit_production_cell(1, 0, 1);
        assert!(edit.is_not_found());
        assert!(!edit.redraw);

        let fill = engine.auto_fill_next_cycle();
        assert!(fill.shortages().next().is_none());
        assert_eq!(fill.events.len(), 1);
    }

    #[test]
    fn low_stock_is_recomputed_after_min_cycles_change() {
        let mut engine = engine_with(vec![Part::seeded("P101", bins(&[20]), 10, 12)], 10);
        engine.set_min_cycles_required(0);
        assert!(engine.low_stock().is_empty());

        let mutation = engine.set_min_cycles_required(3);

        assert!(mutation.low_stock.contains("P101"));
        assert!(engine.low_stock().contains("P101"));
        assert_eq!(engine.min_cycles_required(), 3);
    }

    #[test]
    fn low_stock_follows_consumption() {
        let mut engine = engine_with(vec![Part::seeded("P101", bins(&[30]), 10, 12)], 10);
        assert!(engine.low_stock().is_empty());

        let mutation = engine.auto_fill_next_cycle();

        // 20 left, 22 required for two cycles.
        assert!(mutation.low_stock.contains("P101"));
    }

    #[test]
    fn low_stock_is_evaluated_for_the_active_vulcanizer_only() {
        let mut engine = plant();
        engine.set_min_cycles_required(20);
        assert!(engine.low_stock().contains("P101"));
        assert!(!engine.low_stock().contains("P103"));

        engine.select_vulcanizer("V-2");
        assert!(engine.low_stock().contains("P103"));
        assert!(!engine.low_stock().contains("P101"));
    }

    #[test]
    fn flip_parity_changes_next_fill_quantity() {
        let mut engine = engine_with(vec![Part::seeded("P101", bins(&[100]), 10, 12)], 4);

        let flip = engine.flip_parity();
        assert_eq!(flip.notices[0].message(), "Odd and Even values flipped!");
        engine.auto_fill_next_cycle();

        assert_eq!(cell(&engine, 0, 0), 12);
        assert_eq!(total(&engine, 0), 88);
    }

    #[test]
    fn add_vulcanizer_uses_max_id_plus_one() {
        let mut engine = plant();
        engine.edit_vulcanizer(VulcanizerId::new(2), VulcanizerField::Code("Press-A".into()));

        let mutation = engine.add_vulcanizer();

        let added = engine.vulcanizers().last().unwrap();
        assert_eq!(*added.id(), VulcanizerId::new(3));
        assert_eq!(added.vulc_no(), "V-3");
        assert_eq!(added.cycles(), 0);
        assert!(added.parts().is_empty());
        assert_eq!(engine.selected(), Some("V-1"));
        assert_eq!(mutation.notices[0].message(), "Added new vulcanizer: V-3");
    }

    #[test]
    fn commands_needing_an_active_vulcanizer_are_no_ops_without_one() {
        let mut engine = SchedulingEngine::default();

        for mutation in [
            engine.add_part(),
            engine.flip_parity(),
            engine.auto_fill_next_cycle(),
            engine.edit_production_cell(0, 0, 1),
        ] {
            assert!(mutation.is_not_found());
            assert!(!mutation.redraw);
            assert_eq!(mutation.notices[0].message(), "Please select or add a vulcanizer first.");
        }

        engine.add_vulcanizer();
        assert_eq!(engine.selected(), None);
        engine.select_vulcanizer("V-1");
        assert!(!engine.add_part().is_not_found());
        assert_eq!(engine.active_vulcanizer().unwrap().parts()[0].part_no(), "New_Part_1");
    }

    #[test]
    fn selecting_unknown_vulcanizer_keeps_current_selection() {
        let mut engine = plant();
        let mutation = engine.select_vulcanizer("V-9");
        assert!(mutation.is_not_found());
        assert_eq!(engine.selected(), Some("V-1"));
    }

    #[test]
    fn renaming_active_vulcanizer_keeps_it_selected() {
        let mut engine = plant();
        engine.auto_fill_next_cycle();

        let mutation = engine.edit_vulcanizer(VulcanizerId::new(1), VulcanizerField::Code("Press-1".into()));

        assert!(matches!(
            mutation.events.as_slice(),
            [SchedulingEvent::VulcanizerRenamed { from, to, .. }] if from == "V-1" && to == "Press-1"
        ));
        assert_eq!(engine.selected(), Some("Press-1"));
        assert!(engine.production_for_active().is_none());
        assert!(engine.production().is_materialized("V-1"));
    }

    #[test]
    fn renamed_part_loses_its_ledger_row() {
        let mut engine = engine_with(vec![Part::seeded("P101", bins(&[100]), 10, 12)], 4);
        engine.auto_fill_next_cycle();
        engine.edit_part(0, PartField::Code("P101-B".into()));

        let mutation = engine.auto_fill_next_cycle();

        assert!(mutation.events.is_empty());
        assert_eq!(total(&engine, 0), 90);
    }

    #[test]
    fn part_edits_validate_and_reevaluate() {
        let mut engine = engine_with(vec![Part::seeded("P101", bins(&[30]), 10, 12)], 4);

        let rejected = engine.edit_part(0, PartField::Odd(-1));
        assert!(matches!(rejected.rejection(), Some(DomainError::Validation(_))));
        assert_eq!(engine.active_vulcanizer().unwrap().parts()[0].odd(), 10);

        let mutation = engine.edit_part(0, PartField::Even(40));
        assert!(mutation.low_stock.contains("P101"));

        let missing = engine.edit_part(5, PartField::Odd(1));
        assert!(missing.is_not_found());
    }

    #[test]
    fn huge_planned_quantities_flag_low_stock_without_overflow() {
        let mut engine = plant();
        let odd = crate::input::parse_quantity("9223372036854775807").unwrap();

        engine.edit_part(0, PartField::Odd(odd));
        let mutation = engine.edit_part(0, PartField::Even(1));

        assert!(!mutation.is_rejected());
        assert!(mutation.low_stock.contains("P101"));
        assert_eq!(engine.active_vulcanizer().unwrap().parts()[0].odd(), i64::MAX);
    }

    #[test]
    fn handle_routes_commands() {
        let mut engine = plant();
        engine.handle(PlanCommand::SelectVulcanizer { vulc_no: "V-2".into() });
        engine.handle(PlanCommand::AutoFillNextCycle);
        engine.handle(PlanCommand::EditCell { part_index: 0, cycle_index: 1, value: 30 });

        assert_eq!(cell(&engine, 0, 0), 12);
        assert_eq!(cell(&engine, 0, 1), 30);
        assert_eq!(total(&engine, 0), 108);
    }

    #[derive(Debug, Clone)]
    enum Step {
        Fill,
        Edit { cycle_index: usize, value: i64 },
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            Just(Step::Fill),
            (0usize..6, 0i64..80).prop_map(|(cycle_index, value)| Step::Edit { cycle_index, value }),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: stock falls by exactly the committed positive deltas and never goes
        /// negative; decreases and rejections leave stock untouched; bins only shrink.
        #[test]
        fn stock_is_conserved_across_fills_and_edits(
            initial in prop::collection::vec(1i64..120, 0..4),
            odd in 0i64..40,
            even in 0i64..40,
            steps in prop::collection::vec(step(), 1..25),
        ) {
            let mut engine = engine_with(vec![Part::seeded("P101", bins(&initial), odd, even)], 6);

            for step in steps {
                let before = total(&engine, 0);
                let bins_before = stocks(&engine, 0).len();
                let cells_before = engine.production_for_active().map(|rows| rows[0].values().to_vec());

                let mutation = match step {
                    Step::Fill => engine.auto_fill_next_cycle(),
                    Step::Edit { cycle_index, value } => engine.edit_production_cell(0, cycle_index, value),
                };

                let committed: i64 = mutation
                    .events
                    .iter()
                    .map(|event| match event {
                        SchedulingEvent::CycleFilled { filled, .. } => *filled,
                        SchedulingEvent::CellEdited { previous, value, .. } => (value - previous).max(0),
                        _ => 0,
                    })
                    .sum();

                let after = total(&engine, 0);
                prop_assert_eq!(before - after, committed);
                prop_assert!(after >= 0);
                prop_assert!(stocks(&engine, 0).len() <= bins_before);
                prop_assert!(stocks(&engine, 0).iter().all(|s| *s > 0));

                if mutation.is_rejected() {
                    let cells_after = engine.production_for_active().map(|rows| rows[0].values().to_vec());
                    prop_assert_eq!(after, before);
                    if cells_before.is_some() {
                        prop_assert_eq!(cells_after, cells_before);
                    }
                }
            }
        }

        /// Property: lowering a cell records the new value but refunds nothing.
        #[test]
        fn decreasing_a_cell_never_refunds(
            (stock, raise, lower) in (1i64..500)
                .prop_flat_map(|stock| (Just(stock), 1..=stock))
                .prop_flat_map(|(stock, raise)| (Just(stock), Just(raise), 0..raise)),
        ) {
            let mut engine = engine_with(vec![Part::seeded("P101", bins(&[stock]), 10, 12)], 3);
            let raised = engine.edit_production_cell(0, 0, raise);
            prop_assert!(!raised.is_rejected());

            let before = total(&engine, 0);
            engine.edit_production_cell(0, 0, lower);

            prop_assert_eq!(cell(&engine, 0, 0), lower);
            prop_assert_eq!(total(&engine, 0), before);
        }

        /// Property: asking for more than the stock on hand is rejected without side effects.
        #[test]
        fn over_commitment_is_rejected(
            initial in prop::collection::vec(1i64..100, 1..4),
            excess in 1i64..100,
        ) {
            let mut engine = engine_with(vec![Part::seeded("P101", bins(&initial), 10, 12)], 3);
            let available: i64 = initial.iter().sum();
            engine.production.materialize(&engine.vulcanizers[0]);

            let mutation = engine.edit_production_cell(0, 2, available + excess);

            prop_assert_eq!(
                mutation.rejection(),
                Some(&DomainError::insufficient_stock("P101", available + excess, available))
            );
            prop_assert_eq!(stocks(&engine, 0), initial);
            prop_assert_eq!(cell(&engine, 0, 2), 0);
        }
    }
}
