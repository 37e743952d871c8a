use serde::{Deserialize, Serialize};

use vulcplan_core::VulcanizerId;

/// Editable field of a vulcanizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VulcanizerField {
    Code(String),
    Cycles(u32),
}

/// Editable field of a part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartField {
    Code(String),
    Odd(i64),
    Even(i64),
}

/// Mutation requests accepted by the scheduling engine.
///
/// Commands without an explicit vulcanizer act on the active one. Part and cycle indices
/// are 0-based positions in the active vulcanizer's part list and production rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanCommand {
    SelectVulcanizer { vulc_no: String },
    AddVulcanizer,
    AddPart,
    FlipParity,
    EditVulcanizer { id: VulcanizerId, field: VulcanizerField },
    EditPart { part_index: usize, field: PartField },
    EditCell { part_index: usize, cycle_index: usize, value: i64 },
    AutoFillNextCycle,
    SetMinCyclesRequired { cycles: u32 },
}

impl PlanCommand {
    pub fn name(&self) -> &'static str {
        match self {
            PlanCommand::SelectVulcanizer { .. } => "select_vulcanizer",
            PlanCommand::AddVulcanizer => "add_vulcanizer",
            PlanCommand::AddPart => "add_part",
            PlanCommand::FlipParity => "flip_parity",
            PlanCommand::EditVulcanizer { .. } => "edit_vulcanizer",
            PlanCommand::EditPart { .. } => "edit_part",
            PlanCommand::EditCell { .. } => "edit_cell",
            PlanCommand::AutoFillNextCycle => "auto_fill_next_cycle",
            PlanCommand::SetMinCyclesRequired { .. } => "set_min_cycles_required",
        }
    }
}
