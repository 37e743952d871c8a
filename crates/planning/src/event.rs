use serde::{Deserialize, Serialize};

use vulcplan_core::{DomainError, VulcanizerId};
use vulcplan_events::Event;

use crate::demand::CycleParity;
use crate::low_stock::LowStockSet;

/// Facts produced by the scheduling engine once a mutation has completed.
///
/// Cycle numbers in events are 1-based, matching how cycles are shown to planners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchedulingEvent {
    VulcanizerSelected {
        vulc_no: String,
    },
    VulcanizerAdded {
        id: VulcanizerId,
        vulc_no: String,
    },
    VulcanizerRenamed {
        id: VulcanizerId,
        from: String,
        to: String,
    },
    CycleCountChanged {
        id: VulcanizerId,
        vulc_no: String,
        cycles: u32,
    },
    PartAdded {
        vulc_no: String,
        part_index: usize,
        part_no: String,
    },
    PartRenamed {
        vulc_no: String,
        part_index: usize,
        from: String,
        to: String,
    },
    PlannedQuantityChanged {
        vulc_no: String,
        part_no: String,
        parity: CycleParity,
        quantity: i64,
    },
    ParityFlipped {
        vulc_no: String,
    },
    LedgerMaterialized {
        vulc_no: String,
        parts: usize,
        cycles: u32,
    },
    CellEdited {
        vulc_no: String,
        part_no: String,
        cycle: usize,
        previous: i64,
        value: i64,
        /// Units taken from the bins (0 for decreases: nothing is refunded).
        deducted: i64,
        stock_after: i64,
    },
    CycleFilled {
        vulc_no: String,
        part_no: String,
        cycle: usize,
        planned: i64,
        filled: i64,
        stock_after: i64,
    },
    MinCyclesRequiredChanged {
        cycles: u32,
    },
}

impl Event for SchedulingEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SchedulingEvent::VulcanizerSelected { .. } => "planning.vulcanizer.selected",
            SchedulingEvent::VulcanizerAdded { .. } => "planning.vulcanizer.added",
            SchedulingEvent::VulcanizerRenamed { .. } => "planning.vulcanizer.renamed",
            SchedulingEvent::CycleCountChanged { .. } => "planning.vulcanizer.cycles_changed",
            SchedulingEvent::PartAdded { .. } => "planning.part.added",
            SchedulingEvent::PartRenamed { .. } => "planning.part.renamed",
            SchedulingEvent::PlannedQuantityChanged { .. } => "planning.part.planned_quantity_changed",
            SchedulingEvent::ParityFlipped { .. } => "planning.vulcanizer.parity_flipped",
            SchedulingEvent::LedgerMaterialized { .. } => "planning.ledger.materialized",
            SchedulingEvent::CellEdited { .. } => "planning.cell.edited",
            SchedulingEvent::CycleFilled { .. } => "planning.cycle.filled",
            SchedulingEvent::MinCyclesRequiredChanged { .. } => "planning.settings.min_cycles_changed",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}

/// Transient, non-blocking message for the planner. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    /// A part had no stock when auto-fill reached it; the remaining parts were still filled.
    Shortage { part_no: String, cycle: usize },
    /// The request was refused and state left unchanged.
    Rejected(DomainError),
    /// The request referenced something that does not exist; nothing happened.
    NotFound(DomainError),
}

/// `NotFound` subject used when a command needs an active vulcanizer and there is none.
pub const NO_ACTIVE_VULCANIZER: &str = "active vulcanizer";

impl Notice {
    /// User-facing text.
    pub fn message(&self) -> String {
        match self {
            Notice::Info(message) => message.clone(),
            Notice::Shortage { part_no, cycle } => {
                format!("No stock available for part {part_no} to fill cycle {cycle}.")
            }
            Notice::Rejected(DomainError::InsufficientStock { .. }) => {
                "Insufficient stock to make this change.".to_string()
            }
            Notice::Rejected(err) => format!("Change rejected: {err}"),
            Notice::NotFound(DomainError::NotFound(what)) if what == NO_ACTIVE_VULCANIZER => {
                "Please select or add a vulcanizer first.".to_string()
            }
            Notice::NotFound(err) => format!("Nothing changed: {err}"),
        }
    }

    /// Whether the notice should stay on screen longer than routine confirmations.
    pub fn is_warning(&self) -> bool {
        !matches!(self, Notice::Info(_))
    }
}

impl core::fmt::Display for Notice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.message())
    }
}

/// Result of one engine entry point: what happened, what to tell the user, and whether
/// the caller should redraw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mutation {
    pub events: Vec<SchedulingEvent>,
    pub notices: Vec<Notice>,
    /// Low-stock set recomputed after the mutation.
    pub low_stock: LowStockSet,
    pub redraw: bool,
}

impl Mutation {
    pub fn is_rejected(&self) -> bool {
        self.rejection().is_some()
    }

    pub fn rejection(&self) -> Option<&DomainError> {
        self.notices.iter().find_map(|notice| match notice {
            Notice::Rejected(err) => Some(err),
            _ => None,
        })
    }

    pub fn is_not_found(&self) -> bool {
        self.notices
            .iter()
            .any(|notice| matches!(notice, Notice::NotFound(_)))
    }

    pub fn shortages(&self) -> impl Iterator<Item = (&str, usize)> {
        self.notices.iter().filter_map(|notice| match notice {
            Notice::Shortage { part_no, cycle } => Some((part_no.as_str(), *cycle)),
            _ => None,
        })
    }

    pub(crate) fn record(&mut self, event: SchedulingEvent) {
        tracing::debug!(event_type = event.event_type(), "scheduling event");
        self.events.push(event);
    }

    pub(crate) fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
