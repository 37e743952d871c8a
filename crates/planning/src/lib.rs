//! Cycle scheduling domain (inventory-constrained).
//!
//! This crate contains the business rules for planning vulcanizer production across
//! repeating cycles, implemented purely as deterministic domain logic (no IO, no clock,
//! no storage):
//!
//! - [`demand`]: planned quantity per cycle, selected by cycle parity
//! - [`low_stock`]: which parts cannot cover the configured minimum number of cycles
//! - [`production`]: the lazily materialized per-cycle production grid
//! - [`engine`]: auto-fill and manual edits reconciled against bin stock

pub mod command;
pub mod demand;
pub mod engine;
pub mod event;
pub mod input;
pub mod low_stock;
pub mod part;
pub mod production;
pub mod vulcanizer;
pub mod view;

pub use command::{PartField, PlanCommand, VulcanizerField};
pub use demand::CycleParity;
pub use engine::SchedulingEngine;
pub use event::{Mutation, Notice, SchedulingEvent};
pub use input::{parse_count, parse_quantity};
pub use low_stock::LowStockSet;
pub use part::Part;
pub use production::{ProductionLedger, ProductionRow};
pub use vulcanizer::Vulcanizer;
pub use view::{CycleCell, CyclewiseRow, CyclewiseView};
