//! Bin-level stock ledger.
//!
//! This crate contains the stock rules for a part's physical bins, implemented purely as
//! deterministic domain logic (no IO, no storage).

pub mod bin;

pub use bin::{Bin, BinLedger};
