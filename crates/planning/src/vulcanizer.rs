use serde::{Deserialize, Serialize};

use vulcplan_core::{Entity, VulcanizerId};

use crate::part::Part;

/// A production unit scheduled over a number of repeating cycles.
///
/// Owns its parts exclusively. The display code is user-editable and not guaranteed
/// unique; `id` is the stable identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulcanizer {
    id: VulcanizerId,
    vulc_no: String,
    cycles: u32,
    parts: Vec<Part>,
}

impl Vulcanizer {
    pub fn new(id: VulcanizerId, vulc_no: impl Into<String>, cycles: u32) -> Self {
        Self {
            id,
            vulc_no: vulc_no.into(),
            cycles,
            parts: Vec::new(),
        }
    }

    pub fn with_parts(mut self, parts: Vec<Part>) -> Self {
        self.parts = parts;
        self
    }

    pub fn vulc_no(&self) -> &str {
        &self.vulc_no
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn part(&self, index: usize) -> Option<&Part> {
        self.parts.get(index)
    }

    pub(crate) fn part_mut(&mut self, index: usize) -> Option<&mut Part> {
        self.parts.get_mut(index)
    }

    pub(crate) fn parts_mut(&mut self) -> &mut [Part] {
        &mut self.parts
    }

    /// Append a blank part named `New_Part_<n>`; returns its index.
    pub(crate) fn add_part(&mut self) -> usize {
        let part_no = format!("New_Part_{}", self.parts.len() + 1);
        self.parts.push(Part::new(part_no));
        self.parts.len() - 1
    }

    /// Swap odd and even planned quantities for every part. No stock side effects.
    pub fn flip_parity(&mut self) {
        for part in &mut self.parts {
            part.flip_parity();
        }
    }

    pub(crate) fn set_vulc_no(&mut self, vulc_no: String) {
        self.vulc_no = vulc_no;
    }

    pub(crate) fn set_cycles(&mut self, cycles: u32) {
        self.cycles = cycles;
    }
}

impl Entity for Vulcanizer {
    type Id = VulcanizerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
