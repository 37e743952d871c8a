//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a vulcanizer.
///
/// Integer, unique, and assigned monotonically (`max existing + 1`). Unlike the
/// user-editable display code, it never changes once assigned.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VulcanizerId(u32);

impl VulcanizerId {
    /// The identifier handed to the first vulcanizer of an empty plan.
    pub const FIRST: VulcanizerId = VulcanizerId(1);

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Next identifier after the largest of `existing` (or `FIRST` when there are none).
    pub fn next_after(existing: impl IntoIterator<Item = VulcanizerId>) -> Self {
        existing
            .into_iter()
            .max()
            .map(|max| Self(max.0.saturating_add(1)))
            .unwrap_or(Self::FIRST)
    }
}

impl core::fmt::Display for VulcanizerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for VulcanizerId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<VulcanizerId> for u32 {
    fn from(value: VulcanizerId) -> Self {
        value.0
    }
}

impl FromStr for VulcanizerId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u32>()
            .map_err(|e| DomainError::validation(format!("VulcanizerId: {e}")))?;
        Ok(Self(value))
    }
}
