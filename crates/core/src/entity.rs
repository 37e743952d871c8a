//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// A vulcanizer keeps its identity while its display code is renamed, so lookups that must
/// survive a rename go through `id()` rather than the code.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
