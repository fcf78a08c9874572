//! Entity trait: records identified by id, not by field values.

/// Minimal interface for records with a stable identity.
///
/// Lets lookup helpers work generically over any id-bearing list (clients
/// and suppliers share one shape but live in separate lists).
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
