//! The ledger engine facade consumed by the UI layer.
//!
//! Owns the current [`libreta_ledger::Books`], stamps ids and timestamps
//! into commands, applies the resulting events, and persists the whole
//! snapshot after every successful mutation. Rendering, form handling and
//! filtering stay with the caller; this crate only exposes state and the
//! seven mutation operations.

pub mod bookkeeper;

pub use bookkeeper::{Bookkeeper, Committed};
