//! Domain model for the farm ledger and field notes.
//!
//! # Responsibility
//! - Define the records shared by ledger/note services and the binding layer.
//! - Keep the enumerated tool catalog in one place.
//!
//! # Invariants
//! - Row and note ids are assigned once and never reused or renumbered.
//! - Derived row `result` is only written by ledger recomputation.

pub mod note;
pub mod row;
pub mod tool;
