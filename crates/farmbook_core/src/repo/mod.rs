//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value slot contract used by the note store.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - A slot write replaces the whole value; there are no partial writes.

pub mod slot_repo;
