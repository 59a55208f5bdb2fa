//! Core use-case services.
//!
//! # Responsibility
//! - Own the ledger and note store state transitions.
//! - Keep the binding layer decoupled from storage details.

pub mod ledger_service;
pub mod note_service;
