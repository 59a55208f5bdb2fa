//! Text export of ledger state for an external file writer.

pub mod csv;
