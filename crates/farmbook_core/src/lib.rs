//! Core domain logic for Farmbook.
//! This crate is the single source of truth for ledger and note invariants;
//! it has no rendering surface and is driven by a thin binding layer.

pub mod app;
pub mod clock;
pub mod config;
pub mod db;
pub mod display;
pub mod export;
pub mod input;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use app::FarmApp;
pub use clock::{Clock, SteppingClock, SystemClock};
pub use config::AppConfig;
pub use export::csv::export_file_name;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteFields, NoteId, NoteValidationError};
pub use model::row::{LedgerSummary, Row, RowId};
pub use model::tool::{default_tool_name, Tool, TOOLS};
pub use repo::slot_repo::{
    MemorySlotRepository, RepoError, RepoResult, SlotRepository, SqliteSlotRepository,
};
pub use search::note_search::NoteListItem;
pub use service::ledger_service::{Ledger, LedgerError, RowUpdate, DEFAULT_UNIT_PRICE};
pub use service::note_service::{NoteStore, NoteStoreError, SaveOutcome, NOTES_SLOT_KEY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
