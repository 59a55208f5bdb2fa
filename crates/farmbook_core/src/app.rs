//! Application controller owning all page-scoped state.
//!
//! # Responsibility
//! - Own exactly one ledger and one note store per session.
//! - Run startup: initialized ledger, then one note load.
//!
//! # Invariants
//! - A note load failure never aborts startup; the store starts empty and
//!   the failure is surfaced as a warning.

use crate::clock::{Clock, SystemClock};
use crate::repo::slot_repo::SlotRepository;
use crate::service::ledger_service::Ledger;
use crate::service::note_service::NoteStore;
use log::warn;

/// Top-level state holder handed to the binding layer.
pub struct FarmApp<R: SlotRepository, C: Clock = SystemClock> {
    ledger: Ledger,
    notes: NoteStore<R, C>,
    startup_warning: Option<String>,
}

impl<R: SlotRepository, C: Clock> FarmApp<R, C> {
    /// Builds the initialized ledger and restores persisted notes.
    pub fn open(repo: R, clock: C) -> Self {
        let mut notes = NoteStore::new(repo, clock);
        let startup_warning = match notes.load() {
            Ok(_) => None,
            Err(err) => {
                warn!("event=app_open module=app status=degraded error_code=notes_load_failed error={err}");
                Some(format!("saved notes could not be loaded: {err}"))
            }
        };

        Self {
            ledger: Ledger::new(),
            notes,
            startup_warning,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub fn notes(&self) -> &NoteStore<R, C> {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut NoteStore<R, C> {
        &mut self.notes
    }

    /// Non-fatal problem met during [`FarmApp::open`], if any.
    pub fn startup_warning(&self) -> Option<&str> {
        self.startup_warning.as_deref()
    }
}
