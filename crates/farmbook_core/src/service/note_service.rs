//! Note store use-case service.
//!
//! # Responsibility
//! - Own the note collection, the id counter and the edit cursor.
//! - Persist the full collection to one named slot after every mutation.
//!
//! # Invariants
//! - New notes are prepended; edits keep their position.
//! - An edit keeps `id` and `created` and refreshes `updated`.
//! - Mutations are staged and committed to memory only after the slot write
//!   succeeds, so a persistence failure leaves prior state intact.
//! - `next_note_id` stays above every id loaded or assigned.

use crate::clock::Clock;
use crate::model::note::{Note, NoteFields, NoteId, NoteValidationError};
use crate::repo::slot_repo::{RepoError, SlotRepository};
use crate::search::note_search::{search_notes, NoteListItem};
use chrono::NaiveDate;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot name holding the JSON array of notes.
pub const NOTES_SLOT_KEY: &str = "farmingNotes";

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteStoreError {
    /// Required field missing; nothing was changed.
    Validation(NoteValidationError),
    /// Slot read or write failed; in-memory state is unchanged.
    Repo(RepoError),
    /// Slot holds data that is not a note array.
    Decode(serde_json::Error),
    /// Stored or pending ids leave no room for another note id.
    IdSpaceExhausted { max_id: NoteId },
}

impl Display for NoteStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "stored notes are unreadable: {err}"),
            Self::IdSpaceExhausted { max_id } => {
                write!(f, "note id {max_id} leaves no room for new notes")
            }
        }
    }
}

impl Error for NoteStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::IdSpaceExhausted { .. } => None,
        }
    }
}

impl From<NoteValidationError> for NoteStoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for NoteStoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl NoteStoreError {
    /// Whether this is a user-correctable validation failure rather than a
    /// system error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Outcome of a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(NoteId),
    Updated(NoteId),
}

impl SaveOutcome {
    pub fn note_id(self) -> NoteId {
        match self {
            Self::Created(id) | Self::Updated(id) => id,
        }
    }
}

/// Persisted note collection with an edit cursor.
pub struct NoteStore<R: SlotRepository, C: Clock> {
    repo: R,
    clock: C,
    notes: Vec<Note>,
    next_note_id: NoteId,
    current_note_id: Option<NoteId>,
}

impl<R: SlotRepository, C: Clock> NoteStore<R, C> {
    /// Creates an empty store. Call [`NoteStore::load`] to restore notes.
    pub fn new(repo: R, clock: C) -> Self {
        Self {
            repo,
            clock,
            notes: Vec::new(),
            next_note_id: 1,
            current_note_id: None,
        }
    }

    /// Notes in stored order (newest created first).
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn current_note_id(&self) -> Option<NoteId> {
        self.current_note_id
    }

    pub fn next_note_id(&self) -> NoteId {
        self.next_note_id
    }

    /// Reads the persisted collection and replaces in-memory notes.
    ///
    /// An absent slot leaves the store as it is. Returns the number of notes
    /// restored.
    ///
    /// # Errors
    /// - `Repo` when the slot cannot be read.
    /// - `Decode` when the slot is not a JSON note array.
    /// - `IdSpaceExhausted` when a stored id is `NoteId::MAX`.
    ///
    /// State is untouched on error.
    pub fn load(&mut self) -> Result<usize, NoteStoreError> {
        let Some(raw) = self.repo.read_slot(NOTES_SLOT_KEY)? else {
            info!("event=notes_load module=notes status=ok found=false count=0");
            return Ok(0);
        };

        let notes = serde_json::from_str::<Vec<Note>>(&raw).map_err(|err| {
            error!("event=notes_load module=notes status=error error_code=decode_failed error={err}");
            NoteStoreError::Decode(err)
        })?;

        let next_note_id = match notes.iter().map(|note| note.id).max() {
            Some(max_id) => max_id.checked_add(1).ok_or_else(|| {
                error!(
                    "event=notes_load module=notes status=error error_code=id_space_exhausted max_id={max_id}"
                );
                NoteStoreError::IdSpaceExhausted { max_id }
            })?,
            None => self.next_note_id,
        };
        self.next_note_id = next_note_id;
        self.notes = notes;
        if self
            .current_note_id
            .is_some_and(|id| self.find(id).is_none())
        {
            self.current_note_id = None;
        }

        info!(
            "event=notes_load module=notes status=ok found=true count={} next_note_id={}",
            self.notes.len(),
            self.next_note_id
        );
        Ok(self.notes.len())
    }

    /// Starts a new draft: clears the edit cursor and returns blank fields.
    pub fn create_draft(&mut self, today: NaiveDate) -> NoteFields {
        self.current_note_id = None;
        NoteFields::blank(today)
    }

    /// Saves form fields as a new note or as an edit of the cursor's note.
    ///
    /// # Errors
    /// - `Validation` for blank title/content.
    /// - `Repo` when persisting fails.
    /// - `IdSpaceExhausted` when a new note would take the last id.
    ///
    /// No state changes on error.
    pub fn save(&mut self, fields: NoteFields) -> Result<SaveOutcome, NoteStoreError> {
        let fields = match fields.normalized() {
            Ok(fields) => fields,
            Err(err) => {
                warn!("event=note_save module=notes status=rejected error_code={err:?}");
                return Err(err.into());
            }
        };

        let now = self.clock.now();
        let mut staged = self.notes.clone();
        let editing = self
            .current_note_id
            .and_then(|id| staged.iter().position(|note| note.id == id));

        let outcome = match editing {
            Some(index) => {
                staged[index].apply_edit(fields, now);
                SaveOutcome::Updated(staged[index].id)
            }
            None => {
                let id = self.next_note_id;
                if id.checked_add(1).is_none() {
                    return Err(NoteStoreError::IdSpaceExhausted { max_id: id });
                }
                staged.insert(0, Note::create(id, fields, now));
                SaveOutcome::Created(id)
            }
        };

        self.persist(&staged)?;

        self.notes = staged;
        match outcome {
            SaveOutcome::Created(id) => {
                self.next_note_id = id + 1;
                self.current_note_id = None;
            }
            SaveOutcome::Updated(_) => {}
        }
        info!(
            "event=note_save module=notes status=ok mode={} note_id={} count={}",
            if matches!(outcome, SaveOutcome::Created(_)) {
                "create"
            } else {
                "update"
            },
            outcome.note_id(),
            self.notes.len()
        );
        Ok(outcome)
    }

    /// Removes one note and persists.
    ///
    /// Returns `Ok(false)` without writing when no note has `id`.
    pub fn delete(&mut self, id: NoteId) -> Result<bool, NoteStoreError> {
        if self.find(id).is_none() {
            return Ok(false);
        }

        let staged = self
            .notes
            .iter()
            .filter(|note| note.id != id)
            .cloned()
            .collect::<Vec<_>>();
        self.persist(&staged)?;

        self.notes = staged;
        if self.current_note_id == Some(id) {
            self.current_note_id = None;
        }
        info!(
            "event=note_delete module=notes status=ok note_id={id} count={}",
            self.notes.len()
        );
        Ok(true)
    }

    /// Notes matching `term` in stored order. Pure.
    pub fn search(&self, term: &str) -> Vec<&Note> {
        search_notes(&self.notes, term)
    }

    /// List projection of search results, marking the note under edit.
    pub fn list_items(&self, term: &str) -> Vec<NoteListItem> {
        self.search(term)
            .into_iter()
            .map(|note| NoteListItem::from_note(note, self.current_note_id))
            .collect()
    }

    /// Moves the edit cursor to `id` and returns that note's fields.
    ///
    /// Returns `None` and leaves the cursor alone when no note has `id`.
    pub fn load_note(&mut self, id: NoteId) -> Option<NoteFields> {
        let fields = self.find(id)?.fields();
        self.current_note_id = Some(id);
        Some(fields)
    }

    fn find(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    fn persist(&mut self, notes: &[Note]) -> Result<(), NoteStoreError> {
        let payload = serde_json::to_string(notes).map_err(RepoError::from)?;
        if let Err(err) = self.repo.write_slot(NOTES_SLOT_KEY, &payload) {
            error!(
                "event=notes_persist module=notes status=error error_code=slot_write_failed error={err}"
            );
            return Err(err.into());
        }
        Ok(())
    }
}
