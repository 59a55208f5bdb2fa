//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Translate form events into core ledger/note operations.
//! - Return plain view structs and response envelopes for rendering.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Raw numeric form text is coerced by core input helpers, never rejected.
//! - All state lives in a `FarmSession` handle owned by the caller.

use chrono::{Local, Utc};
use farmbook_core::db::open_db;
use farmbook_core::display::{hindi_date_time, hindi_long_date, note_date_label};
use farmbook_core::input::parse_unit_price;
use farmbook_core::{
    core_version as core_version_inner, export_file_name, init_logging as init_logging_inner,
    AppConfig, FarmApp, LedgerError, NoteFields, NoteListItem, NoteStoreError, RowUpdate,
    SaveOutcome, SqliteSlotRepository, SystemClock, TOOLS,
};
use log::{info, warn};
use std::path::PathBuf;

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Tool picker entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolItem {
    pub id: u32,
    pub name: String,
    pub icon: String,
}

/// Returns the tool catalog in picker order.
#[flutter_rust_bridge::frb(sync)]
pub fn tool_catalog() -> Vec<ToolItem> {
    TOOLS
        .iter()
        .map(|tool| ToolItem {
            id: tool.id,
            name: tool.name.to_string(),
            icon: tool.icon.to_string(),
        })
        .collect()
}

/// Header date label, e.g. `18 अक्तूबर 2026`.
#[flutter_rust_bridge::frb(sync)]
pub fn today_label() -> String {
    hindi_long_date(Local::now().date_naive())
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation took effect.
    pub ok: bool,
    /// Row or note id the operation produced or targeted.
    pub id: Option<u64>,
    /// Human-readable message for the notification area.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<u64>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// One rendered ledger row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: u64,
    pub measurement: f64,
    pub selection: u32,
    pub tool: String,
    pub result: f64,
    /// Currency label, e.g. `₹750.00`.
    pub result_label: String,
}

/// Per-tool usage count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCountView {
    pub tool: String,
    pub count: u32,
}

/// Rendered ledger table and summary panel.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerView {
    pub rows: Vec<RowView>,
    pub unit_price: f64,
    pub unit_price_label: String,
    pub total_measurement_label: String,
    pub total_selection: u64,
    pub total_result_label: String,
    pub row_count: u32,
    /// Catalog order.
    pub tool_counts: Vec<ToolCountView>,
}

/// Export text plus suggested file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub file_name: String,
    pub content: String,
}

/// Note editor form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub title: String,
    pub farmer: String,
    pub date: String,
    pub land_size: String,
    pub tool: String,
    pub content: String,
}

impl From<NoteFields> for NoteForm {
    fn from(value: NoteFields) -> Self {
        Self {
            title: value.title,
            farmer: value.farmer,
            date: value.date,
            land_size: value.land_size,
            tool: value.tool,
            content: value.content,
        }
    }
}

impl From<NoteForm> for NoteFields {
    fn from(value: NoteForm) -> Self {
        Self {
            title: value.title,
            farmer: value.farmer,
            date: value.date,
            land_size: value.land_size,
            tool: value.tool,
            content: value.content,
        }
    }
}

/// One rendered note list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListView {
    pub id: u64,
    pub title: String,
    pub farmer: Option<String>,
    /// Land size with unit, e.g. `2.5 बीघा`.
    pub land_size_label: Option<String>,
    pub tool: Option<String>,
    pub date_label: Option<String>,
    pub preview: String,
    pub updated_label: String,
    pub active: bool,
}

impl From<NoteListItem> for NoteListView {
    fn from(item: NoteListItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            farmer: item.farmer,
            land_size_label: item.land_size.map(|size| format!("{size} बीघा")),
            tool: item.tool,
            date_label: item.date.as_deref().map(note_date_label),
            preview: item.preview,
            updated_label: hindi_date_time(&item.updated.with_timezone(&Local)),
            active: item.active,
        }
    }
}

/// Opaque per-page session owning the ledger and the note store.
#[flutter_rust_bridge::frb(opaque)]
pub struct FarmSession {
    app: FarmApp<SqliteSlotRepository, SystemClock>,
}

impl FarmSession {
    /// Opens a session on `db_path`, or on the configured default path.
    ///
    /// # FFI contract
    /// - Sync call; opens/migrates the slot database.
    /// - Starts file logging when `FARMBOOK_LOG_DIR` is set; a logging
    ///   failure is logged and does not fail the call.
    /// - Unreadable saved notes do not fail the call; see `startup_warning`.
    #[flutter_rust_bridge::frb(sync)]
    pub fn open(db_path: Option<String>) -> Result<FarmSession, String> {
        Self::open_with_config(db_path, AppConfig::from_env())
    }

    fn open_with_config(db_path: Option<String>, config: AppConfig) -> Result<Self, String> {
        if let Err(err) = config.init_logging() {
            warn!("event=session_open module=ffi status=degraded error_code=logging_init_failed error={err}");
        }

        let path: PathBuf = db_path
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(Into::into)
            .unwrap_or(config.db_path);
        let conn = open_db(&path).map_err(|err| format!("session open failed: {err}"))?;
        let repo = SqliteSlotRepository::try_new(conn)
            .map_err(|err| format!("session storage init failed: {err}"))?;
        let app = FarmApp::open(repo, SystemClock);
        info!(
            "event=session_open module=ffi status=ok notes={}",
            app.notes().notes().len()
        );
        Ok(Self { app })
    }

    /// Non-fatal startup problem to show once, if any.
    #[flutter_rust_bridge::frb(sync)]
    pub fn startup_warning(&self) -> Option<String> {
        self.app.startup_warning().map(str::to_string)
    }

    /// Current ledger table and summary.
    #[flutter_rust_bridge::frb(sync)]
    pub fn ledger_view(&self) -> LedgerView {
        let ledger = self.app.ledger();
        let summary = ledger.aggregate();
        LedgerView {
            rows: ledger
                .rows()
                .iter()
                .map(|row| RowView {
                    id: row.id,
                    measurement: row.measurement,
                    selection: row.selection,
                    tool: row.tool.clone(),
                    result: row.result,
                    result_label: rupees(row.result),
                })
                .collect(),
            unit_price: ledger.unit_price(),
            unit_price_label: rupees(ledger.unit_price()),
            total_measurement_label: format!("{:.2} बीघा", summary.total_measurement),
            total_selection: summary.total_selection,
            total_result_label: rupees(summary.total_result),
            row_count: to_u32(summary.row_count),
            tool_counts: TOOLS
                .iter()
                .map(|tool| ToolCountView {
                    tool: tool.name.to_string(),
                    count: to_u32(summary.tool_count(tool.name)),
                })
                .collect(),
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn add_row(&mut self) -> ActionResponse {
        let id = self.app.ledger_mut().add_row();
        ActionResponse::success("Row added.", Some(id))
    }

    /// Applies raw form input to one row.
    #[flutter_rust_bridge::frb(sync)]
    pub fn update_row(
        &mut self,
        id: u64,
        measurement: String,
        selection: String,
        tool: String,
    ) -> ActionResponse {
        let update = RowUpdate::parse(&measurement, &selection, tool);
        if self.app.ledger_mut().update_row(id, update) {
            ActionResponse::success("Row updated.", Some(id))
        } else {
            ActionResponse::failure(format!("Row {id} not found."))
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn delete_row(&mut self, id: u64) -> ActionResponse {
        match self.app.ledger_mut().delete_row(id) {
            Ok(true) => ActionResponse::success("Row deleted.", Some(id)),
            Ok(false) => ActionResponse::failure(format!("Row {id} not found.")),
            Err(LedgerError::MinimumRowRequired) => {
                ActionResponse::failure("At least one row is required.")
            }
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn recompute_all(&mut self) -> ActionResponse {
        self.app.ledger_mut().recompute_all();
        ActionResponse::success("Calculation complete.", None)
    }

    /// Stores the unit price typed into the price field and recomputes all
    /// rows, as the price field does on every keystroke.
    #[flutter_rust_bridge::frb(sync)]
    pub fn set_unit_price(&mut self, raw_price: String) -> ActionResponse {
        let ledger = self.app.ledger_mut();
        ledger.set_unit_price(parse_unit_price(&raw_price));
        ledger.recompute_all();
        ActionResponse::success(rupees(ledger.unit_price()), None)
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn clear_inputs(&mut self) -> ActionResponse {
        self.app.ledger_mut().clear_inputs();
        ActionResponse::success("All inputs cleared.", None)
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn reset_ledger(&mut self) -> ActionResponse {
        self.app.ledger_mut().reset();
        ActionResponse::success("Ledger reset.", None)
    }

    /// Renders the export file for the download collaborator.
    #[flutter_rust_bridge::frb(sync)]
    pub fn export_rows(&self) -> ExportPayload {
        ExportPayload {
            file_name: export_file_name(Utc::now().date_naive()),
            content: self.app.ledger().export_rows(Utc::now()),
        }
    }

    /// Clears the edit cursor and returns a blank form.
    #[flutter_rust_bridge::frb(sync)]
    pub fn note_create_draft(&mut self) -> NoteForm {
        self.app
            .notes_mut()
            .create_draft(Local::now().date_naive())
            .into()
    }

    /// Saves the form as a new note or as an edit of the loaded note.
    ///
    /// # FFI contract
    /// - Validation and storage failures return `ok=false`; state is unchanged.
    #[flutter_rust_bridge::frb(sync)]
    pub fn note_save(&mut self, form: NoteForm) -> ActionResponse {
        match self.app.notes_mut().save(form.into()) {
            Ok(SaveOutcome::Created(id)) => ActionResponse::success("Note saved.", Some(id)),
            Ok(SaveOutcome::Updated(id)) => ActionResponse::success("Note updated.", Some(id)),
            Err(NoteStoreError::Validation(err)) => ActionResponse::failure(err.to_string()),
            Err(err) => {
                warn!("event=note_save module=ffi status=error error={err}");
                ActionResponse::failure(format!("note_save failed: {err}"))
            }
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn note_delete(&mut self, id: u64) -> ActionResponse {
        match self.app.notes_mut().delete(id) {
            Ok(true) => ActionResponse::success("Note deleted.", Some(id)),
            Ok(false) => ActionResponse::failure(format!("Note {id} not found.")),
            Err(err) => ActionResponse::failure(format!("note_delete failed: {err}")),
        }
    }

    /// Loads one note into the editor; `None` when it no longer exists.
    #[flutter_rust_bridge::frb(sync)]
    pub fn note_load(&mut self, id: u64) -> Option<NoteForm> {
        self.app.notes_mut().load_note(id).map(Into::into)
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn current_note_id(&self) -> Option<u64> {
        self.app.notes().current_note_id()
    }

    /// Note list filtered by `term`, in stored order.
    #[flutter_rust_bridge::frb(sync)]
    pub fn note_search(&self, term: String) -> Vec<NoteListView> {
        self.app
            .notes()
            .list_items(&term)
            .into_iter()
            .map(Into::into)
            .collect()
    }
}

fn rupees(value: f64) -> String {
    format!("₹{value:.2}")
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
