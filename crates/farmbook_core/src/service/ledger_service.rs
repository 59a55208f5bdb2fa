//! Row ledger use-case service.
//!
//! # Responsibility
//! - Own rows, the shared unit price and the row id counter.
//! - Recompute derived row results and fold totals.
//!
//! # Invariants
//! - At least one row exists at all times.
//! - `next_row_id` is greater than every id ever assigned; ids are never
//!   reused or compacted.
//! - After `recompute_all`, every row satisfies
//!   `result == measurement * selection * unit_price`.
//! - Changing the unit price does not touch stored results until the next
//!   recompute.

use crate::export::csv::render_ledger_csv;
use crate::input::{clamp_selection, parse_measurement, parse_selection, sanitize_non_negative};
use crate::model::row::{LedgerSummary, Row, RowId};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Unit price restored by [`Ledger::reset`].
pub const DEFAULT_UNIT_PRICE: f64 = 100.0;
/// Rows present after initialization and reset.
pub const INITIAL_ROW_COUNT: usize = 2;

/// Ledger operation refusals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerError {
    /// Deleting would leave the ledger without rows.
    MinimumRowRequired,
}

impl Display for LedgerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MinimumRowRequired => write!(f, "at least one row is required"),
        }
    }
}

impl Error for LedgerError {}

/// Sanitized inputs for one row update.
#[derive(Debug, Clone, PartialEq)]
pub struct RowUpdate {
    pub measurement: f64,
    pub selection: u32,
    pub tool: String,
}

impl RowUpdate {
    /// Builds an update from numeric values, coercing out-of-range ones.
    pub fn new(measurement: f64, selection: i64, tool: impl Into<String>) -> Self {
        Self {
            measurement: sanitize_non_negative(measurement),
            selection: if selection == 0 {
                1
            } else {
                clamp_selection(selection)
            },
            tool: tool.into(),
        }
    }

    /// Builds an update from raw form text.
    pub fn parse(measurement: &str, selection: &str, tool: impl Into<String>) -> Self {
        Self {
            measurement: parse_measurement(measurement),
            selection: parse_selection(selection),
            tool: tool.into(),
        }
    }
}

/// In-memory row ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    rows: Vec<Row>,
    unit_price: f64,
    next_row_id: RowId,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Creates an initialized ledger: default price and two blank rows.
    pub fn new() -> Self {
        let mut ledger = Self {
            rows: Vec::with_capacity(INITIAL_ROW_COUNT),
            unit_price: DEFAULT_UNIT_PRICE,
            next_row_id: 1,
        };
        ledger.seed_rows();
        ledger
    }

    /// Rows in insertion order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Finds one row by id.
    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    /// Id the next added row will receive.
    pub fn next_row_id(&self) -> RowId {
        self.next_row_id
    }

    /// Appends a default row and returns its id.
    pub fn add_row(&mut self) -> RowId {
        let id = self.next_row_id;
        self.next_row_id += 1;
        let mut row = Row::new(id);
        row.recompute(self.unit_price);
        self.rows.push(row);
        debug!(
            "event=row_add module=ledger status=ok row_id={id} row_count={}",
            self.rows.len()
        );
        id
    }

    /// Applies field inputs to one row and recomputes its result.
    ///
    /// Returns `false` when no row has `id`; that is not an error.
    /// Repeating the same call leaves state unchanged.
    pub fn update_row(&mut self, id: RowId, update: RowUpdate) -> bool {
        let unit_price = self.unit_price;
        let Some(row) = self.rows.iter_mut().find(|row| row.id == id) else {
            debug!("event=row_update module=ledger status=skipped row_id={id} reason=not_found");
            return false;
        };

        row.measurement = update.measurement;
        row.selection = update.selection;
        row.tool = update.tool;
        row.recompute(unit_price);
        true
    }

    /// Removes one row.
    ///
    /// Returns `Ok(false)` when no row has `id`.
    ///
    /// # Errors
    /// - `MinimumRowRequired` when only one row is left; state is unchanged.
    pub fn delete_row(&mut self, id: RowId) -> Result<bool, LedgerError> {
        if self.rows.len() <= 1 {
            warn!(
                "event=row_delete module=ledger status=rejected row_id={id} error_code=minimum_row_required"
            );
            return Err(LedgerError::MinimumRowRequired);
        }

        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        let removed = self.rows.len() != before;
        debug!(
            "event=row_delete module=ledger status=ok row_id={id} removed={removed} row_count={}",
            self.rows.len()
        );
        Ok(removed)
    }

    /// Stores a new unit price. Existing results keep the old price until
    /// [`Ledger::recompute_all`] runs.
    pub fn set_unit_price(&mut self, price: f64) {
        self.unit_price = sanitize_non_negative(price);
    }

    /// Re-derives every row result from stored inputs and the current price.
    pub fn recompute_all(&mut self) {
        let unit_price = self.unit_price;
        for row in &mut self.rows {
            row.recompute(unit_price);
        }
    }

    /// Resets measurement and selection of every row to defaults, keeping
    /// tools and ids, then recomputes.
    pub fn clear_inputs(&mut self) {
        let unit_price = self.unit_price;
        for row in &mut self.rows {
            row.measurement = 0.0;
            row.selection = 1;
            row.recompute(unit_price);
        }
        info!(
            "event=ledger_clear_inputs module=ledger status=ok row_count={}",
            self.rows.len()
        );
    }

    /// Totals over current state.
    pub fn aggregate(&self) -> LedgerSummary {
        LedgerSummary::from_rows(&self.rows)
    }

    /// Drops every row, restores default price and id counter, then re-seeds
    /// the initial rows.
    pub fn reset(&mut self) {
        self.rows.clear();
        self.next_row_id = 1;
        self.unit_price = DEFAULT_UNIT_PRICE;
        self.seed_rows();
        info!("event=ledger_reset module=ledger status=ok row_count={}", self.rows.len());
    }

    /// Renders rows and totals as comma-separated text.
    pub fn export_rows(&self, exported_at: DateTime<Utc>) -> String {
        render_ledger_csv(&self.rows, &self.aggregate(), self.unit_price, exported_at)
    }

    fn seed_rows(&mut self) {
        for _ in 0..INITIAL_ROW_COUNT {
            self.add_row();
        }
    }
}
