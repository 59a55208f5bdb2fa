//! Ledger row model and aggregate projection.

use crate::model::tool::{default_tool_name, TOOLS};
use std::collections::BTreeMap;

/// Ledger-local row identifier. Monotonic, never reused.
pub type RowId = u64;

/// One measurement/selection/tool line of the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: RowId,
    /// Plot measurement (bigha). Never negative.
    pub measurement: f64,
    /// Multiplier in `1..=5`.
    pub selection: u32,
    /// Tool display name, stored verbatim.
    pub tool: String,
    /// `measurement * selection * unit_price` as of the last recompute.
    pub result: f64,
}

impl Row {
    /// Creates a row with default inputs: measurement 0, selection 1 and the
    /// default catalog tool.
    pub fn new(id: RowId) -> Self {
        Self {
            id,
            measurement: 0.0,
            selection: 1,
            tool: default_tool_name().to_string(),
            result: 0.0,
        }
    }

    /// Re-derives `result` from stored inputs.
    pub fn recompute(&mut self, unit_price: f64) {
        self.result = self.measurement * f64::from(self.selection) * unit_price;
    }
}

/// Totals over the whole ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSummary {
    pub total_measurement: f64,
    pub total_selection: u64,
    pub total_result: f64,
    pub row_count: usize,
    /// Row count per catalog tool; every catalog tool is present, even at zero.
    pub per_tool_count: BTreeMap<&'static str, usize>,
}

impl LedgerSummary {
    /// Folds rows into totals. Tools outside the catalog are not counted.
    pub fn from_rows(rows: &[Row]) -> Self {
        let mut per_tool_count = TOOLS
            .iter()
            .map(|tool| (tool.name, 0usize))
            .collect::<BTreeMap<_, _>>();
        let mut summary = Self {
            total_measurement: 0.0,
            total_selection: 0,
            total_result: 0.0,
            row_count: rows.len(),
            per_tool_count: BTreeMap::new(),
        };

        for row in rows {
            summary.total_measurement += row.measurement;
            summary.total_selection += u64::from(row.selection);
            summary.total_result += row.result;
            if let Some(count) = per_tool_count.get_mut(row.tool.as_str()) {
                *count += 1;
            }
        }

        summary.per_tool_count = per_tool_count;
        summary
    }

    /// Count for one tool name; zero for unknown names.
    pub fn tool_count(&self, name: &str) -> usize {
        self.per_tool_count.get(name).copied().unwrap_or(0)
    }
}
