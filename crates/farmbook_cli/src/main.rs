//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `farmbook_core` linkage.
//! - Print the default ledger export so output shape can be eyeballed.

use chrono::Utc;
use farmbook_core::{Ledger, RowUpdate};

fn main() {
    println!("farmbook_core version={}", farmbook_core::core_version());

    let mut ledger = Ledger::new();
    ledger.update_row(1, RowUpdate::new(2.5, 3, farmbook_core::default_tool_name()));
    print!("{}", ledger.export_rows(Utc::now()));
}
