use farmbook_core::{Ledger, LedgerError, RowUpdate, DEFAULT_UNIT_PRICE};
use std::collections::HashSet;

#[test]
fn default_ledger_has_two_blank_rows_at_default_price() {
    let ledger = Ledger::new();
    let ids = ledger.rows().iter().map(|row| row.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(ledger.unit_price(), DEFAULT_UNIT_PRICE);
    for row in ledger.rows() {
        assert_eq!(row.measurement, 0.0);
        assert_eq!(row.selection, 1);
        assert_eq!(row.tool, "हैरो");
        assert_eq!(row.result, 0.0);
    }
}

#[test]
fn update_row_computes_result_and_total() {
    let mut ledger = Ledger::new();
    assert!(ledger.update_row(1, RowUpdate::new(2.5, 3, "हैरो")));

    let row = ledger.row(1).unwrap();
    assert_eq!(format!("{:.2}", row.result), "750.00");
    assert_eq!(format!("{:.2}", ledger.aggregate().total_result), "750.00");
    assert_eq!(ledger.row(2).unwrap().result, 0.0);
}

#[test]
fn update_row_is_idempotent_and_ignores_unknown_ids() {
    let mut ledger = Ledger::new();
    let update = RowUpdate::parse("1.75", "4", "टिलर");
    ledger.update_row(2, update.clone());
    let once = ledger.clone();
    ledger.update_row(2, update.clone());
    assert_eq!(ledger, once);

    assert!(!ledger.update_row(42, update));
    assert_eq!(ledger, once);
}

#[test]
fn update_row_coerces_malformed_text_input() {
    let mut ledger = Ledger::new();
    ledger.update_row(1, RowUpdate::parse("abc", "", "रूटर"));
    let row = ledger.row(1).unwrap();
    assert_eq!(row.measurement, 0.0);
    assert_eq!(row.selection, 1);
    assert_eq!(row.tool, "रूटर");
}

#[test]
fn add_and_delete_keep_ids_unique_and_at_least_one_row() {
    let mut ledger = Ledger::new();
    let mut seen = ledger.rows().iter().map(|row| row.id).collect::<HashSet<_>>();

    for step in 0..20u64 {
        if step % 3 == 2 {
            let victim = ledger.rows()[0].id;
            let _ = ledger.delete_row(victim);
        } else {
            let id = ledger.add_row();
            assert!(seen.insert(id), "id {id} was reused");
        }
        assert!(!ledger.rows().is_empty());
        let ids = ledger.rows().iter().map(|row| row.id).collect::<HashSet<_>>();
        assert_eq!(ids.len(), ledger.rows().len());
        assert!(ledger.rows().iter().all(|row| row.id < ledger.next_row_id()));
    }
}

#[test]
fn delete_does_not_renumber_remaining_rows() {
    let mut ledger = Ledger::new();
    ledger.add_row();
    assert_eq!(ledger.delete_row(2), Ok(true));
    let ids = ledger.rows().iter().map(|row| row.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(ledger.add_row(), 4);
}

#[test]
fn delete_sole_row_is_rejected_without_change() {
    let mut ledger = Ledger::new();
    ledger.delete_row(1).unwrap();
    let before = ledger.clone();

    assert_eq!(ledger.delete_row(2), Err(LedgerError::MinimumRowRequired));
    assert_eq!(ledger, before);
    assert_eq!(ledger.rows().len(), 1);
}

#[test]
fn unit_price_change_waits_for_recompute() {
    let mut ledger = Ledger::new();
    ledger.update_row(1, RowUpdate::new(2.0, 2, "हैरो"));
    ledger.set_unit_price(150.0);
    assert_eq!(ledger.row(1).unwrap().result, 400.0);

    ledger.recompute_all();
    for row in ledger.rows() {
        assert_eq!(
            row.result,
            row.measurement * f64::from(row.selection) * ledger.unit_price()
        );
    }
    assert_eq!(ledger.row(1).unwrap().result, 600.0);
}

#[test]
fn invalid_unit_price_becomes_zero() {
    let mut ledger = Ledger::new();
    ledger.set_unit_price(-10.0);
    assert_eq!(ledger.unit_price(), 0.0);
    ledger.set_unit_price(f64::NAN);
    assert_eq!(ledger.unit_price(), 0.0);
}

#[test]
fn aggregate_sums_rows_and_counts_catalog_tools_only() {
    let mut ledger = Ledger::new();
    ledger.add_row();
    ledger.add_row();
    ledger.update_row(1, RowUpdate::new(1.5, 2, "हैरो"));
    ledger.update_row(2, RowUpdate::new(2.0, 1, "टिलर"));
    ledger.update_row(3, RowUpdate::new(0.5, 5, "टिलर"));
    ledger.update_row(4, RowUpdate::new(1.0, 1, "tractor"));

    let summary = ledger.aggregate();
    assert_eq!(summary.row_count, 4);
    assert_eq!(summary.total_measurement, 5.0);
    assert_eq!(summary.total_selection, 9);
    let expected: f64 = ledger.rows().iter().map(|row| row.result).sum();
    assert_eq!(summary.total_result, expected);
    assert_eq!(summary.tool_count("हैरो"), 1);
    assert_eq!(summary.tool_count("टिलर"), 2);
    assert_eq!(summary.tool_count("रूटर"), 0);
    assert_eq!(summary.tool_count("tractor"), 0);
    assert_eq!(summary.per_tool_count.len(), 3);
}

#[test]
fn clear_inputs_resets_values_but_keeps_rows_and_tools() {
    let mut ledger = Ledger::new();
    ledger.update_row(1, RowUpdate::new(3.0, 4, "रूटर"));
    ledger.clear_inputs();

    let row = ledger.row(1).unwrap();
    assert_eq!(row.measurement, 0.0);
    assert_eq!(row.selection, 1);
    assert_eq!(row.tool, "रूटर");
    assert_eq!(row.result, 0.0);
    assert_eq!(ledger.rows().len(), 2);
}

#[test]
fn reset_restores_initial_state_from_any_prior_state() {
    let mut ledger = Ledger::new();
    for _ in 0..5 {
        ledger.add_row();
    }
    ledger.delete_row(1).unwrap();
    ledger.update_row(3, RowUpdate::new(9.0, 5, "टिलर"));
    ledger.set_unit_price(275.0);
    ledger.recompute_all();

    ledger.reset();

    assert_eq!(ledger, Ledger::new());
    let ids = ledger.rows().iter().map(|row| row.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(ledger.unit_price(), 100.0);
    assert!(ledger.rows().iter().all(|row| row.result == 0.0));
}
