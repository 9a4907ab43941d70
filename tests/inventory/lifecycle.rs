//! Create, read, update and delete flows.

use chrono::Utc;
use inventory_service::{
    FieldSet, NewRecord, Outcome, RecordUpdate, WorkflowError, LAST_UPDATED, STOCK_QUANTITY,
    WAREHOUSE_LOCATION,
};

use crate::support::workflow;

#[test]
fn create_then_get_round_trip() {
    let wf = workflow();
    let before = Utc::now();

    let outcome = wf.create(NewRecord::new(1, 100, "BODEGA-A")).unwrap();
    assert!(matches!(outcome, Outcome::Created(_)));

    let record = wf.get(1).unwrap();
    assert_eq!(record.stock_quantity, 100);
    assert_eq!(record.warehouse_location, "BODEGA-A");
    assert!(record.last_updated >= before);
}

#[test]
fn create_on_present_id_is_rejected_without_mutation() {
    let wf = workflow();
    wf.create(NewRecord::new(1, 100, "BODEGA-A")).unwrap();
    let original = wf.get(1).unwrap();

    for _ in 0..3 {
        let err = wf.create(NewRecord::new(1, 5, "BODEGA-Z")).unwrap_err();
        assert_eq!(err, WorkflowError::AlreadyExists(1));
    }

    assert_eq!(wf.get(1).unwrap(), original);
}

#[test]
fn create_rejects_negative_stock_and_blank_location() {
    let wf = workflow();

    let err = wf.create(NewRecord::new(1, -10, "BODEGA-A")).unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));

    let err = wf.create(NewRecord::new(1, 10, "")).unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));

    assert_eq!(wf.get(1).unwrap_err(), WorkflowError::NotFound(1));
}

#[test]
fn create_accepts_zero_stock() {
    let wf = workflow();
    wf.create(NewRecord::new(1, 0, "BODEGA-A")).unwrap();
    assert_eq!(wf.get(1).unwrap().stock_quantity, 0);
}

#[test]
fn get_missing_is_not_found() {
    let wf = workflow();
    assert_eq!(wf.get(42).unwrap_err(), WorkflowError::NotFound(42));
}

#[test]
fn full_update_replaces_stock_and_location() {
    let wf = workflow();
    wf.create(NewRecord::new(1, 100, "BODEGA-A")).unwrap();
    let created_at = wf.get(1).unwrap().last_updated;

    let outcome = wf.update_full(1, RecordUpdate::new(75, "BODEGA-B")).unwrap();
    assert!(matches!(outcome, Outcome::Updated(_)));

    let record = wf.get(1).unwrap();
    assert_eq!(record.stock_quantity, 75);
    assert_eq!(record.warehouse_location, "BODEGA-B");
    assert!(record.last_updated >= created_at);
}

#[test]
fn full_update_requires_a_location() {
    let wf = workflow();
    wf.create(NewRecord::new(1, 100, "BODEGA-A")).unwrap();

    let err = wf.update_full(1, RecordUpdate::stock(10)).unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));
    assert_eq!(wf.get(1).unwrap().stock_quantity, 100);
}

#[test]
fn full_update_on_missing_is_not_found() {
    let wf = workflow();
    let err = wf.update_full(9, RecordUpdate::new(1, "A")).unwrap_err();
    assert_eq!(err, WorkflowError::NotFound(9));
}

#[test]
fn stock_only_update_leaves_location_untouched() {
    let wf = workflow();
    wf.create(NewRecord::new(1, 100, "BODEGA-A")).unwrap();

    wf.update_stock_only(1, RecordUpdate::new(50, "IGNORED"))
        .unwrap();

    let record = wf.get(1).unwrap();
    assert_eq!(record.stock_quantity, 50);
    assert_eq!(record.warehouse_location, "BODEGA-A");
}

#[test]
fn stock_only_update_rejects_negative_stock() {
    let wf = workflow();
    wf.create(NewRecord::new(1, 100, "BODEGA-A")).unwrap();

    let err = wf.update_stock_only(1, RecordUpdate::stock(-1)).unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));
    assert_eq!(wf.get(1).unwrap().stock_quantity, 100);
}

#[test]
fn stock_only_update_on_missing_is_not_found() {
    let wf = workflow();
    let err = wf.update_stock_only(3, RecordUpdate::stock(1)).unwrap_err();
    assert_eq!(err, WorkflowError::NotFound(3));
}

#[test]
fn partial_update_applies_only_present_fields() {
    let wf = workflow();
    wf.create(NewRecord::new(1, 100, "BODEGA-A")).unwrap();

    let fields = FieldSet::new().with(WAREHOUSE_LOCATION, "BODEGA-C");
    wf.update_partial(1, &fields).unwrap();

    let record = wf.get(1).unwrap();
    assert_eq!(record.stock_quantity, 100);
    assert_eq!(record.warehouse_location, "BODEGA-C");
}

#[test]
fn partial_update_is_all_or_nothing() {
    let wf = workflow();
    wf.create(NewRecord::new(1, 100, "BODEGA-A")).unwrap();
    let before = wf.get(1).unwrap();

    // Valid stock and location, invalid timestamp: nothing may be written.
    let fields = FieldSet::new()
        .with(STOCK_QUANTITY, 5)
        .with(WAREHOUSE_LOCATION, "BODEGA-Z")
        .with(LAST_UPDATED, "not-a-date");
    let err = wf.update_partial(1, &fields).unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));
    assert_eq!(wf.get(1).unwrap(), before);

    // Invalid stock with a valid location: same rule.
    let fields = FieldSet::new()
        .with(STOCK_QUANTITY, "lots")
        .with(WAREHOUSE_LOCATION, "BODEGA-Z");
    assert!(wf.update_partial(1, &fields).is_err());
    assert_eq!(wf.get(1).unwrap(), before);
}

#[test]
fn partial_update_on_missing_is_not_found() {
    let wf = workflow();
    let fields = FieldSet::new().with(STOCK_QUANTITY, 1);
    assert_eq!(
        wf.update_partial(8, &fields).unwrap_err(),
        WorkflowError::NotFound(8)
    );
}

#[test]
fn delete_then_get_then_delete_again() {
    let wf = workflow();
    wf.create(NewRecord::new(1, 100, "BODEGA-A")).unwrap();

    assert_eq!(wf.delete(1).unwrap(), Outcome::Deleted(1));
    assert_eq!(wf.get(1).unwrap_err(), WorkflowError::NotFound(1));
    assert_eq!(wf.delete(1).unwrap_err(), WorkflowError::NotFound(1));
}

#[test]
fn deleted_id_can_be_created_again() {
    let wf = workflow();
    wf.create(NewRecord::new(1, 100, "BODEGA-A")).unwrap();
    wf.delete(1).unwrap();

    wf.create(NewRecord::new(1, 7, "BODEGA-B")).unwrap();
    assert_eq!(wf.get(1).unwrap().stock_quantity, 7);
}
