//! Store faults: reads fail open, writes surface `WorkflowError::Store`.

use inventory_service::{
    FieldSet, InMemoryRecordStore, InventoryWorkflow, NewRecord, RecordUpdate, StoreError,
    WorkflowError, STOCK_QUANTITY,
};

use crate::support::FaultyStore;

fn populated() -> InMemoryRecordStore {
    let inner = InMemoryRecordStore::new();
    InventoryWorkflow::new(inner.clone())
        .create(NewRecord::new(1, 10, "BODEGA-A"))
        .unwrap();
    inner
}

#[test]
fn reads_fail_open_to_empty() {
    let wf = InventoryWorkflow::new(FaultyStore::failing_reads(populated()));

    assert!(wf.list_all().is_empty());
    assert!(wf.find_by_location("BODEGA").is_empty());
    assert!(wf.find_by_stock_range(0, 100).is_empty());
    assert!(!wf.check_stock_sufficient(1, 1));
}

#[test]
fn point_read_fault_is_not_reported_as_not_found() {
    let wf = InventoryWorkflow::new(FaultyStore::failing_reads(populated()));

    let err = wf.get(1).unwrap_err();
    assert_eq!(
        err,
        WorkflowError::Store(StoreError::Unavailable("connection refused".into()))
    );
    assert_eq!(err.status_code(), 500);
}

#[test]
fn write_faults_surface_as_store_errors() {
    let wf = InventoryWorkflow::new(FaultyStore::failing_writes(populated()));

    let create = wf.create(NewRecord::new(2, 1, "BODEGA-B")).unwrap_err();
    assert!(matches!(create, WorkflowError::Store(StoreError::Constraint(_))));

    let update = wf.update_full(1, RecordUpdate::new(1, "B")).unwrap_err();
    assert!(matches!(update, WorkflowError::Store(_)));

    let stock = wf.update_stock_only(1, RecordUpdate::stock(1)).unwrap_err();
    assert!(matches!(stock, WorkflowError::Store(_)));

    let partial = wf
        .update_partial(1, &FieldSet::new().with(STOCK_QUANTITY, 1))
        .unwrap_err();
    assert!(matches!(partial, WorkflowError::Store(_)));

    let delete = wf.delete(1).unwrap_err();
    assert!(matches!(delete, WorkflowError::Store(_)));

    // Reads still work and nothing changed.
    assert_eq!(wf.get(1).unwrap().stock_quantity, 10);
}

#[test]
fn not_found_and_already_exists_win_over_write_faults() {
    let wf = InventoryWorkflow::new(FaultyStore::failing_writes(populated()));

    assert_eq!(
        wf.create(NewRecord::new(1, 1, "A")).unwrap_err(),
        WorkflowError::AlreadyExists(1)
    );
    assert_eq!(wf.delete(2).unwrap_err(), WorkflowError::NotFound(2));
}
