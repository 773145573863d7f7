use leadflow_core::db::{open_db, open_db_in_memory};
use leadflow_core::{
    BoardService, BoardStore, MoveRequest, NewLead, Priority, SqliteStateStore, StateStore,
    Status, StoreError, BOARD_KEY,
};

fn new_lead(name: &str, status: Status) -> NewLead {
    NewLead {
        name: name.to_string(),
        email: String::new(),
        phone: String::new(),
        company: "Acme".to_string(),
        source: "web".to_string(),
        notes: String::new(),
        priority: Priority::Low,
        status,
    }
}

#[test]
fn save_and_load_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let store = BoardStore::new(SqliteStateStore::try_new(&conn).unwrap());

    assert!(store.load().unwrap().is_none());

    let mut board = leadflow_core::Board::new();
    let id = board.add_lead(new_lead("Ada", Status::New)).unwrap();
    store.save(&board).unwrap();

    let restored = store.load().unwrap().expect("snapshot should exist");
    assert_eq!(restored, board);
    assert_eq!(restored.get_lead(id).unwrap().name, "Ada");
}

#[test]
fn expired_snapshot_loads_as_none() {
    let conn = open_db_in_memory().unwrap();
    let store = BoardStore::with_retention(SqliteStateStore::try_new(&conn).unwrap(), -1);

    let mut board = leadflow_core::Board::new();
    board.add_lead(new_lead("Ada", Status::New)).unwrap();
    store.save(&board).unwrap();

    assert!(store.load().unwrap().is_none());
}

#[test]
fn corrupt_snapshot_is_a_typed_error() {
    let conn = open_db_in_memory().unwrap();
    let raw = SqliteStateStore::try_new(&conn).unwrap();
    raw.put(BOARD_KEY, "{not json", None).unwrap();

    let store = BoardStore::new(SqliteStateStore::try_new(&conn).unwrap());
    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::InvalidPayload { .. }));
}

#[test]
fn inconsistent_snapshot_is_rejected_on_load() {
    let conn = open_db_in_memory().unwrap();
    let raw = SqliteStateStore::try_new(&conn).unwrap();

    let mut board = leadflow_core::Board::new();
    let id = board.add_lead(new_lead("Ada", Status::New)).unwrap();

    // Hand-edit the payload so the lead's status disagrees with its column.
    let mut value: serde_json::Value = serde_json::to_value(&board).unwrap();
    value["leads"][id.to_string()]["status"] = serde_json::json!("closed");
    raw.put(BOARD_KEY, &value.to_string(), None).unwrap();

    let store = BoardStore::new(SqliteStateStore::try_new(&conn).unwrap());
    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::InvalidPayload { .. }));
}

#[test]
fn snapshot_missing_a_column_is_rejected_on_load() {
    let conn = open_db_in_memory().unwrap();
    let raw = SqliteStateStore::try_new(&conn).unwrap();

    // Hand-edit the payload so an empty column vanishes entirely. Column
    // iteration assumes one column per status, so this must fail the load
    // instead of surfacing later.
    let board = leadflow_core::Board::new();
    let mut value: serde_json::Value = serde_json::to_value(&board).unwrap();
    value["columns"]
        .as_array_mut()
        .unwrap()
        .retain(|column| column["status"] != "closed");
    raw.put(BOARD_KEY, &value.to_string(), None).unwrap();

    let store = BoardStore::new(SqliteStateStore::try_new(&conn).unwrap());
    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::InvalidPayload { .. }));

    match BoardService::open(SqliteStateStore::try_new(&conn).unwrap()) {
        Err(leadflow_core::ServiceError::Store(StoreError::InvalidPayload { .. })) => {}
        Err(other) => panic!("expected invalid payload error, got {other}"),
        Ok(_) => panic!("expected the corrupt snapshot to fail the open"),
    }
}

#[test]
fn service_persists_every_mutation_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leadflow.db");

    let (ada, grace) = {
        let conn = open_db(&path).unwrap();
        let mut service = BoardService::open(SqliteStateStore::try_new(&conn).unwrap()).unwrap();

        let ada = service.add_lead(new_lead("Ada", Status::New)).unwrap();
        let grace = service.add_lead(new_lead("Grace", Status::New)).unwrap();
        service.set_priority(ada, Priority::High).unwrap();
        service
            .move_lead(MoveRequest {
                from_status: Status::New,
                from_index: 0,
                to_status: Status::Negotiation,
                to_index: 0,
            })
            .unwrap();
        (ada, grace)
    };

    let conn = open_db(&path).unwrap();
    let service = BoardService::open(SqliteStateStore::try_new(&conn).unwrap()).unwrap();
    let board = service.board();

    assert_eq!(board.len(), 2);
    assert_eq!(board.column(Status::New).lead_ids, vec![grace]);
    assert_eq!(board.column(Status::Negotiation).lead_ids, vec![ada]);
    assert_eq!(board.get_lead(ada).unwrap().priority, Priority::High);
    board.verify_integrity().unwrap();
}

#[test]
fn service_delete_round_trips() {
    let conn = open_db_in_memory().unwrap();
    let mut service = BoardService::open(SqliteStateStore::try_new(&conn).unwrap()).unwrap();

    let id = service.add_lead(new_lead("Ada", Status::Contacted)).unwrap();
    let removed = service.delete_lead(id).unwrap();
    assert_eq!(removed.id, id);
    assert!(service.board().is_empty());

    // The persisted snapshot reflects the deletion too.
    let store = BoardStore::new(SqliteStateStore::try_new(&conn).unwrap());
    let snapshot = store.load().unwrap().expect("snapshot should exist");
    assert!(snapshot.is_empty());
}
