use leadflow_core::{Board, BoardError, BoardIntegrityError, MoveRequest, NewLead, Priority, Status};
use uuid::Uuid;

fn new_lead(name: &str, status: Status) -> NewLead {
    NewLead {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "555-0100".to_string(),
        company: "Acme".to_string(),
        source: "referral".to_string(),
        notes: String::new(),
        priority: Priority::Medium,
        status,
    }
}

#[test]
fn add_lead_appends_to_matching_column() {
    let mut board = Board::new();
    let first = board.add_lead(new_lead("Ada", Status::New)).unwrap();
    let second = board.add_lead(new_lead("Grace", Status::New)).unwrap();
    let other = board.add_lead(new_lead("Linus", Status::Contacted)).unwrap();

    assert_eq!(board.column(Status::New).lead_ids, vec![first, second]);
    assert_eq!(board.column(Status::Contacted).lead_ids, vec![other]);
    assert_eq!(board.len(), 3);
    board.verify_integrity().unwrap();
}

#[test]
fn add_lead_rejects_invalid_input() {
    let mut board = Board::new();
    let mut invalid = new_lead("", Status::New);
    invalid.name = "   ".to_string();

    let err = board.add_lead(invalid).unwrap_err();
    assert!(matches!(err, BoardError::Validation(_)));
    assert!(board.is_empty());
}

#[test]
fn update_lead_in_place_keeps_column_slot() {
    let mut board = Board::new();
    let id = board.add_lead(new_lead("Ada", Status::New)).unwrap();
    board.add_lead(new_lead("Grace", Status::New)).unwrap();

    let mut lead = board.get_lead(id).unwrap().clone();
    lead.company = "Initech".to_string();
    board.update_lead(lead).unwrap();

    assert_eq!(board.column(Status::New).lead_ids[0], id);
    assert_eq!(board.get_lead(id).unwrap().company, "Initech");
    board.verify_integrity().unwrap();
}

#[test]
fn update_lead_with_status_change_rehomes_id() {
    let mut board = Board::new();
    let id = board.add_lead(new_lead("Ada", Status::New)).unwrap();
    let stays = board.add_lead(new_lead("Grace", Status::New)).unwrap();

    let mut lead = board.get_lead(id).unwrap().clone();
    lead.status = Status::Negotiation;
    board.update_lead(lead).unwrap();

    assert_eq!(board.column(Status::New).lead_ids, vec![stays]);
    assert_eq!(board.column(Status::Negotiation).lead_ids, vec![id]);
    assert_eq!(board.get_lead(id).unwrap().status, Status::Negotiation);
    board.verify_integrity().unwrap();
}

#[test]
fn update_lead_stamps_updated_at() {
    let mut board = Board::new();
    let id = board.add_lead(new_lead("Ada", Status::New)).unwrap();

    let mut lead = board.get_lead(id).unwrap().clone();
    let created_at = lead.created_at;
    lead.notes = "called twice".to_string();
    board.update_lead(lead).unwrap();

    let stored = board.get_lead(id).unwrap();
    assert!(stored.updated_at >= created_at);
}

#[test]
fn update_unknown_lead_is_not_found() {
    let mut board = Board::new();
    let id = board.add_lead(new_lead("Ada", Status::New)).unwrap();
    let mut ghost = board.get_lead(id).unwrap().clone();
    ghost.id = Uuid::new_v4();

    let err = board.update_lead(ghost.clone()).unwrap_err();
    assert!(matches!(err, BoardError::NotFound(found) if found == ghost.id));
}

#[test]
fn delete_lead_removes_from_map_and_column() {
    let mut board = Board::new();
    let id = board.add_lead(new_lead("Ada", Status::New)).unwrap();
    let keeps = board.add_lead(new_lead("Grace", Status::New)).unwrap();

    let removed = board.delete_lead(id).unwrap();
    assert_eq!(removed.id, id);
    assert!(board.get_lead(id).is_none());
    assert_eq!(board.column(Status::New).lead_ids, vec![keeps]);
    board.verify_integrity().unwrap();

    let err = board.delete_lead(id).unwrap_err();
    assert!(matches!(err, BoardError::NotFound(found) if found == id));
}

#[test]
fn move_within_column_reorders() {
    let mut board = Board::new();
    let a = board.add_lead(new_lead("Ada", Status::New)).unwrap();
    let b = board.add_lead(new_lead("Grace", Status::New)).unwrap();
    let c = board.add_lead(new_lead("Linus", Status::New)).unwrap();

    board
        .move_lead(MoveRequest {
            from_status: Status::New,
            from_index: 2,
            to_status: Status::New,
            to_index: 0,
        })
        .unwrap();

    assert_eq!(board.column(Status::New).lead_ids, vec![c, a, b]);
    board.verify_integrity().unwrap();
}

#[test]
fn move_across_columns_rewrites_status() {
    let mut board = Board::new();
    let a = board.add_lead(new_lead("Ada", Status::New)).unwrap();
    let b = board.add_lead(new_lead("Grace", Status::New)).unwrap();
    let c = board.add_lead(new_lead("Linus", Status::Contacted)).unwrap();

    board
        .move_lead(MoveRequest {
            from_status: Status::New,
            from_index: 0,
            to_status: Status::Contacted,
            to_index: 1,
        })
        .unwrap();

    assert_eq!(board.column(Status::New).lead_ids, vec![b]);
    assert_eq!(board.column(Status::Contacted).lead_ids, vec![c, a]);
    assert_eq!(board.get_lead(a).unwrap().status, Status::Contacted);
    board.verify_integrity().unwrap();
}

#[test]
fn move_across_columns_accepts_end_of_list_slot() {
    let mut board = Board::new();
    let a = board.add_lead(new_lead("Ada", Status::New)).unwrap();
    let b = board.add_lead(new_lead("Grace", Status::Contacted)).unwrap();
    let c = board.add_lead(new_lead("Linus", Status::Contacted)).unwrap();

    // to_index == destination length: append after the last card.
    board
        .move_lead(MoveRequest {
            from_status: Status::New,
            from_index: 0,
            to_status: Status::Contacted,
            to_index: 2,
        })
        .unwrap();

    assert_eq!(board.column(Status::Contacted).lead_ids, vec![b, c, a]);
    board.verify_integrity().unwrap();
}

#[test]
fn move_to_same_slot_is_noop() {
    let mut board = Board::new();
    let a = board.add_lead(new_lead("Ada", Status::New)).unwrap();
    let before = board.clone();

    board
        .move_lead(MoveRequest {
            from_status: Status::New,
            from_index: 0,
            to_status: Status::New,
            to_index: 0,
        })
        .unwrap();

    assert_eq!(board, before);
    assert_eq!(board.column(Status::New).lead_ids, vec![a]);
}

#[test]
fn move_with_out_of_range_index_is_rejected() {
    let mut board = Board::new();
    board.add_lead(new_lead("Ada", Status::New)).unwrap();

    let err = board
        .move_lead(MoveRequest {
            from_status: Status::New,
            from_index: 5,
            to_status: Status::Contacted,
            to_index: 0,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        BoardError::IndexOutOfRange {
            status: Status::New,
            index: 5,
            ..
        }
    ));

    let err = board
        .move_lead(MoveRequest {
            from_status: Status::New,
            from_index: 0,
            to_status: Status::Contacted,
            to_index: 3,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        BoardError::IndexOutOfRange {
            status: Status::Contacted,
            index: 3,
            ..
        }
    ));
}

#[test]
fn set_status_moves_to_end_of_target_column() {
    let mut board = Board::new();
    let a = board.add_lead(new_lead("Ada", Status::New)).unwrap();
    let b = board.add_lead(new_lead("Grace", Status::Closed)).unwrap();

    board.set_status(a, Status::Closed).unwrap();

    assert!(board.column(Status::New).lead_ids.is_empty());
    assert_eq!(board.column(Status::Closed).lead_ids, vec![b, a]);
    assert_eq!(board.get_lead(a).unwrap().status, Status::Closed);
    board.verify_integrity().unwrap();

    // Same-status call leaves column order untouched.
    board.set_status(a, Status::Closed).unwrap();
    assert_eq!(board.column(Status::Closed).lead_ids, vec![b, a]);
}

#[test]
fn set_priority_updates_field_only() {
    let mut board = Board::new();
    let a = board.add_lead(new_lead("Ada", Status::New)).unwrap();

    board.set_priority(a, Priority::High).unwrap();

    assert_eq!(board.get_lead(a).unwrap().priority, Priority::High);
    assert_eq!(board.column(Status::New).lead_ids, vec![a]);

    let err = board.set_priority(Uuid::new_v4(), Priority::Low).unwrap_err();
    assert!(matches!(err, BoardError::NotFound(_)));
}

#[test]
fn verify_integrity_detects_manual_corruption() {
    let mut board = Board::new();
    let id = board.add_lead(new_lead("Ada", Status::New)).unwrap();
    board.verify_integrity().unwrap();

    // Desynchronize the views through the serialized form, the only
    // corruption vector available to callers.
    let mut value: serde_json::Value = serde_json::to_value(&board).unwrap();
    value["leads"][id.to_string()]["status"] = serde_json::json!("closed");
    let corrupted: Board = serde_json::from_value(value).unwrap();

    let err = corrupted.verify_integrity().unwrap_err();
    assert!(matches!(
        err,
        BoardIntegrityError::StatusMismatch {
            column: Status::New,
            lead_status: Status::Closed,
            ..
        }
    ));
}

#[test]
fn verify_integrity_requires_a_column_for_every_status() {
    let board = Board::new();
    let mut value: serde_json::Value = serde_json::to_value(&board).unwrap();
    value["columns"]
        .as_array_mut()
        .unwrap()
        .retain(|column| column["status"] != "closed");
    let corrupted: Board = serde_json::from_value(value).unwrap();

    let err = corrupted.verify_integrity().unwrap_err();
    assert_eq!(err, BoardIntegrityError::MissingColumn(Status::Closed));
}

#[test]
fn verify_integrity_rejects_duplicate_columns() {
    let board = Board::new();
    let mut value: serde_json::Value = serde_json::to_value(&board).unwrap();
    let columns = value["columns"].as_array_mut().unwrap();
    let first = columns[0].clone();
    columns.push(first);
    let corrupted: Board = serde_json::from_value(value).unwrap();

    let err = corrupted.verify_integrity().unwrap_err();
    assert_eq!(err, BoardIntegrityError::DuplicateColumn(Status::New));
}

#[test]
fn verify_integrity_detects_unknown_listed_id() {
    let board = Board::new();
    let mut value: serde_json::Value = serde_json::to_value(&board).unwrap();
    value["columns"][0]["lead_ids"] = serde_json::json!([Uuid::new_v4().to_string()]);
    let corrupted: Board = serde_json::from_value(value).unwrap();

    let err = corrupted.verify_integrity().unwrap_err();
    assert!(matches!(err, BoardIntegrityError::UnknownListedId { .. }));
}
