use staffdesk_core::{
    open_store_in_memory, EmployeeDraft, EmployeePatch, KeyValueStorage, RecordStore,
    SqliteKeyValueStorage, RECORDS_KEY,
};

fn setup() -> rusqlite::Connection {
    open_store_in_memory().unwrap()
}

fn draft(name: &str, email: &str, role: &str, join_date: &str) -> EmployeeDraft {
    EmployeeDraft {
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        join_date: join_date.to_string(),
    }
}

/// Hydrates a store over an explicitly empty persisted collection.
fn open_empty(conn: &rusqlite::Connection) -> RecordStore<SqliteKeyValueStorage<'_>> {
    SqliteKeyValueStorage::new(conn)
        .put_raw(RECORDS_KEY, "[]")
        .unwrap();
    RecordStore::open(SqliteKeyValueStorage::new(conn)).unwrap()
}

#[test]
fn absent_key_seeds_the_default_dataset_and_persists_it() {
    let conn = setup();
    let store = RecordStore::open(SqliteKeyValueStorage::new(&conn)).unwrap();

    assert_eq!(store.len(), 12);
    assert_eq!(store.records()[0].id, 1);
    assert_eq!(store.records()[11].id, 12);

    // Seeding wrote through immediately.
    let raw = SqliteKeyValueStorage::new(&conn)
        .get_raw(RECORDS_KEY)
        .unwrap()
        .unwrap();
    assert!(raw.contains("Budi Santoso"));
}

#[test]
fn corrupt_key_reseeds_the_default_dataset() {
    let conn = setup();
    SqliteKeyValueStorage::new(&conn)
        .put_raw(RECORDS_KEY, "[{\"id\": \"oops\"")
        .unwrap();

    let store = RecordStore::open(SqliteKeyValueStorage::new(&conn)).unwrap();
    assert_eq!(store.len(), 12);

    // And the persisted value is the seed again, not the corrupt text.
    let reopened = RecordStore::open(SqliteKeyValueStorage::new(&conn)).unwrap();
    assert_eq!(reopened.records(), store.records());
}

#[test]
fn add_on_empty_collection_allocates_sequential_ids() {
    let conn = setup();
    let mut store = open_empty(&conn);
    assert!(store.is_empty());

    let first = store
        .add(draft("A", "a@x.com", "R", "2024-01-01"))
        .unwrap();
    assert_eq!(first.id, 1);

    let second = store
        .add(draft("B", "b@x.com", "R", "2024-01-02"))
        .unwrap();
    assert_eq!(second.id, 2);

    assert_eq!(store.len(), 2);
    assert_eq!(store.records()[0].id, 1);
    assert_eq!(store.records()[1].id, 2);
}

#[test]
fn deleting_the_max_id_makes_it_available_again() {
    let conn = setup();
    let mut store = RecordStore::open(SqliteKeyValueStorage::new(&conn)).unwrap();
    assert_eq!(store.next_id(), 13);

    assert!(store.delete(12).unwrap());
    assert_eq!(store.next_id(), 12);

    let added = store
        .add(draft("New Hire", "new@company.com", "Intern", "2025-01-06"))
        .unwrap();
    assert_eq!(added.id, 12);
}

#[test]
fn deleting_a_middle_id_does_not_affect_allocation() {
    let conn = setup();
    let mut store = RecordStore::open(SqliteKeyValueStorage::new(&conn)).unwrap();

    assert!(store.delete(5).unwrap());
    assert_eq!(store.next_id(), 13);
}

#[test]
fn update_merges_in_place_preserving_id_and_position() {
    let conn = setup();
    let mut store = RecordStore::open(SqliteKeyValueStorage::new(&conn)).unwrap();

    let updated = store
        .update(
            3,
            &EmployeePatch {
                role: Some("Design Lead".to_string()),
                ..EmployeePatch::default()
            },
        )
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, 3);
    assert_eq!(updated.role, "Design Lead");
    assert_eq!(updated.name, "Agus Pratama");
    // Position unchanged: still the third record.
    assert_eq!(store.records()[2].id, 3);
    assert_eq!(store.records()[2].role, "Design Lead");
}

#[test]
fn update_and_delete_on_unknown_id_leave_state_untouched() {
    let conn = setup();
    let mut store = RecordStore::open(SqliteKeyValueStorage::new(&conn)).unwrap();
    let before = store.records().to_vec();
    let raw_before = SqliteKeyValueStorage::new(&conn)
        .get_raw(RECORDS_KEY)
        .unwrap()
        .unwrap();

    let updated = store
        .update(
            999,
            &EmployeePatch {
                name: Some("Ghost".to_string()),
                ..EmployeePatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated, None);

    let deleted = store.delete(999).unwrap();
    assert!(!deleted);

    assert_eq!(store.records(), before.as_slice());
    let raw_after = SqliteKeyValueStorage::new(&conn)
        .get_raw(RECORDS_KEY)
        .unwrap()
        .unwrap();
    assert_eq!(raw_after, raw_before);
}

#[test]
fn get_by_id_matches_exactly() {
    let conn = setup();
    let store = RecordStore::open(SqliteKeyValueStorage::new(&conn)).unwrap();

    assert_eq!(store.get_by_id(7).unwrap().name, "Andi Wijaya");
    assert_eq!(store.get_by_id(999), None);
}

#[test]
fn get_by_id_text_coerces_route_parameters() {
    let conn = setup();
    let store = RecordStore::open(SqliteKeyValueStorage::new(&conn)).unwrap();

    assert_eq!(store.get_by_id_text("7").unwrap().id, 7);
    assert_eq!(store.get_by_id_text(" 7 ").unwrap().id, 7);
    assert_eq!(store.get_by_id_text("seven"), None);
    assert_eq!(store.get_by_id_text(""), None);
}

#[test]
fn empty_search_term_returns_the_full_collection_in_order() {
    let conn = setup();
    let store = RecordStore::open(SqliteKeyValueStorage::new(&conn)).unwrap();

    let all = store.filtered("");
    assert_eq!(all.len(), 12);
    let ids: Vec<i64> = all.iter().map(|record| record.id).collect();
    assert_eq!(ids, (1..=12).collect::<Vec<i64>>());
}

#[test]
fn search_matches_roles_case_insensitively_in_original_order() {
    let conn = setup();
    let store = RecordStore::open(SqliteKeyValueStorage::new(&conn)).unwrap();

    let developers = store.filtered("DEVELOPER");
    let ids: Vec<i64> = developers.iter().map(|record| record.id).collect();
    // Frontend, Backend and Mobile Developer rows, in insertion order.
    assert_eq!(ids, vec![1, 2, 7]);
}

#[test]
fn search_matches_name_and_email_fields_too() {
    let conn = setup();
    let store = RecordStore::open(SqliteKeyValueStorage::new(&conn)).unwrap();

    let by_name = store.filtered("budi");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, 1);

    let by_email = store.filtered("maya@company");
    assert_eq!(by_email.len(), 1);
    assert_eq!(by_email[0].id, 6);
}

#[test]
fn filtering_never_mutates_stored_state() {
    let conn = setup();
    let store = RecordStore::open(SqliteKeyValueStorage::new(&conn)).unwrap();
    let before = store.records().to_vec();

    let _ = store.filtered("developer");
    let _ = store.filtered("");

    assert_eq!(store.records(), before.as_slice());
}

#[test]
fn every_mutation_is_visible_to_a_fresh_store() {
    let conn = setup();
    let mut store = RecordStore::open(SqliteKeyValueStorage::new(&conn)).unwrap();

    store
        .add(draft("New Hire", "new@company.com", "Intern", "2025-01-06"))
        .unwrap();
    store
        .update(
            1,
            &EmployeePatch {
                role: Some("Principal Engineer".to_string()),
                ..EmployeePatch::default()
            },
        )
        .unwrap();
    store.delete(2).unwrap();

    let reopened = RecordStore::open(SqliteKeyValueStorage::new(&conn)).unwrap();
    assert_eq!(reopened.records(), store.records());
    assert_eq!(reopened.get_by_id(1).unwrap().role, "Principal Engineer");
    assert_eq!(reopened.get_by_id(2), None);
    assert_eq!(reopened.get_by_id(13).unwrap().name, "New Hire");
}
