use orgmap_core::db::open_db_in_memory;
use orgmap_core::{
    DirectoryError, DirectoryService, ImportRecord, ManagerPatch, NewPerson, PersonUpdate,
    SqliteSnapshotStore,
};
use uuid::Uuid;

fn setup() -> rusqlite::Connection {
    open_db_in_memory().unwrap()
}

fn open_directory(conn: &rusqlite::Connection) -> DirectoryService<SqliteSnapshotStore<'_>> {
    let store = SqliteSnapshotStore::try_new(conn).unwrap();
    DirectoryService::open(store).unwrap()
}

fn two_person_batch() -> Vec<ImportRecord> {
    vec![
        ImportRecord::new("A", "CEO"),
        ImportRecord::new("B", "CTO").with_manager("A"),
    ]
}

#[test]
fn open_seeds_default_dataset_when_store_is_empty() {
    let conn = setup();
    let service = open_directory(&conn);

    assert!(!service.list().is_empty());
    assert!(service.list().iter().any(|person| person.is_hiring));

    // The seed must have been persisted: a second service over the same
    // connection sees the identical working set, ids included.
    let reopened = open_directory(&conn);
    assert_eq!(reopened.list(), service.list());
}

#[test]
fn import_replaces_working_set_instead_of_appending() {
    let conn = setup();
    let mut service = open_directory(&conn);

    let batch = two_person_batch();
    service.import(&batch, &[]).unwrap();
    assert_eq!(service.list().len(), 2);

    service.import(&batch, &[]).unwrap();
    assert_eq!(service.list().len(), 2);
}

#[test]
fn forest_has_bidirectional_consistency() {
    let conn = setup();
    let mut service = open_directory(&conn);
    service
        .import(
            &[
                ImportRecord::new("A", "CEO"),
                ImportRecord::new("B", "CTO").with_manager("A"),
                ImportRecord::new("C", "VP").with_manager("B"),
                ImportRecord::new("D", "Engineer").with_manager("B"),
            ],
            &[],
        )
        .unwrap();

    for person in service.list() {
        let Some(manager_id) = person.manager_id else {
            continue;
        };
        let manager = service.get(manager_id).expect("manager exists");
        let reports = service.employees_of(manager.id);
        let appearances = reports.iter().filter(|r| r.id == person.id).count();
        assert_eq!(appearances, 1, "{} under {}", person.name, manager.name);
        assert_eq!(service.manager_of(person.id).map(|m| m.id), Some(manager_id));
    }

    let forest = service.forest();
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].person.name, "A");
    assert_eq!(forest[0].employees.len(), 1);
    assert_eq!(forest[0].employees[0].employees.len(), 2);
}

#[test]
fn create_appends_under_manager_and_persists() {
    let conn = setup();
    let mut service = open_directory(&conn);
    service.import(&two_person_batch(), &[]).unwrap();
    let a_id = service.list()[0].id;

    let created = service
        .create(NewPerson {
            name: "Carol".to_string(),
            title: "VP Engineering".to_string(),
            manager_id: Some(a_id),
            ..NewPerson::default()
        })
        .unwrap();

    assert_eq!(created.manager_id, Some(a_id));
    assert_eq!(service.list().len(), 3);
    assert!(service
        .employees_of(a_id)
        .iter()
        .any(|person| person.id == created.id));

    let reopened = open_directory(&conn);
    assert!(reopened.get(created.id).is_some());
}

#[test]
fn create_rejects_duplicate_display_name() {
    let conn = setup();
    let mut service = open_directory(&conn);
    service.import(&two_person_batch(), &[]).unwrap();

    let err = service
        .create(NewPerson {
            name: "a".to_string(),
            title: "Impostor".to_string(),
            ..NewPerson::default()
        })
        .unwrap_err();
    assert!(matches!(err, DirectoryError::DuplicateName(name) if name == "a"));
    assert_eq!(service.list().len(), 2);
}

#[test]
fn create_rejects_unknown_or_placeholder_manager() {
    let conn = setup();
    let mut service = open_directory(&conn);
    service.import(&two_person_batch(), &[]).unwrap();
    let unknown = Uuid::new_v4();

    let err = service
        .create(NewPerson {
            name: "Carol".to_string(),
            title: "VP".to_string(),
            manager_id: Some(unknown),
            ..NewPerson::default()
        })
        .unwrap_err();
    assert!(matches!(err, DirectoryError::ManagerNotFound(id) if id == unknown));

    let a_id = service.list()[0].id;
    let opening = service
        .create(NewPerson {
            name: "Open position".to_string(),
            title: "QA Engineer".to_string(),
            manager_id: Some(a_id),
            is_hiring: true,
            ..NewPerson::default()
        })
        .unwrap();

    let err = service
        .create(NewPerson {
            name: "Dave".to_string(),
            title: "QA Engineer".to_string(),
            manager_id: Some(opening.id),
            ..NewPerson::default()
        })
        .unwrap_err();
    assert!(matches!(err, DirectoryError::ManagerIsOpening(id) if id == opening.id));
}

#[test]
fn update_merges_fields_without_touching_id() {
    let conn = setup();
    let mut service = open_directory(&conn);
    service.import(&two_person_batch(), &[]).unwrap();
    let b_id = service.list()[1].id;

    let updated = service
        .update(
            b_id,
            PersonUpdate {
                title: Some("Chief Technology Officer".to_string()),
                location: Some("Berlin".to_string()),
                ..PersonUpdate::default()
            },
        )
        .unwrap();

    assert_eq!(updated.id, b_id);
    assert_eq!(updated.name, "B");
    assert_eq!(updated.title, "Chief Technology Officer");
    assert_eq!(updated.location.as_deref(), Some("Berlin"));
}

#[test]
fn update_supports_reparenting_with_consistent_views() {
    let conn = setup();
    let mut service = open_directory(&conn);
    service
        .import(
            &[
                ImportRecord::new("A", "CEO"),
                ImportRecord::new("B", "CTO").with_manager("A"),
                ImportRecord::new("C", "Engineer").with_manager("A"),
            ],
            &[],
        )
        .unwrap();
    let (b_id, c_id) = (service.list()[1].id, service.list()[2].id);

    service
        .update(
            c_id,
            PersonUpdate {
                manager: Some(ManagerPatch::Assign(b_id)),
                ..PersonUpdate::default()
            },
        )
        .unwrap();

    assert!(service.employees_of(b_id).iter().any(|p| p.id == c_id));
    let a_id = service.list()[0].id;
    assert!(!service.employees_of(a_id).iter().any(|p| p.id == c_id));

    service
        .update(
            c_id,
            PersonUpdate {
                manager: Some(ManagerPatch::Clear),
                ..PersonUpdate::default()
            },
        )
        .unwrap();
    assert!(service.get(c_id).unwrap().is_root());
}

#[test]
fn update_rejects_manager_cycles_including_self() {
    let conn = setup();
    let mut service = open_directory(&conn);
    service
        .import(
            &[
                ImportRecord::new("A", "CEO"),
                ImportRecord::new("B", "CTO").with_manager("A"),
                ImportRecord::new("C", "VP").with_manager("B"),
            ],
            &[],
        )
        .unwrap();
    let (a_id, c_id) = (service.list()[0].id, service.list()[2].id);

    let self_err = service
        .update(
            a_id,
            PersonUpdate {
                manager: Some(ManagerPatch::Assign(a_id)),
                ..PersonUpdate::default()
            },
        )
        .unwrap_err();
    assert!(matches!(self_err, DirectoryError::CycleDetected { .. }));

    // A -> B -> C already holds, so putting A under C closes a loop.
    let cycle_err = service
        .update(
            a_id,
            PersonUpdate {
                manager: Some(ManagerPatch::Assign(c_id)),
                ..PersonUpdate::default()
            },
        )
        .unwrap_err();
    assert!(matches!(
        cycle_err,
        DirectoryError::CycleDetected { person, manager }
            if person == a_id && manager == c_id
    ));
    assert!(service.get(a_id).unwrap().is_root());
}

#[test]
fn update_unknown_person_returns_not_found() {
    let conn = setup();
    let mut service = open_directory(&conn);
    let unknown = Uuid::new_v4();

    let err = service.update(unknown, PersonUpdate::default()).unwrap_err();
    assert!(matches!(err, DirectoryError::PersonNotFound(id) if id == unknown));
}

#[test]
fn delete_reparents_reports_to_grand_manager() {
    let conn = setup();
    let mut service = open_directory(&conn);
    service
        .import(
            &[
                ImportRecord::new("G", "CEO"),
                ImportRecord::new("M", "Director").with_manager("G"),
                ImportRecord::new("R1", "Engineer").with_manager("M"),
                ImportRecord::new("R2", "Engineer").with_manager("M"),
                ImportRecord::new("R3", "Engineer").with_manager("M"),
            ],
            &[],
        )
        .unwrap();
    let g_id = service.list()[0].id;
    let m_id = service.list()[1].id;
    let before = service.list().len();

    service.delete(m_id).unwrap();

    assert_eq!(service.list().len(), before - 1);
    assert!(service.get(m_id).is_none());
    let reparented = service
        .list()
        .iter()
        .filter(|person| person.manager_id == Some(g_id))
        .count();
    // All three of M's reports moved up exactly one level.
    assert_eq!(reparented, 3);
}

#[test]
fn delete_of_root_detaches_reports() {
    let conn = setup();
    let mut service = open_directory(&conn);
    service.import(&two_person_batch(), &[]).unwrap();
    let (a_id, b_id) = (service.list()[0].id, service.list()[1].id);

    service.delete(a_id).unwrap();

    assert_eq!(service.list().len(), 1);
    assert!(service.get(b_id).unwrap().is_root());
}

#[test]
fn failed_save_surfaces_error_but_keeps_in_memory_state() {
    let conn = setup();
    let mut service = open_directory(&conn);
    service.import(&two_person_batch(), &[]).unwrap();

    conn.execute_batch(
        "CREATE TRIGGER snapshots_fail_save_test
         BEFORE UPDATE ON snapshots
         BEGIN
             SELECT RAISE(ABORT, 'forced save failure');
         END;",
    )
    .unwrap();

    let a_id = service.list()[0].id;
    let err = service
        .create(NewPerson {
            name: "Carol".to_string(),
            title: "VP".to_string(),
            manager_id: Some(a_id),
            ..NewPerson::default()
        })
        .unwrap_err();

    assert!(matches!(err, DirectoryError::Snapshot(_)));
    // Last mutation wins locally even though the snapshot write failed.
    assert_eq!(service.list().len(), 3);
    assert!(service.list().iter().any(|person| person.name == "Carol"));
}
