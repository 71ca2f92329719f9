//! Connection lifecycle: opening real files, rejecting non-databases, and
//! the startup schema presence probe.

use std::fs;

use aims::catalog::REQUIRED_TABLES;
use aims::{AimsError, Database};

#[test]
fn open_fails_for_a_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Database::open(dir.path().join("absent.sqlite")).unwrap_err();
    assert!(matches!(err, AimsError::Connection { .. }));
}

#[test]
fn open_rejects_a_file_that_is_not_a_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.sqlite");
    fs::write(&path, b"this is not a sqlite file, not even close").unwrap();

    let err = Database::open(&path).unwrap_err();
    match err {
        AimsError::Connection { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected Connection, got {:?}", other),
    }
}

#[test]
fn open_succeeds_on_a_valid_store_and_probes_its_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aims.sqlite");

    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE field (fld_fieldkey INTEGER PRIMARY KEY);
         CREATE TABLE crop (c_cropkey INTEGER PRIMARY KEY);",
    )
    .unwrap();
    conn.close().unwrap();

    let db = Database::open(&path).unwrap();
    assert!(db.table_exists("field"));
    assert!(!db.table_exists("soilsample"));

    let missing = db.schema_report(REQUIRED_TABLES);
    assert_eq!(missing, ["fieldcrop", "soilsample", "farmer", "season"]);

    db.close().unwrap();
}

#[test]
fn foreign_keys_are_enforced_from_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aims.sqlite");

    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE season (s_seasonkey INTEGER PRIMARY KEY, s_name TEXT NOT NULL);
         CREATE TABLE crop (
             c_cropkey INTEGER PRIMARY KEY,
             c_name TEXT NOT NULL,
             c_preferredseason INTEGER REFERENCES season (s_seasonkey)
         );",
    )
    .unwrap();
    conn.close().unwrap();

    let db = Database::open(&path).unwrap();
    let mut stmt = db
        .prepare("INSERT INTO crop (c_cropkey, c_name, c_preferredseason) VALUES (1, 'Rye', 7)")
        .unwrap();
    let err = stmt.execute(&[]).unwrap_err();
    match err {
        AimsError::Step { detail } => assert!(detail.contains("FOREIGN KEY")),
        other => panic!("expected Step, got {:?}", other),
    }
}
