use litshelf_core::db::open_db_in_memory;
use litshelf_core::{
    DocumentRepository, ImportError, ImportOutcome, ImportService, ImportSignalRepository,
    SqliteDocumentRepository, SqliteImportSignalRepository,
};
use rusqlite::Connection;
use std::io::Write;

const REMOTE_RECORD: &str = "<PubmedArticle><MedlineCitation><PMID>31452104</PMID>\
    <Article><ArticleTitle>Remote paper</ArticleTitle></Article>\
    </MedlineCitation></PubmedArticle>";

fn service(conn: &Connection) -> ImportService<SqliteDocumentRepository<'_>, SqliteImportSignalRepository<'_>> {
    ImportService::new(
        SqliteDocumentRepository::new(conn),
        SqliteImportSignalRepository::new(conn),
    )
}

#[test]
fn file_import_uses_file_name_as_title() {
    let conn = open_db_in_memory().unwrap();
    let bridge = service(&conn);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plos_2020.xml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(REMOTE_RECORD.as_bytes()).unwrap();

    let outcome = bridge.import_file(&path).unwrap();
    assert_eq!(
        outcome,
        ImportOutcome::Imported {
            title: "plos_2020.xml".to_string()
        }
    );

    let repo = SqliteDocumentRepository::new(&conn);
    let stored = repo.get_document("plos_2020.xml").unwrap().unwrap();
    assert_eq!(stored.raw_xml, REMOTE_RECORD);
}

#[test]
fn file_import_duplicate_is_reported_not_fatal() {
    let conn = open_db_in_memory().unwrap();
    let bridge = service(&conn);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("same.xml");
    std::fs::write(&path, REMOTE_RECORD).unwrap();

    assert!(matches!(
        bridge.import_file(&path).unwrap(),
        ImportOutcome::Imported { .. }
    ));
    assert!(matches!(
        bridge.import_file(&path).unwrap(),
        ImportOutcome::Duplicate { title } if title == "same.xml"
    ));

    let repo = SqliteDocumentRepository::new(&conn);
    assert_eq!(repo.count_documents().unwrap(), 1);
}

#[test]
fn file_import_missing_file_is_an_io_error() {
    let conn = open_db_in_memory().unwrap();
    let bridge = service(&conn);

    let dir = tempfile::tempdir().unwrap();
    let err = bridge.import_file(dir.path().join("gone.xml")).unwrap_err();
    assert!(matches!(err, ImportError::Io { .. }));
}

#[test]
fn remote_import_titles_by_pmid() {
    let conn = open_db_in_memory().unwrap();
    let bridge = service(&conn);

    let outcome = bridge.import_remote_xml(REMOTE_RECORD).unwrap();
    assert_eq!(outcome.title(), "PMID: 31452104");

    let repo = SqliteDocumentRepository::new(&conn);
    assert!(repo.get_document("PMID: 31452104").unwrap().is_some());
}

#[test]
fn remote_import_without_pmid_synthesizes_a_title() {
    let conn = open_db_in_memory().unwrap();
    let bridge = service(&conn);

    let outcome = bridge
        .import_remote_xml("<PubmedArticle><Article/></PubmedArticle>")
        .unwrap();
    assert!(outcome.title().starts_with("PMID: imported_"));
}

#[test]
fn signal_poll_imports_and_clears_the_slot() {
    let conn = open_db_in_memory().unwrap();
    let bridge = service(&conn);
    let signals = SqliteImportSignalRepository::new(&conn);

    signals.publish(REMOTE_RECORD).unwrap();
    assert!(signals.is_pending().unwrap());

    let outcome = bridge.poll_import_signal().unwrap().unwrap();
    assert_eq!(outcome.title(), "PMID: 31452104");

    // Edge-triggered: the slot is empty afterwards and polling is quiet.
    assert!(!signals.is_pending().unwrap());
    assert!(bridge.poll_import_signal().unwrap().is_none());
}

#[test]
fn duplicate_signal_payload_still_clears_the_slot() {
    let conn = open_db_in_memory().unwrap();
    let bridge = service(&conn);
    let signals = SqliteImportSignalRepository::new(&conn);

    signals.publish(REMOTE_RECORD).unwrap();
    bridge.poll_import_signal().unwrap();

    signals.publish(REMOTE_RECORD).unwrap();
    let outcome = bridge.poll_import_signal().unwrap().unwrap();
    assert!(matches!(outcome, ImportOutcome::Duplicate { .. }));
    assert!(!signals.is_pending().unwrap());

    let repo = SqliteDocumentRepository::new(&conn);
    assert_eq!(repo.count_documents().unwrap(), 1);
}

#[test]
fn publish_overwrites_a_pending_payload() {
    let conn = open_db_in_memory().unwrap();
    let signals = SqliteImportSignalRepository::new(&conn);

    signals.publish("<A><PMID>1</PMID></A>").unwrap();
    signals.publish("<A><PMID>2</PMID></A>").unwrap();

    assert_eq!(
        signals.take().unwrap().as_deref(),
        Some("<A><PMID>2</PMID></A>")
    );
    assert_eq!(signals.take().unwrap(), None);
}
