//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `litshelf_core` wiring end to
//!   end: open a store, import a record, search it, show its dashboard.
//! - Keep output deterministic for quick local sanity checks.

use litshelf_core::{
    core_version, open_db_in_memory, ImportService, LibraryService, SqliteDocumentRepository,
    SqliteImportSignalRepository,
};
use std::process::ExitCode;

const SAMPLE_RECORD: &str = "<PubmedArticle><MedlineCitation>\
    <PMID>31452104</PMID>\
    <DateCompleted><Year>2020</Year></DateCompleted>\
    <Article><ArticleTitle>Gene expression in tumor samples</ArticleTitle>\
    <Abstract><AbstractText>We measured expression levels.</AbstractText></Abstract></Article>\
    </MedlineCitation></PubmedArticle>";

fn main() -> ExitCode {
    println!("litshelf_core version={}", core_version());

    match smoke_flow() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("smoke flow failed: {message}");
            ExitCode::FAILURE
        }
    }
}

fn smoke_flow() -> Result<(), String> {
    let conn = open_db_in_memory().map_err(|err| err.to_string())?;

    let bridge = ImportService::new(
        SqliteDocumentRepository::new(&conn),
        SqliteImportSignalRepository::new(&conn),
    );
    let outcome = bridge
        .import_remote_xml(SAMPLE_RECORD)
        .map_err(|err| err.to_string())?;
    println!("imported title={}", outcome.title());

    let library = LibraryService::new(SqliteDocumentRepository::new(&conn));
    let hits = library.search("gene");
    let hits_json = serde_json::to_string_pretty(&hits).map_err(|err| err.to_string())?;
    println!("hits={hits_json}");

    let dashboard = library
        .dashboard(outcome.title())
        .map_err(|err| err.to_string())?
        .ok_or_else(|| "imported document missing from store".to_string())?;
    let dashboard_json =
        serde_json::to_string_pretty(&dashboard).map_err(|err| err.to_string())?;
    println!("dashboard={dashboard_json}");

    Ok(())
}
