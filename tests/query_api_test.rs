// ==========================================
// Test di integrazione dell'API di interrogazione
// ==========================================
// Import di una fornitura, poi verifica delle query di lettura
// sul grafo risultante.
// ==========================================

#[path = "test_helpers.rs"]
mod test_helpers;

use catasto_graph::{CatastoApi, CatastoImporter};
use tempfile::TempDir;
use test_helpers::*;

fn imported_api(dir: &TempDir) -> CatastoApi {
    write_fixture(
        dir.path(),
        "export.ter",
        &[
            ter_line("T001", "12", "45", "SEMINATIVO"),
            ter_line("T002", "12", "46", "VIGNETO"),
            ter_line("T003", "13", "1", "SEMINATIVO"),
        ],
    );
    write_fixture(dir.path(), "export.fab", &[fab_base_line("F001", "A1")]);
    write_fixture(
        dir.path(),
        "export.sog",
        &[
            sog_person_line("S001", "Rossi", "Mario", "RSSMRA80A01H501Z"),
            sog_person_line("S002", "Verdi", "Luigi", "VRDLGU70C03H501Y"),
            sog_entity_line("S003", "ACME SRL", "01234567890"),
        ],
    );
    write_fixture(
        dir.path(),
        "export.tit",
        &[
            tit_line("S001", "T001", "10", "1", "2"),
            tit_line("S002", "T001", "10", "1", "2"),
            tit_line("S001", "F001", "10", "1", "1"),
            tit_line("S003", "T002", "10", "1", "1"),
        ],
    );

    let repos = create_test_repos(dir);
    let importer = CatastoImporter::new(
        repos.parcel_repo.clone(),
        repos.building_repo.clone(),
        repos.subject_repo.clone(),
    );
    importer.import_catasto_data(dir.path()).unwrap();

    CatastoApi::new(repos.parcel_repo, repos.building_repo, repos.subject_repo)
}

#[test]
fn test_ownership_report_by_fiscal_id() {
    let dir = TempDir::new().unwrap();
    let api = imported_api(&dir);

    let report = api
        .find_ownerships_by_fiscal_id("RSSMRA80A01H501Z")
        .unwrap()
        .unwrap();

    assert_eq!(report.subject_id, "S001");
    assert_eq!(report.display_name, "Mario Rossi (RSSMRA80A01H501Z)");
    assert_eq!(report.entries.len(), 2);

    let parcel_entry = &report.entries[0];
    assert_eq!(parcel_entry.immobile_kind, "TER");
    assert_eq!(
        parcel_entry.immobile_display,
        "Foglio 12 - Part. 45 (SEMINATIVO)"
    );
    assert_eq!(parcel_entry.title_display, "Proprietà (1/2)");

    let building_entry = &report.entries[1];
    assert_eq!(building_entry.immobile_kind, "FAB");
    assert!(building_entry.immobile_display.starts_with("Cat. A1"));
}

#[test]
fn test_unknown_fiscal_id_is_none() {
    let dir = TempDir::new().unwrap();
    let api = imported_api(&dir);
    assert!(api
        .find_ownerships_by_fiscal_id("XXXXXX00X00X000X")
        .unwrap()
        .is_none());
}

#[test]
fn test_subject_search_by_nome_fragment() {
    let dir = TempDir::new().unwrap();
    let api = imported_api(&dir);

    let found = api.find_subjects_by_nome("Rossi").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].subject_id, "S001");

    let entities = api.find_subjects_by_nome("ACME").unwrap();
    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].identificativo_fiscale, "01234567890");
}

#[test]
fn test_parcel_queries_by_foglio_and_qualita() {
    let dir = TempDir::new().unwrap();
    let api = imported_api(&dir);

    let on_foglio = api.find_parcels_by_foglio("12").unwrap();
    assert_eq!(on_foglio.len(), 2);
    assert_eq!(on_foglio[0].numero, "45");
    assert_eq!(on_foglio[1].numero, "46");

    let seminativi = api.find_parcels_by_qualita("SEMINATIVO").unwrap();
    assert_eq!(seminativi.len(), 2);
    assert!(api.find_parcels_by_foglio("99").unwrap().is_empty());
}

#[test]
fn test_co_owners_of_a_parcel() {
    let dir = TempDir::new().unwrap();
    let api = imported_api(&dir);

    let co_owners = api.find_co_owners("T001").unwrap();
    assert_eq!(co_owners.len(), 2);
    assert_eq!(co_owners[0].subject_id, "S001");
    assert_eq!(co_owners[1].subject_id, "S002");
    assert_eq!(co_owners[0].titles, vec!["Proprietà (1/2)".to_string()]);

    assert!(api.find_co_owners("T999").unwrap().is_empty());
}

#[test]
fn test_owners_by_foglio() {
    let dir = TempDir::new().unwrap();
    let api = imported_api(&dir);

    // foglio 12: T001 (S001+S002) e T002 (S003)
    let owners = api.find_owners_by_foglio("12").unwrap();
    assert_eq!(owners.len(), 3);
    assert_eq!(owners[0].subject_id, "S001");
    assert_eq!(owners[1].subject_id, "S002");
    assert_eq!(owners[2].subject_id, "S003");

    // i titoli elencati sono solo quelli verso le particelle del
    // foglio: la titolarità di S001 sul fabbricato F001 non compare
    assert_eq!(owners[0].titles, vec!["Proprietà (1/2)".to_string()]);
    assert_eq!(owners[2].titles, vec!["Proprietà (1/1)".to_string()]);

    // foglio 13 non ha titolarità registrate
    assert!(api.find_owners_by_foglio("13").unwrap().is_empty());
    assert!(api.find_owners_by_foglio("99").unwrap().is_empty());
}

#[test]
fn test_stats_after_import() {
    let dir = TempDir::new().unwrap();
    let api = imported_api(&dir);

    let stats = api.stats().unwrap();
    assert_eq!(stats.parcels, 3);
    assert_eq!(stats.buildings, 1);
    assert_eq!(stats.subjects, 3);
    assert_eq!(stats.titles, 4);
}
