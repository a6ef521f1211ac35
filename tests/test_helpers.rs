// ==========================================
// Helper condivisi per i test di integrazione
// ==========================================
// Costruttori di righe dei tracciati catastali e setup dei
// repository su database temporaneo.
// ==========================================

#![allow(dead_code)]

use catasto_graph::{BuildingRepository, ParcelRepository, SubjectRepository};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub struct TestRepos {
    pub parcel_repo: Arc<ParcelRepository>,
    pub building_repo: Arc<BuildingRepository>,
    pub subject_repo: Arc<SubjectRepository>,
}

/// Repository su un file SQLite dentro la directory temporanea,
/// così istanze successive vedono gli stessi dati.
pub fn create_test_repos(dir: &TempDir) -> TestRepos {
    catasto_graph::logging::init_test();
    let db_path = dir.path().join("catasto_test.db");
    let db_path = db_path.to_str().expect("percorso db non UTF-8");
    TestRepos {
        parcel_repo: Arc::new(ParcelRepository::new(db_path).expect("parcel repo")),
        building_repo: Arc::new(BuildingRepository::new(db_path).expect("building repo")),
        subject_repo: Arc::new(SubjectRepository::new(db_path).expect("subject repo")),
    }
}

pub fn write_fixture(dir: &Path, name: &str, lines: &[String]) {
    fs::write(dir.join(name), lines.join("\n")).expect("scrittura fixture");
}

// ===== Costruttori di righe =====

/// Riga .ter canonica (23 campi, tipo record 1).
pub fn ter_line(immobile_id: &str, foglio: &str, numero: &str, qualita: &str) -> String {
    format!(
        "H501|A|{}|T|1|1|{}|{}||||{}|2|1|20|50|1|||100|50|5.16|2.58",
        immobile_id, foglio, numero, qualita
    )
}

/// Riga .sog per persona fisica.
pub fn sog_person_line(
    subject_id: &str,
    cognome: &str,
    nome: &str,
    codice_fiscale: &str,
) -> String {
    format!(
        "AM1|01|{}|P|{}|{}|M|19800101|Roma|{}|",
        subject_id, cognome, nome, codice_fiscale
    )
}

/// Riga .sog per persona giuridica.
pub fn sog_entity_line(subject_id: &str, denominazione: &str, partita_iva: &str) -> String {
    format!("AM1|01|{}|G|{}|Roma|{}", subject_id, denominazione, partita_iva)
}

/// Record base .fab (tipo 1, 20 campi).
pub fn fab_base_line(immobile_id: &str, categoria: &str) -> String {
    format!(
        "H501|A|{}|F|1|1||{}|2|5,5|80|100000|51.65|||||||",
        immobile_id, categoria
    )
}

/// Record identificativi .fab (tipo 2, una finestra).
pub fn fab_identifiers_line(immobile_id: &str, foglio: &str, numero: &str, sub: &str) -> String {
    format!("H501|A|{}|F|1|2||{}|{}||{}|", immobile_id, foglio, numero, sub)
}

/// Record indirizzi .fab (tipo 3, una finestra).
pub fn fab_address_line(immobile_id: &str, indirizzo: &str, civico: &str) -> String {
    format!("H501|A|{}|F|1|3|VIA|{}|{}|||123", immobile_id, indirizzo, civico)
}

/// Riga .tit completa (32 campi).
pub fn tit_line(
    subject_id: &str,
    immobile_id: &str,
    codice_diritto: &str,
    numeratore: &str,
    denominatore: &str,
) -> String {
    format!(
        "H501|A|{}|P|{}|T|{}||{}|{}|C||20200101|T|100|1|2020|20200102|P1|||||||M1|M2|TIT1|C1|COMPRAVENDITA|C2|SUCCESSIONE",
        subject_id, immobile_id, codice_diritto, numeratore, denominatore
    )
}
