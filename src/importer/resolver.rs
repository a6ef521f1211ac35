// ==========================================
// Catasto Graph - contesto di risoluzione delle titolarità
// ==========================================
// Snapshot in memoria delle entità già persistite, caricato
// dall'orchestratore prima della fase titolarità e posseduto da
// essa: nessuno stato condiviso fuori dalla chiamata di import.
// ==========================================

use crate::domain::building::Building;
use crate::domain::parcel::Parcel;
use crate::domain::subject::Subject;
use crate::repository::{
    error::RepositoryResult, BuildingRepository, ParcelRepository, SubjectRepository,
};
use std::collections::HashMap;

/// Indici per identificativo delle entità risolvibili.
#[derive(Debug, Default)]
pub struct ResolutionContext {
    parcels: HashMap<String, Parcel>,
    buildings: HashMap<String, Building>,
    subjects: HashMap<String, Subject>,
}

impl ResolutionContext {
    /// Carica lo snapshot completo dallo store.
    pub fn load(
        parcel_repo: &ParcelRepository,
        building_repo: &BuildingRepository,
        subject_repo: &SubjectRepository,
    ) -> RepositoryResult<Self> {
        let parcels = parcel_repo
            .find_all()?
            .into_iter()
            .map(|p| (p.immobile_id.clone(), p))
            .collect();
        let buildings = building_repo
            .find_all()?
            .into_iter()
            .map(|b| (b.immobile_id.clone(), b))
            .collect();
        let subjects = subject_repo
            .find_all()?
            .into_iter()
            .map(|s| (s.subject_id.clone(), s))
            .collect();

        Ok(Self {
            parcels,
            buildings,
            subjects,
        })
    }

    pub fn parcel(&self, immobile_id: &str) -> Option<&Parcel> {
        self.parcels.get(immobile_id)
    }

    pub fn building(&self, immobile_id: &str) -> Option<&Building> {
        self.buildings.get(immobile_id)
    }

    pub fn subject(&self, subject_id: &str) -> Option<&Subject> {
        self.subjects.get(subject_id)
    }

    pub fn parcel_count(&self) -> usize {
        self.parcels.len()
    }

    pub fn building_count(&self) -> usize {
        self.buildings.len()
    }

    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{initialize_schema, open_sqlite_connection};
    use crate::domain::subject::SubjectKind;
    use std::sync::{Arc, Mutex};

    fn shared_connection() -> Arc<Mutex<rusqlite::Connection>> {
        let conn = open_sqlite_connection(":memory:").unwrap();
        initialize_schema(&conn).unwrap();
        Arc::new(Mutex::new(conn))
    }

    #[test]
    fn test_load_indexes_all_entities() {
        let conn = shared_connection();
        let parcel_repo = ParcelRepository::from_connection(conn.clone()).unwrap();
        let building_repo = BuildingRepository::from_connection(conn.clone()).unwrap();
        let subject_repo = SubjectRepository::from_connection(conn).unwrap();

        parcel_repo
            .save(&Parcel {
                immobile_id: "T001".to_string(),
                ..Default::default()
            })
            .unwrap();
        subject_repo
            .save(&Subject {
                subject_id: "S001".to_string(),
                codice_amministrativo: String::new(),
                sezione: String::new(),
                kind: SubjectKind::LegalEntity {
                    denominazione: "ACME SRL".to_string(),
                    sede: String::new(),
                    partita_iva: String::new(),
                },
                nome: "ACME SRL".to_string(),
                identificativo_fiscale: String::new(),
                display_name: "ACME SRL ()".to_string(),
                titolarita: Vec::new(),
            })
            .unwrap();

        let ctx = ResolutionContext::load(&parcel_repo, &building_repo, &subject_repo).unwrap();
        assert_eq!(ctx.parcel_count(), 1);
        assert_eq!(ctx.building_count(), 0);
        assert_eq!(ctx.subject_count(), 1);
        assert!(ctx.parcel("T001").is_some());
        assert!(ctx.subject("S001").is_some());
        assert!(ctx.subject("S999").is_none());
    }
}
