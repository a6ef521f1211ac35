// ==========================================
// Catasto Graph - API di interrogazione del grafo
// ==========================================
// Vista di sola lettura sullo store: ricerche anagrafiche,
// report di intestazione per codice fiscale, comproprietari di
// un immobile, statistiche complessive.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::ownership::ImmobileRef;
use crate::domain::parcel::Parcel;
use crate::domain::subject::Subject;
use crate::repository::{BuildingRepository, ParcelRepository, SubjectRepository};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Voce di un report di intestazione: una titolarità con
/// l'immobile risolto in chiaro.
#[derive(Debug, Clone, Serialize)]
pub struct OwnershipEntry {
    pub immobile_id: String,
    pub immobile_kind: String,
    pub immobile_display: String,
    pub title_display: String,
}

/// Report di intestazione di un soggetto.
#[derive(Debug, Clone, Serialize)]
pub struct OwnershipReport {
    pub subject_id: String,
    pub display_name: String,
    pub identificativo_fiscale: String,
    pub entries: Vec<OwnershipEntry>,
}

/// Comproprietario di un immobile, con i titoli che lo legano
/// a quell'immobile.
#[derive(Debug, Clone, Serialize)]
pub struct CoOwnershipReport {
    pub subject_id: String,
    pub display_name: String,
    pub titles: Vec<String>,
}

/// Statistiche complessive dello store.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StoreStats {
    pub parcels: usize,
    pub buildings: usize,
    pub subjects: usize,
    pub titles: usize,
}

pub struct CatastoApi {
    parcel_repo: Arc<ParcelRepository>,
    building_repo: Arc<BuildingRepository>,
    subject_repo: Arc<SubjectRepository>,
}

impl CatastoApi {
    pub fn new(
        parcel_repo: Arc<ParcelRepository>,
        building_repo: Arc<BuildingRepository>,
        subject_repo: Arc<SubjectRepository>,
    ) -> Self {
        Self {
            parcel_repo,
            building_repo,
            subject_repo,
        }
    }

    /// Report di intestazione per codice fiscale o partita IVA.
    /// `None` se nessun soggetto corrisponde.
    pub fn find_ownerships_by_fiscal_id(
        &self,
        identificativo_fiscale: &str,
    ) -> ApiResult<Option<OwnershipReport>> {
        let identificativo_fiscale = identificativo_fiscale.trim();
        if identificativo_fiscale.is_empty() {
            return Err(ApiError::InvalidInput(
                "identificativo fiscale vuoto".to_string(),
            ));
        }

        let subjects = self
            .subject_repo
            .find_by_identificativo_fiscale(identificativo_fiscale)?;
        let subject = match subjects.into_iter().next() {
            Some(s) => s,
            None => return Ok(None),
        };
        debug!(subject_id = %subject.subject_id, "soggetto risolto per identificativo fiscale");

        let mut entries = Vec::with_capacity(subject.titolarita.len());
        for title in &subject.titolarita {
            entries.push(OwnershipEntry {
                immobile_id: title.target.immobile_id().to_string(),
                immobile_kind: title.target.kind_code().to_string(),
                immobile_display: self.resolve_immobile_display(&title.target)?,
                title_display: title.display_name.clone(),
            });
        }

        Ok(Some(OwnershipReport {
            subject_id: subject.subject_id,
            display_name: subject.display_name,
            identificativo_fiscale: subject.identificativo_fiscale,
            entries,
        }))
    }

    /// Ricerca anagrafica per frammento di nome.
    pub fn find_subjects_by_nome(&self, fragment: &str) -> ApiResult<Vec<Subject>> {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return Err(ApiError::InvalidInput("frammento di nome vuoto".to_string()));
        }
        Ok(self.subject_repo.find_by_nome_containing(fragment)?)
    }

    pub fn find_parcels_by_foglio(&self, foglio: &str) -> ApiResult<Vec<Parcel>> {
        let foglio = foglio.trim();
        if foglio.is_empty() {
            return Err(ApiError::InvalidInput("foglio vuoto".to_string()));
        }
        Ok(self.parcel_repo.find_by_foglio(foglio)?)
    }

    pub fn find_parcels_by_qualita(&self, qualita: &str) -> ApiResult<Vec<Parcel>> {
        let qualita = qualita.trim();
        if qualita.is_empty() {
            return Err(ApiError::InvalidInput("qualità vuota".to_string()));
        }
        Ok(self.parcel_repo.find_by_qualita(qualita)?)
    }

    /// Soggetti con almeno una titolarità sull'immobile dato,
    /// ciascuno con i titoli che lo legano a quell'immobile.
    pub fn find_co_owners(&self, immobile_id: &str) -> ApiResult<Vec<CoOwnershipReport>> {
        let immobile_id = immobile_id.trim();
        if immobile_id.is_empty() {
            return Err(ApiError::InvalidInput("identificativo immobile vuoto".to_string()));
        }

        let owner_ids = self.subject_repo.find_owner_ids_by_immobile_id(immobile_id)?;
        let mut reports = Vec::with_capacity(owner_ids.len());
        for subject_id in owner_ids {
            let subject = match self.subject_repo.find_by_id(&subject_id)? {
                Some(s) => s,
                None => continue,
            };
            let titles = subject
                .titolarita
                .iter()
                .filter(|t| t.target.immobile_id() == immobile_id)
                .map(|t| t.display_name.clone())
                .collect();
            reports.push(CoOwnershipReport {
                subject_id: subject.subject_id,
                display_name: subject.display_name,
                titles,
            });
        }
        Ok(reports)
    }

    /// Intestatari delle particelle di un foglio: soggetti con
    /// almeno una titolarità su una particella del foglio dato,
    /// ciascuno con i titoli verso quelle particelle.
    pub fn find_owners_by_foglio(&self, foglio: &str) -> ApiResult<Vec<CoOwnershipReport>> {
        let foglio = foglio.trim();
        if foglio.is_empty() {
            return Err(ApiError::InvalidInput("foglio vuoto".to_string()));
        }

        let parcels = self.parcel_repo.find_by_foglio(foglio)?;

        // soggetti distinti, nell'ordine di incontro per particella
        let mut owner_ids: Vec<String> = Vec::new();
        for parcel in &parcels {
            for subject_id in self
                .subject_repo
                .find_owner_ids_by_immobile_id(&parcel.immobile_id)?
            {
                if !owner_ids.contains(&subject_id) {
                    owner_ids.push(subject_id);
                }
            }
        }

        let mut reports = Vec::with_capacity(owner_ids.len());
        for subject_id in owner_ids {
            let subject = match self.subject_repo.find_by_id(&subject_id)? {
                Some(s) => s,
                None => continue,
            };
            let titles = subject
                .titolarita
                .iter()
                .filter(|t| match &t.target {
                    ImmobileRef::Parcel(id) => parcels.iter().any(|p| p.immobile_id == *id),
                    ImmobileRef::Building(_) => false,
                })
                .map(|t| t.display_name.clone())
                .collect();
            reports.push(CoOwnershipReport {
                subject_id: subject.subject_id,
                display_name: subject.display_name,
                titles,
            });
        }
        Ok(reports)
    }

    /// Conteggi complessivi dello store.
    pub fn stats(&self) -> ApiResult<StoreStats> {
        Ok(StoreStats {
            parcels: self.parcel_repo.count_all()?,
            buildings: self.building_repo.count_all()?,
            subjects: self.subject_repo.count_all()?,
            titles: self.subject_repo.count_titles()?,
        })
    }

    fn resolve_immobile_display(&self, target: &ImmobileRef) -> ApiResult<String> {
        let display = match target {
            ImmobileRef::Parcel(id) => self
                .parcel_repo
                .find_by_id(id)?
                .map(|p| p.display_name)
                .unwrap_or_else(|| id.clone()),
            ImmobileRef::Building(id) => self
                .building_repo
                .find_by_id(id)?
                .map(|b| b.display_name)
                .unwrap_or_else(|| id.clone()),
        };
        Ok(display)
    }
}
