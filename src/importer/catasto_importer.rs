// ==========================================
// Catasto Graph - orchestratore dell'import catastale
// ==========================================
// Pipeline a fasi in ordine fisso: terreni (.ter), fabbricati
// (.fab), soggetti (.sog), titolarità (.tit). Un file mancante
// fa saltare la fase con un warning; un errore di persistenza o
// I/O abortisce l'intera chiamata. I chunk di fabbricati già
// flushati restano comunque committati.
//
// Gli errori circoscritti alla singola riga vengono loggati
// come warning e la riga viene scartata.
// ==========================================

use crate::config::ImportConfig;
use crate::domain::building::Building;
use crate::domain::ownership::ImmobileRef;
use crate::importer::building_builder::{group_records, BuildingBuilder};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::ownership_parser::{extract_immobile_id, extract_subject_id, parse_title};
use crate::importer::parcel_parser::{parse_parcel, PARCEL_BASE_RECORD_TYPE};
use crate::importer::record::read_records;
use crate::importer::resolver::ResolutionContext;
use crate::importer::subject_parser::parse_subject;
use crate::repository::{BuildingRepository, ParcelRepository, SubjectRepository};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Esito di una chiamata di import andata a buon fine.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub run_id: String,
    pub parcels: usize,
    pub buildings: usize,
    pub subjects: usize,
    pub titles: usize,
    pub skipped_lines: usize,
    pub unresolved_titles: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub elapsed_ms: i64,
}

impl ImportSummary {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            run_id: Uuid::new_v4().to_string(),
            parcels: 0,
            buildings: 0,
            subjects: 0,
            titles: 0,
            skipped_lines: 0,
            unresolved_titles: 0,
            started_at: now,
            completed_at: now,
            elapsed_ms: 0,
        }
    }
}

pub struct CatastoImporter {
    parcel_repo: Arc<ParcelRepository>,
    building_repo: Arc<BuildingRepository>,
    subject_repo: Arc<SubjectRepository>,
    config: ImportConfig,
}

impl CatastoImporter {
    pub fn new(
        parcel_repo: Arc<ParcelRepository>,
        building_repo: Arc<BuildingRepository>,
        subject_repo: Arc<SubjectRepository>,
    ) -> Self {
        Self::with_config(parcel_repo, building_repo, subject_repo, ImportConfig::default())
    }

    pub fn with_config(
        parcel_repo: Arc<ParcelRepository>,
        building_repo: Arc<BuildingRepository>,
        subject_repo: Arc<SubjectRepository>,
        config: ImportConfig,
    ) -> Self {
        Self {
            parcel_repo,
            building_repo,
            subject_repo,
            config,
        }
    }

    /// Importa una fornitura catastale dalla directory indicata.
    ///
    /// Qualunque errore non circoscritto a una riga abortisce la
    /// chiamata con `ImportAborted`; i dati già committati dalle
    /// fasi precedenti (o dai flush parziali) restano nello store.
    pub fn import_catasto_data(&self, dir: &Path) -> ImportResult<ImportSummary> {
        let mut summary = ImportSummary::new();
        info!(run_id = %summary.run_id, dir = %dir.display(), "avvio import catastale");

        if let Err(e) = self.run(dir, &mut summary) {
            error!(run_id = %summary.run_id, error = %e, "import catastale abortito");
            return Err(ImportError::ImportAborted(e.to_string()));
        }

        summary.completed_at = Utc::now();
        summary.elapsed_ms = (summary.completed_at - summary.started_at).num_milliseconds();
        info!(
            run_id = %summary.run_id,
            parcels = summary.parcels,
            buildings = summary.buildings,
            subjects = summary.subjects,
            titles = summary.titles,
            skipped_lines = summary.skipped_lines,
            unresolved_titles = summary.unresolved_titles,
            elapsed_ms = summary.elapsed_ms,
            "import catastale completato"
        );
        Ok(summary)
    }

    fn run(&self, dir: &Path, summary: &mut ImportSummary) -> ImportResult<()> {
        self.import_parcels(dir, summary)?;
        self.import_buildings(dir, summary)?;
        self.import_subjects(dir, summary)?;
        self.import_titles(dir, summary)?;
        Ok(())
    }

    // ===== Fase 1: terreni (.ter) =====
    fn import_parcels(&self, dir: &Path, summary: &mut ImportSummary) -> ImportResult<()> {
        let path = match find_file_with_extension(dir, "ter")? {
            Some(p) => p,
            None => {
                warn!("nessun file .ter nella directory, fase terreni saltata");
                return Ok(());
            }
        };
        debug!(file = %path.display(), "fase terreni");

        let mut parcels = Vec::new();
        for record in read_records(&path)? {
            match parse_parcel(&record) {
                Ok(parcel) => {
                    // solo i record canonici entrano nel grafo
                    if parcel.tipo_record == PARCEL_BASE_RECORD_TYPE {
                        parcels.push(parcel);
                    }
                }
                Err(e) if e.is_line_scoped() => {
                    warn!(error = %e, "riga .ter scartata");
                    summary.skipped_lines += 1;
                }
                Err(e) => return Err(e),
            }
        }

        summary.parcels = self.parcel_repo.save_all(&parcels)?;
        info!(count = summary.parcels, "terreni importati");
        Ok(())
    }

    // ===== Fase 2: fabbricati (.fab) =====
    fn import_buildings(&self, dir: &Path, summary: &mut ImportSummary) -> ImportResult<()> {
        let path = match find_file_with_extension(dir, "fab")? {
            Some(p) => p,
            None => {
                warn!("nessun file .fab nella directory, fase fabbricati saltata");
                return Ok(());
            }
        };
        debug!(file = %path.display(), "fase fabbricati");

        let groups = group_records(read_records(&path)?);
        let group_count = groups.len();

        let mut buffer: Vec<Building> = Vec::new();
        for (key, records) in groups {
            let mut builder = BuildingBuilder::new();
            for record in &records {
                builder.apply(record);
            }
            match builder.finalize() {
                Some(building) => buffer.push(building),
                None => {
                    debug!(
                        immobile_id = %key.immobile_id,
                        "gruppo .fab senza record base, scartato"
                    );
                }
            }

            if buffer.len() >= self.config.building_flush_size {
                summary.buildings += self.building_repo.save_all(&buffer)?;
                debug!(flushed = buffer.len(), "flush buffer fabbricati");
                buffer.clear();
            }
        }

        summary.buildings += self.building_repo.save_all(&buffer)?;
        info!(
            count = summary.buildings,
            groups = group_count,
            "fabbricati importati"
        );
        Ok(())
    }

    // ===== Fase 3: soggetti (.sog) =====
    fn import_subjects(&self, dir: &Path, summary: &mut ImportSummary) -> ImportResult<()> {
        let path = match find_file_with_extension(dir, "sog")? {
            Some(p) => p,
            None => {
                warn!("nessun file .sog nella directory, fase soggetti saltata");
                return Ok(());
            }
        };
        debug!(file = %path.display(), "fase soggetti");

        let mut subjects = Vec::new();
        for record in read_records(&path)? {
            match parse_subject(&record) {
                Ok(subject) => subjects.push(subject),
                Err(e) if e.is_line_scoped() => {
                    warn!(error = %e, "riga .sog scartata");
                    summary.skipped_lines += 1;
                }
                Err(e) => return Err(e),
            }
        }

        summary.subjects = self.subject_repo.save_all(&subjects)?;
        info!(count = summary.subjects, "soggetti importati");
        Ok(())
    }

    // ===== Fase 4: titolarità (.tit) =====
    //
    // Gli estremi vengono risolti contro lo snapshot prima di
    // decodificare la riga intera: una titolarità verso un
    // soggetto o un immobile mai visto viene scartata con un
    // warning. Il soggetto viene risalvato a ogni titolarità
    // aggiunta, così un abort successivo non perde le relazioni
    // già costruite.
    fn import_titles(&self, dir: &Path, summary: &mut ImportSummary) -> ImportResult<()> {
        let path = match find_file_with_extension(dir, "tit")? {
            Some(p) => p,
            None => {
                warn!("nessun file .tit nella directory, fase titolarità saltata");
                return Ok(());
            }
        };
        debug!(file = %path.display(), "fase titolarità");

        // i tracciati immobili assenti escludono il rispettivo
        // tentativo di risoluzione
        let fab_present = find_file_with_extension(dir, "fab")?.is_some();
        let ter_present = find_file_with_extension(dir, "ter")?.is_some();

        let ctx = ResolutionContext::load(&self.parcel_repo, &self.building_repo, &self.subject_repo)?;
        debug!(
            parcels = ctx.parcel_count(),
            buildings = ctx.building_count(),
            subjects = ctx.subject_count(),
            "snapshot di risoluzione caricato"
        );

        for record in read_records(&path)? {
            let subject_id = extract_subject_id(&record).to_string();
            let immobile_id = extract_immobile_id(&record).to_string();

            // prima i fabbricati, poi i terreni
            let target = if fab_present && ctx.building(&immobile_id).is_some() {
                ImmobileRef::Building(immobile_id.clone())
            } else if ter_present && ctx.parcel(&immobile_id).is_some() {
                ImmobileRef::Parcel(immobile_id.clone())
            } else {
                warn!(
                    line_no = record.line_no(),
                    immobile_id = %immobile_id,
                    "immobile della titolarità non risolto, riga scartata"
                );
                summary.unresolved_titles += 1;
                continue;
            };

            if ctx.subject(&subject_id).is_none() {
                warn!(
                    line_no = record.line_no(),
                    subject_id = %subject_id,
                    "soggetto della titolarità non risolto, riga scartata"
                );
                summary.unresolved_titles += 1;
                continue;
            }

            let title = match parse_title(&record, target) {
                Ok(t) => t,
                Err(e) if e.is_line_scoped() => {
                    warn!(error = %e, "riga .tit scartata");
                    summary.skipped_lines += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            // rilettura dallo store: il soggetto accumula le
            // titolarità delle righe precedenti
            let mut subject = match self.subject_repo.find_by_id(&subject_id)? {
                Some(s) => s,
                None => match ctx.subject(&subject_id) {
                    Some(s) => s.clone(),
                    None => continue,
                },
            };
            subject.titolarita.push(title);
            self.subject_repo.save(&subject)?;
            summary.titles += 1;
        }

        info!(
            count = summary.titles,
            unresolved = summary.unresolved_titles,
            "titolarità importate"
        );
        Ok(())
    }
}

/// Primo file della directory con l'estensione data
/// (confronto case-insensitive). L'ordine tra più candidati è
/// quello di enumerazione della directory.
pub fn find_file_with_extension(dir: &Path, extension: &str) -> ImportResult<Option<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| ImportError::DirectoryRead(format!("{}: {}", dir.display(), e)))?;

    for entry in entries {
        let entry = entry
            .map_err(|e| ImportError::DirectoryRead(format!("{}: {}", dir.display(), e)))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if matches {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BUILDING_FLUSH_SIZE;
    use crate::db::{initialize_schema, open_sqlite_connection};
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn importer_with_flush(flush_size: usize) -> CatastoImporter {
        let conn = open_sqlite_connection(":memory:").unwrap();
        initialize_schema(&conn).unwrap();
        let conn = Arc::new(Mutex::new(conn));
        CatastoImporter::with_config(
            Arc::new(ParcelRepository::from_connection(conn.clone()).unwrap()),
            Arc::new(BuildingRepository::from_connection(conn.clone()).unwrap()),
            Arc::new(SubjectRepository::from_connection(conn).unwrap()),
            ImportConfig {
                building_flush_size: flush_size,
            },
        )
    }

    fn fab_base_line(id: &str) -> String {
        format!("H501|A|{}|F|1|1||A1|2|5,5|80|100000|51.65|||||||", id)
    }

    #[test]
    fn test_default_flush_size() {
        assert_eq!(DEFAULT_BUILDING_FLUSH_SIZE, 1000);
        assert_eq!(
            ImportConfig::default().building_flush_size,
            DEFAULT_BUILDING_FLUSH_SIZE
        );
    }

    #[test]
    fn test_find_file_with_extension_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("export.TER"), "").unwrap();
        fs::write(dir.path().join("note.txt"), "").unwrap();

        let found = find_file_with_extension(dir.path(), "ter").unwrap();
        assert!(found.is_some());
        assert!(find_file_with_extension(dir.path(), "fab")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_find_file_on_missing_directory_fails() {
        let err =
            find_file_with_extension(Path::new("/nonexistent/catasto"), "ter").unwrap_err();
        assert!(matches!(err, ImportError::DirectoryRead(_)));
    }

    #[test]
    fn test_missing_files_skip_all_phases() {
        let dir = TempDir::new().unwrap();
        let importer = importer_with_flush(10);

        let summary = importer.import_catasto_data(dir.path()).unwrap();
        assert_eq!(summary.parcels, 0);
        assert_eq!(summary.buildings, 0);
        assert_eq!(summary.subjects, 0);
        assert_eq!(summary.titles, 0);
    }

    #[test]
    fn test_buildings_flush_in_chunks() {
        let dir = TempDir::new().unwrap();
        let lines: Vec<String> = (1..=5).map(|i| fab_base_line(&format!("F{:03}", i))).collect();
        fs::write(dir.path().join("export.fab"), lines.join("\n")).unwrap();

        let importer = importer_with_flush(2);
        let summary = importer.import_catasto_data(dir.path()).unwrap();

        assert_eq!(summary.buildings, 5);
        assert_eq!(importer.building_repo.count_all().unwrap(), 5);
    }

    #[test]
    fn test_parcel_phase_keeps_only_canonical_records() {
        let dir = TempDir::new().unwrap();
        let canonical =
            "H501|A|T001|T|1|1|12|45||||SEMINATIVO|2|1|20|50|1|||100|50|5.16|2.58";
        let secondary =
            "H501|A|T002|T|1|2|12|46||||SEMINATIVO|2|1|20|50|1|||100|50|5.16|2.58";
        fs::write(
            dir.path().join("export.ter"),
            format!("{}\n{}\n", canonical, secondary),
        )
        .unwrap();

        let importer = importer_with_flush(10);
        let summary = importer.import_catasto_data(dir.path()).unwrap();

        assert_eq!(summary.parcels, 1);
        assert!(importer.parcel_repo.find_by_id("T001").unwrap().is_some());
        assert!(importer.parcel_repo.find_by_id("T002").unwrap().is_none());
    }

    #[test]
    fn test_malformed_parcel_line_is_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        let good = "H501|A|T001|T|1|1|12|45||||SEMINATIVO|2|1|20|50|1|||100|50|5.16|2.58";
        let bad = "H501|A|T002|T|1|1|12|46||||SEMINATIVO|2|1|abc|50|1|||100|50|5.16|2.58";
        fs::write(dir.path().join("export.ter"), format!("{}\n{}\n", good, bad)).unwrap();

        let importer = importer_with_flush(10);
        let summary = importer.import_catasto_data(dir.path()).unwrap();

        assert_eq!(summary.parcels, 1);
        assert_eq!(summary.skipped_lines, 1);
    }
}
