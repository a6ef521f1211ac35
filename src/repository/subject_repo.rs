// ==========================================
// Catasto Graph - repository dei soggetti
// ==========================================
// Responsabilità: tabelle soggetto e titolarita. Il soggetto è
// un aggregato: il salvataggio riscrive la riga anagrafica e
// sostituisce per intero le titolarità collegate, così il
// salvataggio ripetuto dello stesso soggetto resta idempotente.
// ==========================================

use crate::db::{initialize_schema, open_sqlite_connection};
use crate::domain::ownership::Ownership;
use crate::domain::subject::{Subject, SubjectKind};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

pub struct SubjectRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SubjectRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            initialize_schema(&guard)?;
        }
        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Upsert dell'aggregato soggetto (anagrafica + titolarità).
    pub fn save(&self, subject: &Subject) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        Self::upsert_tx(&tx, subject)?;
        tx.commit()?;
        Ok(())
    }

    /// Upsert in blocco, in un'unica transazione.
    pub fn save_all(&self, subjects: &[Subject]) -> RepositoryResult<usize> {
        if subjects.is_empty() {
            return Ok(0);
        }
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        let mut count = 0usize;
        for subject in subjects {
            Self::upsert_tx(&tx, subject)?;
            count += 1;
        }
        tx.commit()?;
        Ok(count)
    }

    fn upsert_tx(conn: &Connection, subject: &Subject) -> RepositoryResult<()> {
        let kind_json = serde_json::to_string(&subject.kind)?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO soggetto (
                subject_id,
                codice_amministrativo,
                sezione,
                tipo_soggetto,
                nome,
                identificativo_fiscale,
                display_name,
                kind_json
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                subject.subject_id,
                subject.codice_amministrativo,
                subject.sezione,
                subject.kind.type_code(),
                subject.nome,
                subject.identificativo_fiscale,
                subject.display_name,
                kind_json,
            ],
        )?;

        // sostituzione integrale delle titolarità dell'aggregato
        conn.execute(
            "DELETE FROM titolarita WHERE subject_id = ?1",
            params![subject.subject_id],
        )?;
        for title in &subject.titolarita {
            let record_json = serde_json::to_string(title)?;
            conn.execute(
                r#"
                INSERT INTO titolarita (
                    subject_id,
                    target_kind,
                    target_immobile_id,
                    codice_diritto,
                    quota_numeratore,
                    quota_denominatore,
                    display_name,
                    record_json
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
                params![
                    subject.subject_id,
                    title.target.kind_code(),
                    title.target.immobile_id(),
                    title.codice_diritto,
                    title.quota_numeratore,
                    title.quota_denominatore,
                    title.display_name,
                    record_json,
                ],
            )?;
        }
        Ok(())
    }

    pub fn find_by_id(&self, subject_id: &str) -> RepositoryResult<Option<Subject>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT subject_id, codice_amministrativo, sezione, nome, \
             identificativo_fiscale, display_name, kind_json \
             FROM soggetto WHERE subject_id = ?1",
        )?;

        let result = stmt.query_row(params![subject_id], Self::row_to_subject_shell);
        match result {
            Ok((mut subject, kind_json)) => {
                subject.kind = serde_json::from_str(&kind_json)?;
                subject.titolarita = Self::load_titles(&conn, &subject.subject_id)?;
                Ok(Some(subject))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn find_all(&self) -> RepositoryResult<Vec<Subject>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT subject_id, codice_amministrativo, sezione, nome, \
             identificativo_fiscale, display_name, kind_json \
             FROM soggetto ORDER BY subject_id ASC",
        )?;
        let shells = stmt
            .query_map([], Self::row_to_subject_shell)?
            .collect::<SqliteResult<Vec<_>>>()?;

        let mut subjects = Vec::with_capacity(shells.len());
        for (mut subject, kind_json) in shells {
            subject.kind = serde_json::from_str(&kind_json)?;
            subject.titolarita = Self::load_titles(&conn, &subject.subject_id)?;
            subjects.push(subject);
        }
        Ok(subjects)
    }

    pub fn find_by_identificativo_fiscale(
        &self,
        identificativo_fiscale: &str,
    ) -> RepositoryResult<Vec<Subject>> {
        let ids = {
            let conn = self.get_conn()?;
            let mut stmt = conn.prepare(
                "SELECT subject_id FROM soggetto \
                 WHERE identificativo_fiscale = ?1 ORDER BY subject_id ASC",
            )?;
            let ids = stmt
                .query_map(params![identificativo_fiscale], |row| {
                    row.get::<_, String>(0)
                })?
                .collect::<SqliteResult<Vec<_>>>()?;
            ids
        };
        self.load_by_ids(&ids)
    }

    /// Ricerca anagrafica per frammento di nome (case-insensitive
    /// secondo la semantica LIKE di SQLite).
    pub fn find_by_nome_containing(&self, fragment: &str) -> RepositoryResult<Vec<Subject>> {
        let ids = {
            let conn = self.get_conn()?;
            let mut stmt = conn.prepare(
                "SELECT subject_id FROM soggetto \
                 WHERE nome LIKE '%' || ?1 || '%' ORDER BY subject_id ASC",
            )?;
            let ids = stmt
                .query_map(params![fragment], |row| row.get::<_, String>(0))?
                .collect::<SqliteResult<Vec<_>>>()?;
            ids
        };
        self.load_by_ids(&ids)
    }

    /// Soggetti distinti che hanno almeno una titolarità
    /// sull'immobile dato.
    pub fn find_owner_ids_by_immobile_id(
        &self,
        immobile_id: &str,
    ) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT subject_id FROM titolarita \
             WHERE target_immobile_id = ?1 ORDER BY subject_id ASC",
        )?;
        let ids = stmt
            .query_map(params![immobile_id], |row| row.get::<_, String>(0))?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(ids)
    }

    pub fn count_all(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM soggetto", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn count_titles(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM titolarita", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn load_by_ids(&self, ids: &[String]) -> RepositoryResult<Vec<Subject>> {
        let mut subjects = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(subject) = self.find_by_id(id)? {
                subjects.push(subject);
            }
        }
        Ok(subjects)
    }

    fn load_titles(conn: &Connection, subject_id: &str) -> RepositoryResult<Vec<Ownership>> {
        let mut stmt = conn.prepare(
            "SELECT record_json FROM titolarita WHERE subject_id = ?1 ORDER BY id ASC",
        )?;
        let payloads = stmt
            .query_map(params![subject_id], |row| row.get::<_, String>(0))?
            .collect::<SqliteResult<Vec<_>>>()?;

        let mut titles = Vec::with_capacity(payloads.len());
        for json in payloads {
            titles.push(serde_json::from_str(&json)?);
        }
        Ok(titles)
    }

    fn row_to_subject_shell(row: &Row<'_>) -> SqliteResult<(Subject, String)> {
        let kind_json: String = row.get(6)?;
        let subject = Subject {
            subject_id: row.get(0)?,
            codice_amministrativo: row.get(1)?,
            sezione: row.get(2)?,
            // sovrascritto dal chiamante con il payload kind_json
            kind: SubjectKind::LegalEntity {
                denominazione: String::new(),
                sede: String::new(),
                partita_iva: String::new(),
            },
            nome: row.get(3)?,
            identificativo_fiscale: row.get(4)?,
            display_name: row.get(5)?,
            titolarita: Vec::new(),
        };
        Ok((subject, kind_json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ownership::ImmobileRef;

    fn sample_title(immobile_id: &str, kind: &str) -> Ownership {
        let target = match kind {
            "TER" => ImmobileRef::Parcel(immobile_id.to_string()),
            _ => ImmobileRef::Building(immobile_id.to_string()),
        };
        Ownership {
            codice_amministrativo: "H501".to_string(),
            sezione: "A".to_string(),
            tipo_soggetto: "P".to_string(),
            tipo_immobile: "T".to_string(),
            codice_diritto: "10".to_string(),
            titolo_non_codificato: String::new(),
            quota_numeratore: "1".to_string(),
            quota_denominatore: "2".to_string(),
            regime: String::new(),
            soggetto_di_riferimento: String::new(),
            data_validita: String::new(),
            tipo_nota: String::new(),
            numero_nota: String::new(),
            progressivo_nota: String::new(),
            anno_nota: String::new(),
            data_registrazione_atti: String::new(),
            partita: String::new(),
            data_validita2: String::new(),
            tipo_nota2: String::new(),
            numero_nota2: String::new(),
            progressivo_nota2: String::new(),
            anno_nota2: String::new(),
            data_registrazione_atti2: String::new(),
            identificativo_mutazione_iniziale: String::new(),
            identificativo_mutazione_finale: String::new(),
            identificativo_titolarita: String::new(),
            codice_causale_atto_generante: String::new(),
            descrizione_atto_generante: String::new(),
            codice_causale_atto_conclusivo: String::new(),
            descrizione_atto_conclusivo: String::new(),
            display_name: "Proprietà (1/2)".to_string(),
            target,
        }
    }

    fn sample_subject(id: &str, nome: &str, fiscale: &str) -> Subject {
        Subject {
            codice_amministrativo: "AM1".to_string(),
            sezione: "01".to_string(),
            subject_id: id.to_string(),
            kind: SubjectKind::Person {
                cognome: "Rossi".to_string(),
                nome: "Mario".to_string(),
                sesso: "M".to_string(),
                data_nascita: "19800101".to_string(),
                luogo_nascita: "Roma".to_string(),
                codice_fiscale: fiscale.to_string(),
                indicazioni_supplementari: String::new(),
            },
            nome: nome.to_string(),
            identificativo_fiscale: fiscale.to_string(),
            display_name: Subject::compose_display_name(nome, fiscale),
            titolarita: Vec::new(),
        }
    }

    #[test]
    fn test_save_and_reload_aggregate() {
        let repo = SubjectRepository::new(":memory:").unwrap();
        let mut subject = sample_subject("S001", "Mario Rossi", "RSSMRA80A01H501Z");
        subject.titolarita.push(sample_title("T001", "TER"));
        subject.titolarita.push(sample_title("F001", "FAB"));
        repo.save(&subject).unwrap();

        let found = repo.find_by_id("S001").unwrap().unwrap();
        assert_eq!(found, subject);
        assert_eq!(found.titolarita.len(), 2);
        assert_eq!(found.titolarita[0].target, ImmobileRef::Parcel("T001".into()));
    }

    #[test]
    fn test_repeated_save_replaces_titles() {
        let repo = SubjectRepository::new(":memory:").unwrap();
        let mut subject = sample_subject("S001", "Mario Rossi", "RSSMRA80A01H501Z");
        subject.titolarita.push(sample_title("T001", "TER"));
        repo.save(&subject).unwrap();

        subject.titolarita.push(sample_title("T002", "TER"));
        repo.save(&subject).unwrap();
        // un secondo save identico non deve duplicare le titolarità
        repo.save(&subject).unwrap();

        let found = repo.find_by_id("S001").unwrap().unwrap();
        assert_eq!(found.titolarita.len(), 2);
        assert_eq!(repo.count_titles().unwrap(), 2);
    }

    #[test]
    fn test_find_by_identificativo_fiscale_and_nome() {
        let repo = SubjectRepository::new(":memory:").unwrap();
        repo.save_all(&[
            sample_subject("S001", "Mario Rossi", "RSSMRA80A01H501Z"),
            sample_subject("S002", "Maria Rossini", "RSSMRA75B02H501X"),
        ])
        .unwrap();

        let by_cf = repo
            .find_by_identificativo_fiscale("RSSMRA80A01H501Z")
            .unwrap();
        assert_eq!(by_cf.len(), 1);
        assert_eq!(by_cf[0].subject_id, "S001");

        let by_nome = repo.find_by_nome_containing("Rossi").unwrap();
        assert_eq!(by_nome.len(), 2);

        assert!(repo.find_by_identificativo_fiscale("XX").unwrap().is_empty());
    }

    #[test]
    fn test_find_owner_ids_by_immobile_id() {
        let repo = SubjectRepository::new(":memory:").unwrap();
        let mut first = sample_subject("S001", "Mario Rossi", "RSSMRA80A01H501Z");
        first.titolarita.push(sample_title("T001", "TER"));
        let mut second = sample_subject("S002", "Luigi Verdi", "VRDLGU70C03H501Y");
        second.titolarita.push(sample_title("T001", "TER"));
        repo.save_all(&[first, second]).unwrap();

        let owners = repo.find_owner_ids_by_immobile_id("T001").unwrap();
        assert_eq!(owners, vec!["S001".to_string(), "S002".to_string()]);
        assert!(repo.find_owner_ids_by_immobile_id("T999").unwrap().is_empty());
    }
}
