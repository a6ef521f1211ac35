// ==========================================
// Catasto Graph - repository dei terreni
// ==========================================
// Responsabilità: tabella terreno (particelle del catasto
// terreni), semantica di upsert per identità su immobile_id.
// ==========================================

use crate::db::{initialize_schema, open_sqlite_connection};
use crate::domain::parcel::Parcel;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const PARCEL_COLUMNS: &str = r#"
    immobile_id,
    codice_amministrativo,
    sezione,
    tipo_immobile,
    progressivo,
    tipo_record,
    foglio,
    numero,
    denominatore,
    subalterno,
    edificabilita,
    qualita,
    classe,
    ettari,
    are,
    centiare,
    flag_reddito,
    flag_porzione,
    flag_deduzioni,
    reddito_dominicale_lire,
    reddito_agrario_lire,
    reddito_dominicale_euro,
    reddito_agrario_euro,
    display_name
"#;

pub struct ParcelRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ParcelRepository {
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

    /// Upsert di un singolo terreno.
    pub fn save(&self, parcel: &Parcel) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        Self::upsert_tx(&conn, parcel)?;
        Ok(())
    }

    /// Upsert in blocco, in un'unica transazione.
    pub fn save_all(&self, parcels: &[Parcel]) -> RepositoryResult<usize> {
        if parcels.is_empty() {
            return Ok(0);
        }
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        let mut count = 0usize;
        for parcel in parcels {
            Self::upsert_tx(&tx, parcel)?;
            count += 1;
        }
        tx.commit()?;
        Ok(count)
    }

    fn upsert_tx(conn: &Connection, parcel: &Parcel) -> RepositoryResult<()> {
        conn.execute(
            &format!(
                "INSERT OR REPLACE INTO terreno ({}) VALUES \
                 (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, \
                  ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24)",
                PARCEL_COLUMNS
            ),
            params![
                parcel.immobile_id,
                parcel.codice_amministrativo,
                parcel.sezione,
                parcel.tipo_immobile,
                parcel.progressivo,
                parcel.tipo_record,
                parcel.foglio,
                parcel.numero,
                parcel.denominatore,
                parcel.subalterno,
                parcel.edificabilita,
                parcel.qualita,
                parcel.classe,
                parcel.ettari,
                parcel.are,
                parcel.centiare,
                parcel.flag_reddito,
                parcel.flag_porzione,
                parcel.flag_deduzioni,
                parcel.reddito_dominicale_lire,
                parcel.reddito_agrario_lire,
                parcel.reddito_dominicale_euro,
                parcel.reddito_agrario_euro,
                parcel.display_name,
            ],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, immobile_id: &str) -> RepositoryResult<Option<Parcel>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM terreno WHERE immobile_id = ?1",
            PARCEL_COLUMNS
        ))?;

        let result = stmt.query_row(params![immobile_id], Self::row_to_parcel);
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn find_all(&self) -> RepositoryResult<Vec<Parcel>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM terreno ORDER BY immobile_id ASC",
            PARCEL_COLUMNS
        ))?;
        let rows = stmt
            .query_map([], Self::row_to_parcel)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn find_by_foglio(&self, foglio: &str) -> RepositoryResult<Vec<Parcel>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM terreno WHERE foglio = ?1 ORDER BY numero ASC",
            PARCEL_COLUMNS
        ))?;
        let rows = stmt
            .query_map(params![foglio], Self::row_to_parcel)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn find_by_qualita(&self, qualita: &str) -> RepositoryResult<Vec<Parcel>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM terreno WHERE qualita = ?1 ORDER BY immobile_id ASC",
            PARCEL_COLUMNS
        ))?;
        let rows = stmt
            .query_map(params![qualita], Self::row_to_parcel)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn count_all(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM terreno", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn row_to_parcel(row: &Row<'_>) -> SqliteResult<Parcel> {
        Ok(Parcel {
            immobile_id: row.get(0)?,
            codice_amministrativo: row.get(1)?,
            sezione: row.get(2)?,
            tipo_immobile: row.get(3)?,
            progressivo: row.get(4)?,
            tipo_record: row.get(5)?,
            foglio: row.get(6)?,
            numero: row.get(7)?,
            denominatore: row.get(8)?,
            subalterno: row.get(9)?,
            edificabilita: row.get(10)?,
            qualita: row.get(11)?,
            classe: row.get(12)?,
            ettari: row.get(13)?,
            are: row.get(14)?,
            centiare: row.get(15)?,
            flag_reddito: row.get(16)?,
            flag_porzione: row.get(17)?,
            flag_deduzioni: row.get(18)?,
            reddito_dominicale_lire: row.get(19)?,
            reddito_agrario_lire: row.get(20)?,
            reddito_dominicale_euro: row.get(21)?,
            reddito_agrario_euro: row.get(22)?,
            display_name: row.get(23)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_parcel(id: &str, foglio: &str, numero: &str) -> Parcel {
        Parcel {
            codice_amministrativo: "H501".to_string(),
            sezione: "A".to_string(),
            immobile_id: id.to_string(),
            tipo_immobile: "T".to_string(),
            progressivo: "1".to_string(),
            tipo_record: "1".to_string(),
            foglio: foglio.to_string(),
            numero: numero.to_string(),
            denominatore: String::new(),
            subalterno: String::new(),
            edificabilita: String::new(),
            qualita: "SEMINATIVO".to_string(),
            classe: "2".to_string(),
            ettari: 1,
            are: 20,
            centiare: 50,
            flag_reddito: "1".to_string(),
            flag_porzione: String::new(),
            flag_deduzioni: String::new(),
            reddito_dominicale_lire: "100".to_string(),
            reddito_agrario_lire: "50".to_string(),
            reddito_dominicale_euro: "5.16".to_string(),
            reddito_agrario_euro: "2.58".to_string(),
            display_name: Parcel::compose_display_name(foglio, numero, "SEMINATIVO"),
        }
    }

    #[test]
    fn test_save_and_find_by_id() {
        let repo = ParcelRepository::new(":memory:").unwrap();
        repo.save(&sample_parcel("T001", "12", "45")).unwrap();

        let found = repo.find_by_id("T001").unwrap().unwrap();
        assert_eq!(found.foglio, "12");
        assert_eq!(found.ettari, 1);
        assert_eq!(found.display_name, "Foglio 12 - Part. 45 (SEMINATIVO)");
        assert!(repo.find_by_id("T999").unwrap().is_none());
    }

    #[test]
    fn test_save_is_upsert_by_identity() {
        let repo = ParcelRepository::new(":memory:").unwrap();
        repo.save(&sample_parcel("T001", "12", "45")).unwrap();

        let mut updated = sample_parcel("T001", "13", "45");
        updated.ettari = 2;
        repo.save(&updated).unwrap();

        assert_eq!(repo.count_all().unwrap(), 1);
        let found = repo.find_by_id("T001").unwrap().unwrap();
        assert_eq!(found.foglio, "13");
        assert_eq!(found.ettari, 2);
    }

    #[test]
    fn test_save_all_and_filters() {
        let repo = ParcelRepository::new(":memory:").unwrap();
        let saved = repo
            .save_all(&[
                sample_parcel("T001", "12", "45"),
                sample_parcel("T002", "12", "46"),
                sample_parcel("T003", "13", "1"),
            ])
            .unwrap();
        assert_eq!(saved, 3);

        let on_foglio = repo.find_by_foglio("12").unwrap();
        assert_eq!(on_foglio.len(), 2);
        assert_eq!(on_foglio[0].numero, "45");

        assert_eq!(repo.find_by_qualita("SEMINATIVO").unwrap().len(), 3);
        assert_eq!(repo.find_by_qualita("VIGNETO").unwrap().len(), 0);
        assert_eq!(repo.find_all().unwrap().len(), 3);
    }

    #[test]
    fn test_save_all_empty_slice_is_a_no_op() {
        let repo = ParcelRepository::new(":memory:").unwrap();
        assert_eq!(repo.save_all(&[]).unwrap(), 0);
    }
}
