// ==========================================
// Catasto Graph - repository dei fabbricati
// ==========================================
// Responsabilità: tabella fabbricato, semantica di upsert per
// identità su immobile_id. Le colonne scalari servono le query;
// l'entità completa (liste ripetute incluse) viaggia in
// record_json.
// ==========================================

use crate::db::{initialize_schema, open_sqlite_connection};
use crate::domain::building::Building;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

pub struct BuildingRepository {
    conn: Arc<Mutex<Connection>>,
}

impl BuildingRepository {
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

    /// Upsert di un singolo fabbricato.
    pub fn save(&self, building: &Building) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        Self::upsert_tx(&conn, building)?;
        Ok(())
    }

    /// Upsert in blocco, in un'unica transazione. È il punto di
    /// arrivo dei flush del buffer di import.
    pub fn save_all(&self, buildings: &[Building]) -> RepositoryResult<usize> {
        if buildings.is_empty() {
            return Ok(0);
        }
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        let mut count = 0usize;
        for building in buildings {
            Self::upsert_tx(&tx, building)?;
            count += 1;
        }
        tx.commit()?;
        Ok(count)
    }

    fn upsert_tx(conn: &Connection, building: &Building) -> RepositoryResult<()> {
        let record_json = serde_json::to_string(building)?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO fabbricato (
                immobile_id,
                codice_amministrativo,
                sezione,
                tipo_immobile,
                progressivo,
                categoria,
                classe,
                display_name,
                record_json
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                building.immobile_id,
                building.codice_amministrativo,
                building.sezione,
                building.tipo_immobile,
                building.progressivo,
                building.categoria,
                building.classe,
                building.display_name,
                record_json,
            ],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, immobile_id: &str) -> RepositoryResult<Option<Building>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT record_json FROM fabbricato WHERE immobile_id = ?1")?;

        let result: Result<String, _> = stmt.query_row(params![immobile_id], |row| row.get(0));
        match result {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn find_all(&self) -> RepositoryResult<Vec<Building>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT record_json FROM fabbricato ORDER BY immobile_id ASC")?;
        let payloads = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<SqliteResult<Vec<_>>>()?;

        let mut buildings = Vec::with_capacity(payloads.len());
        for json in payloads {
            buildings.push(serde_json::from_str(&json)?);
        }
        Ok(buildings)
    }

    pub fn count_all(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM fabbricato", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
