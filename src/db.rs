// ==========================================
// Catasto Graph - inizializzazione SQLite
// ==========================================
// Obiettivi:
// - PRAGMA uniformi per tutte le Connection::open (foreign_keys,
//   busy_timeout), per evitare comportamenti diversi tra repository
// - bootstrap dello schema (CREATE TABLE IF NOT EXISTS)
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// busy_timeout di default (millisecondi)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Applica i PRAGMA uniformi alla connessione.
///
/// foreign_keys e busy_timeout vanno impostati per singola connessione.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Apre una connessione SQLite con la configurazione uniforme.
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Crea le tabelle del grafo catastale se non esistono.
///
/// Lo store è trattato come keyed store con semantica di upsert
/// per identità: un'unica chiave primaria testuale per entità,
/// le liste ripetute del fabbricato e il payload del soggetto
/// sono serializzati come JSON.
pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS terreno (
            immobile_id              TEXT PRIMARY KEY,
            codice_amministrativo    TEXT,
            sezione                  TEXT,
            tipo_immobile            TEXT,
            progressivo              TEXT,
            tipo_record              TEXT,
            foglio                   TEXT,
            numero                   TEXT,
            denominatore             TEXT,
            subalterno               TEXT,
            edificabilita            TEXT,
            qualita                  TEXT,
            classe                   TEXT,
            ettari                   INTEGER NOT NULL DEFAULT 0,
            are                      INTEGER NOT NULL DEFAULT 0,
            centiare                 INTEGER NOT NULL DEFAULT 0,
            flag_reddito             TEXT,
            flag_porzione            TEXT,
            flag_deduzioni           TEXT,
            reddito_dominicale_lire  TEXT,
            reddito_agrario_lire     TEXT,
            reddito_dominicale_euro  TEXT,
            reddito_agrario_euro     TEXT,
            display_name             TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_terreno_foglio  ON terreno (foglio);
        CREATE INDEX IF NOT EXISTS idx_terreno_qualita ON terreno (qualita);

        CREATE TABLE IF NOT EXISTS fabbricato (
            immobile_id           TEXT PRIMARY KEY,
            codice_amministrativo TEXT,
            sezione               TEXT,
            tipo_immobile         TEXT,
            progressivo           TEXT,
            categoria             TEXT,
            classe                TEXT,
            display_name          TEXT,
            record_json           TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS soggetto (
            subject_id             TEXT PRIMARY KEY,
            codice_amministrativo  TEXT,
            sezione                TEXT,
            tipo_soggetto          TEXT NOT NULL,
            nome                   TEXT,
            identificativo_fiscale TEXT,
            display_name           TEXT,
            kind_json              TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_soggetto_fiscale ON soggetto (identificativo_fiscale);

        CREATE TABLE IF NOT EXISTS titolarita (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            subject_id         TEXT NOT NULL REFERENCES soggetto (subject_id) ON DELETE CASCADE,
            target_kind        TEXT NOT NULL,
            target_immobile_id TEXT NOT NULL,
            codice_diritto     TEXT,
            quota_numeratore   TEXT,
            quota_denominatore TEXT,
            display_name       TEXT,
            record_json        TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_titolarita_soggetto ON titolarita (subject_id);
        CREATE INDEX IF NOT EXISTS idx_titolarita_immobile ON titolarita (target_immobile_id);
        "#,
    )?;
    Ok(())
}
