// ==========================================
// Catasto Graph - errori dello strato di persistenza
// ==========================================
// Strumento: macro derive di thiserror
// ==========================================

use thiserror::Error;

/// Errori dello strato di persistenza.
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== Errori database =====
    #[error("record non trovato: {entity} con id={id}")]
    NotFound { entity: String, id: String },

    #[error("connessione al database fallita: {0}")]
    DatabaseConnectionError(String),

    #[error("acquisizione lock database fallita: {0}")]
    LockError(String),

    #[error("transazione database fallita: {0}")]
    DatabaseTransactionError(String),

    #[error("query database fallita: {0}")]
    DatabaseQueryError(String),

    #[error("violazione vincolo di unicità: {0}")]
    UniqueConstraintViolation(String),

    #[error("violazione vincolo di chiave esterna: {0}")]
    ForeignKeyViolation(String),

    // ===== Serializzazione payload =====
    #[error("serializzazione payload fallita: {0}")]
    Serialization(#[from] serde_json::Error),

    // ===== Errori generici =====
    #[error("errore interno: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Alias di Result per lo strato di persistenza.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
