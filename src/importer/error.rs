// ==========================================
// Catasto Graph - errori della pipeline di import
// ==========================================
// Tassonomia:
// - errori strutturali di riga (pochi campi, discriminatore o
//   codice diritto sconosciuto, numerico malformato): fatali per
//   la singola riga, la pipeline li logga e salta la riga
// - errori di I/O e persistenza: propagati all'orchestratore
// - ImportAborted: fallimento aggregato dell'intera chiamata
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Errori della pipeline di import.
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== Errori di file e directory =====
    #[error("directory non leggibile: {0}")]
    DirectoryRead(String),

    #[error("lettura file fallita: {0}")]
    FileRead(String),

    #[error("lettura record fallita: {0}")]
    RecordRead(String),

    // ===== Errori strutturali di riga =====
    #[error("riga {line_no}: attesi almeno {expected} campi, trovati {actual}")]
    TooFewFields {
        line_no: usize,
        expected: usize,
        actual: usize,
    },

    #[error("riga {line_no}: tipo soggetto non riconosciuto '{value}'")]
    UnknownSubjectType { line_no: usize, value: String },

    #[error("riga {line_no}: valore numerico non valido per {field}: '{value}'")]
    NumericField {
        line_no: usize,
        field: &'static str,
        value: String,
    },

    #[error("riga {line_no}: codice diritto sconosciuto '{code}'")]
    UnknownRightCode { line_no: usize, code: String },

    // ===== Persistenza =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    // ===== Fallimento aggregato =====
    #[error("import catastale fallito: {0}")]
    ImportAborted(String),

    // ===== Errori generici =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileRead(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::RecordRead(err.to_string())
    }
}

impl ImportError {
    /// True se l'errore è fatale solo per la riga corrente
    /// (la pipeline lo logga come warning e prosegue).
    pub fn is_line_scoped(&self) -> bool {
        matches!(
            self,
            ImportError::TooFewFields { .. }
                | ImportError::UnknownSubjectType { .. }
                | ImportError::NumericField { .. }
                | ImportError::UnknownRightCode { .. }
        )
    }
}

/// Alias di Result per la pipeline di import.
pub type ImportResult<T> = Result<T, ImportError>;
