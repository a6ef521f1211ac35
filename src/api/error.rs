// ==========================================
// Catasto Graph - errori dell'API di interrogazione
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Errori dell'API di interrogazione.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("parametro non valido: {0}")]
    InvalidInput(String),

    #[error("risorsa non trovata: {0}")]
    NotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Alias di Result per l'API di interrogazione.
pub type ApiResult<T> = Result<T, ApiError>;
