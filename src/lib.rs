// ==========================================
// Catasto Graph - libreria principale
// ==========================================
// Importa gli estratti catastali (tracciati .ter/.sog/.fab/.tit)
// e ricostruisce il grafo immobiliare: nodi Terreno/Fabbricato/
// Soggetto e relazioni di titolarità.
// ==========================================

// ==========================================
// Moduli
// ==========================================

// Modello di dominio - entità catastali
pub mod domain;

// Strato di persistenza - accesso dati
pub mod repository;

// Pipeline di import - tracciati record
pub mod importer;

// Configurazione
pub mod config;

// Infrastruttura database (connessione/PRAGMA/schema)
pub mod db;

// Logging
pub mod logging;

// API di interrogazione
pub mod api;

// ==========================================
// Re-export dei tipi principali
// ==========================================

// Entità di dominio
pub use domain::{Building, ImmobileRef, Ownership, Parcel, RightCode, Subject, SubjectKind};

// Pipeline di import
pub use importer::{CatastoImporter, ImportError, ImportResult, ImportSummary};

// Persistenza
pub use repository::{
    BuildingRepository, ParcelRepository, RepositoryError, RepositoryResult, SubjectRepository,
};

// API
pub use api::{ApiError, ApiResult, CatastoApi};

// Configurazione
pub use config::ImportConfig;

// ==========================================
// Costanti di sistema
// ==========================================

// Versione
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Nome applicazione
pub const APP_NAME: &str = "Catasto Graph";
