// ==========================================
// Catasto Graph - strato di persistenza
// ==========================================
// Un repository per nodo del grafo (terreni, fabbricati,
// soggetti); le titolarità vivono dentro l'aggregato soggetto.
// Tutti i repository condividono la stessa Connection SQLite
// dietro Arc<Mutex>.
// ==========================================

pub mod building_repo;
pub mod error;
pub mod parcel_repo;
pub mod subject_repo;

pub use building_repo::BuildingRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use parcel_repo::ParcelRepository;
pub use subject_repo::SubjectRepository;
