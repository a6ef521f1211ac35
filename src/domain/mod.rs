// ==========================================
// Catasto Graph - modello di dominio
// ==========================================
// Entità del grafo catastale: Terreno (Parcel), Fabbricato
// (Building), Soggetto (Subject) e la relazione di titolarità
// (Ownership). Nessuna logica di accesso dati.
// ==========================================

pub mod building;
pub mod ownership;
pub mod parcel;
pub mod right_code;
pub mod subject;

// Re-export dei tipi principali
pub use building::Building;
pub use ownership::{ImmobileRef, Ownership};
pub use parcel::Parcel;
pub use right_code::RightCode;
pub use subject::{Subject, SubjectKind};
