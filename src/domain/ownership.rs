// ==========================================
// Catasto Graph - Titolarità (relazione di possesso)
// ==========================================
// Arco del grafo da un Soggetto verso un Terreno o un
// Fabbricato, con gli attributi del titolo (diritto, quota,
// regime, riferimenti d'atto). Non è un nodo: l'identità è
// locale alla relazione e la collezione appartiene al soggetto.
// ==========================================

use serde::{Deserialize, Serialize};

/// Riferimento all'immobile oggetto della titolarità.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "immobile_id")]
pub enum ImmobileRef {
    /// Particella del catasto terreni
    Parcel(String),
    /// Unità del catasto fabbricati
    Building(String),
}

impl ImmobileRef {
    /// Identificativo immobile referenziato.
    pub fn immobile_id(&self) -> &str {
        match self {
            ImmobileRef::Parcel(id) => id,
            ImmobileRef::Building(id) => id,
        }
    }

    /// Codice del tipo di destinazione (per la persistenza).
    pub fn kind_code(&self) -> &'static str {
        match self {
            ImmobileRef::Parcel(_) => "TER",
            ImmobileRef::Building(_) => "FAB",
        }
    }
}

/// Titolo di possesso di un soggetto su un immobile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    // ===== Chiave amministrativa =====
    pub codice_amministrativo: String,
    pub sezione: String,
    pub tipo_soggetto: String,
    pub tipo_immobile: String,

    // ===== Diritto e quota =====
    pub codice_diritto: String,
    pub titolo_non_codificato: String,
    pub quota_numeratore: String,
    pub quota_denominatore: String,
    pub regime: String,
    pub soggetto_di_riferimento: String,

    // ===== Validità e nota (primo riferimento) =====
    pub data_validita: String,
    pub tipo_nota: String,
    pub numero_nota: String,
    pub progressivo_nota: String,
    pub anno_nota: String,
    pub data_registrazione_atti: String,

    pub partita: String,

    // ===== Validità e nota (secondo riferimento) =====
    pub data_validita2: String,
    pub tipo_nota2: String,
    pub numero_nota2: String,
    pub progressivo_nota2: String,
    pub anno_nota2: String,
    pub data_registrazione_atti2: String,

    // ===== Mutazioni e atti =====
    pub identificativo_mutazione_iniziale: String,
    pub identificativo_mutazione_finale: String,
    pub identificativo_titolarita: String,
    pub codice_causale_atto_generante: String,
    pub descrizione_atto_generante: String,
    pub codice_causale_atto_conclusivo: String,
    pub descrizione_atto_conclusivo: String,

    // ===== Label derivata =====
    pub display_name: String,

    // ===== Immobile di destinazione =====
    pub target: ImmobileRef,
}
