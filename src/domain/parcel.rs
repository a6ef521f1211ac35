// ==========================================
// Catasto Graph - Terreno (particella di terreno)
// ==========================================
// Nodo del grafo con identità immobile_id. Creato una sola
// volta dalla riga di tipo 1 del tracciato .ter; immutabile
// dopo la creazione, salvo la display label derivata.
// ==========================================

use serde::{Deserialize, Serialize};

/// Particella di terreno del catasto terreni.
///
/// La superficie è scomposta in ettari/are/centiare; i campi
/// numerici vuoti nel tracciato valgono 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    // ===== Identità =====
    pub immobile_id: String,

    // ===== Chiave amministrativa =====
    pub codice_amministrativo: String,
    pub sezione: String,
    pub tipo_immobile: String,
    pub progressivo: String,
    pub tipo_record: String,

    // ===== Identificativo catastale =====
    pub foglio: String,
    pub numero: String,
    pub denominatore: String,
    pub subalterno: String,
    pub edificabilita: String,

    // ===== Classamento =====
    pub qualita: String,
    pub classe: String,

    // ===== Superficie =====
    pub ettari: i32,
    pub are: i32,
    pub centiare: i32,

    // ===== Redditi =====
    pub flag_reddito: String,
    pub flag_porzione: String,
    pub flag_deduzioni: String,
    pub reddito_dominicale_lire: String,
    pub reddito_agrario_lire: String,
    pub reddito_dominicale_euro: String,
    pub reddito_agrario_euro: String,

    // ===== Label derivata =====
    pub display_name: String,
}

impl Parcel {
    /// Compone la display label dai campi già valorizzati.
    /// Non fallisce mai.
    pub fn compose_display_name(foglio: &str, numero: &str, qualita: &str) -> String {
        format!("Foglio {} - Part. {} ({})", foglio, numero, qualita)
    }
}
