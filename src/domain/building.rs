// ==========================================
// Catasto Graph - Fabbricato (unità immobiliare urbana)
// ==========================================
// Nodo del grafo con identità immobile_id. A differenza del
// terreno, il fabbricato viene ricostruito da più righe fisiche
// del tracciato .fab (tipi record 1-5) che condividono la stessa
// chiave composta: il tipo 1 porta gli attributi scalari, i tipi
// 2-5 accodano una voce ai gruppi ripetuti (liste parallele).
// ==========================================

use serde::{Deserialize, Serialize};

/// Unità immobiliare urbana del catasto fabbricati.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    // ===== Identità =====
    pub immobile_id: String,

    // ===== Chiave amministrativa (comune a tutti i tipi record) =====
    pub codice_amministrativo: String,
    pub sezione: String,
    pub tipo_immobile: String,
    pub progressivo: String,

    // ===== Tipo 1 - classamento =====
    pub zona: String,
    pub categoria: String,
    pub classe: String,
    pub consistenza: String,
    pub superficie: String,
    pub rendita_lire: String,
    pub rendita_euro: String,

    // ===== Tipo 1 - ubicazione nel fabbricato =====
    pub lotto: String,
    pub edificio: String,
    pub scala: String,
    pub interno1: String,
    pub interno2: String,
    pub piano1: String,
    pub piano2: String,
    pub piano3: String,
    pub piano4: String,

    // ===== Tipo 1 - atto generante =====
    pub data_efficacia_generante: String,
    pub data_registrazione_generante: String,
    pub tipo_nota_generante: String,
    pub numero_nota_generante: String,
    pub progressivo_nota_generante: String,
    pub anno_nota_generante: String,

    // ===== Tipo 1 - atto conclusivo =====
    pub data_efficacia_conclusiva: String,
    pub data_registrazione_conclusiva: String,
    pub tipo_nota_conclusiva: String,
    pub numero_nota_conclusiva: String,
    pub progressivo_nota_conclusiva: String,
    pub anno_nota_conclusiva: String,

    // ===== Tipo 1 - campi aggiuntivi =====
    pub partita: String,
    pub annotazione: String,
    pub identificativo_mutazione_iniziale: String,
    pub identificativo_mutazione_finale: String,
    pub protocollo_notifica: String,
    pub data_notifica: String,
    pub codice_causale_atto_generante: String,
    pub descrizione_atto_generante: String,
    pub codice_causale_atto_conclusivo: String,
    pub descrizione_atto_conclusivo: String,
    pub flag_classamento: String,

    // ===== Tipo 2 - identificativi (liste parallele) =====
    pub sezioni_urbane: Vec<String>,
    pub fogli: Vec<String>,
    pub numeri: Vec<String>,
    pub denominatori: Vec<String>,
    pub subalterni: Vec<String>,
    pub edificialita: Vec<String>,

    // ===== Tipo 3 - indirizzi (liste parallele) =====
    pub toponimi: Vec<String>,
    pub indirizzi: Vec<String>,
    pub civici1: Vec<String>,
    pub civici2: Vec<String>,
    pub civici3: Vec<String>,
    pub codici_strada: Vec<String>,

    // ===== Tipo 4 - utilità comuni (liste parallele) =====
    pub utilita_sezioni_urbane: Vec<String>,
    pub utilita_fogli: Vec<String>,
    pub utilita_numeri: Vec<String>,
    pub utilita_denominatori: Vec<String>,
    pub utilita_subalterni: Vec<String>,

    // ===== Tipo 5 - riserve (liste parallele) =====
    pub codici_riserva: Vec<String>,
    pub partite_iscrizione_riserva: Vec<String>,

    // ===== Label derivata =====
    pub display_name: String,
}

impl Building {
    /// Ricalcola la display label dai primi elementi delle liste
    /// di identificativi/indirizzi e dalla categoria. Non fallisce
    /// mai; va richiamata una volta dopo aver applicato tutti i
    /// sotto-record del gruppo.
    pub fn update_display_name(&mut self) {
        let mut label = String::new();

        if !self.categoria.is_empty() {
            label.push_str("Cat. ");
            label.push_str(&self.categoria);
        }

        if !self.fogli.is_empty() && !self.numeri.is_empty() {
            label.push_str(" - Fg. ");
            label.push_str(&self.fogli[0]);
            label.push_str(" Part. ");
            label.push_str(&self.numeri[0]);
        }

        if let Some(sub) = self.subalterni.first() {
            if !sub.is_empty() {
                label.push_str(" Sub. ");
                label.push_str(sub);
            }
        }

        if let Some(indirizzo) = self.indirizzi.first() {
            if !indirizzo.is_empty() {
                label.push_str(" - ");
                label.push_str(indirizzo);
            }
        }

        let mut label = label.trim().to_string();
        if let Some(stripped) = label.strip_prefix('-') {
            label = stripped.trim().to_string();
        }
        self.display_name = label;
    }
}
