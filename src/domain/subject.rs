// ==========================================
// Catasto Graph - Soggetto (persona fisica o giuridica)
// ==========================================
// Nodo del grafo con identità subject_id. Il soggetto è
// l'unico proprietario della propria collezione di relazioni
// di titolarità in uscita.
// ==========================================

use crate::domain::ownership::Ownership;
use serde::{Deserialize, Serialize};

/// Variante del soggetto, discriminata dal campo tipo del
/// tracciato .sog ("P" persona fisica, "G" persona giuridica).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tipo")]
pub enum SubjectKind {
    /// Persona fisica
    Person {
        cognome: String,
        nome: String,
        sesso: String,
        data_nascita: String,
        luogo_nascita: String,
        codice_fiscale: String,
        indicazioni_supplementari: String,
    },
    /// Persona giuridica
    LegalEntity {
        denominazione: String,
        sede: String,
        partita_iva: String,
    },
}

impl SubjectKind {
    /// Codice discriminatore del tracciato.
    pub fn type_code(&self) -> &'static str {
        match self {
            SubjectKind::Person { .. } => "P",
            SubjectKind::LegalEntity { .. } => "G",
        }
    }
}

/// Soggetto intestatario.
///
/// `nome` e `identificativo_fiscale` sono normalizzati al parse
/// a seconda della variante (codice fiscale per le persone
/// fisiche, partita IVA per le giuridiche).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    // ===== Identità =====
    pub subject_id: String,

    // ===== Chiave amministrativa =====
    pub codice_amministrativo: String,
    pub sezione: String,

    // ===== Variante =====
    pub kind: SubjectKind,

    // ===== Campi normalizzati =====
    pub nome: String,
    pub identificativo_fiscale: String,
    pub display_name: String,

    // ===== Relazioni di titolarità in uscita =====
    pub titolarita: Vec<Ownership>,
}

impl Subject {
    /// Compone la display label. Non fallisce mai.
    pub fn compose_display_name(nome: &str, identificativo_fiscale: &str) -> String {
        format!("{} ({})", nome, identificativo_fiscale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_codes() {
        let person = SubjectKind::Person {
            cognome: "Rossi".into(),
            nome: "Mario".into(),
            sesso: "M".into(),
            data_nascita: "19800101".into(),
            luogo_nascita: "Roma".into(),
            codice_fiscale: "RSSMRA80A01H501Z".into(),
            indicazioni_supplementari: String::new(),
        };
        assert_eq!(person.type_code(), "P");

        let entity = SubjectKind::LegalEntity {
            denominazione: "ACME SRL".into(),
            sede: "Roma".into(),
            partita_iva: "01234567890".into(),
        };
        assert_eq!(entity.type_code(), "G");
    }

    #[test]
    fn test_display_name_format() {
        let label = Subject::compose_display_name("Mario Rossi", "RSSMRA80A01H501Z");
        assert_eq!(label, "Mario Rossi (RSSMRA80A01H501Z)");
    }
}
