// ==========================================
// Catasto Graph - parser del tracciato .sog (soggetti)
// ==========================================
// Una riga -> un Soggetto. Il campo 3 discrimina la variante:
// "P" persona fisica, "G" persona giuridica; qualunque altro
// valore fallisce la riga. I campi oltre il minimo sono
// posizionali e tollerati se assenti (valgono vuoto).
// ==========================================

use crate::domain::subject::{Subject, SubjectKind};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::record::RawRecord;

/// Numero minimo di campi di una riga .sog.
pub const MIN_SUBJECT_FIELDS: usize = 5;

/// Decodifica una riga .sog in un Soggetto.
pub fn parse_subject(record: &RawRecord) -> ImportResult<Subject> {
    if record.len() < MIN_SUBJECT_FIELDS {
        return Err(ImportError::TooFewFields {
            line_no: record.line_no(),
            expected: MIN_SUBJECT_FIELDS,
            actual: record.len(),
        });
    }

    let tipo_soggetto = record.field(3);
    let (kind, nome, identificativo_fiscale) = match tipo_soggetto {
        "P" => {
            let cognome = record.field(4).to_string();
            let nome_persona = record.field(5).to_string();
            let codice_fiscale = record.field(9).to_string();
            let nome = format!("{} {}", nome_persona, cognome).trim().to_string();
            (
                SubjectKind::Person {
                    cognome,
                    nome: nome_persona,
                    sesso: record.field(6).to_string(),
                    data_nascita: record.field(7).to_string(),
                    luogo_nascita: record.field(8).to_string(),
                    codice_fiscale: codice_fiscale.clone(),
                    indicazioni_supplementari: record.field(10).to_string(),
                },
                nome,
                codice_fiscale,
            )
        }
        "G" => {
            let denominazione = record.field(4).to_string();
            let partita_iva = record.field(6).to_string();
            (
                SubjectKind::LegalEntity {
                    denominazione: denominazione.clone(),
                    sede: record.field(5).to_string(),
                    partita_iva: partita_iva.clone(),
                },
                denominazione,
                partita_iva,
            )
        }
        other => {
            return Err(ImportError::UnknownSubjectType {
                line_no: record.line_no(),
                value: other.to_string(),
            })
        }
    };

    let display_name = Subject::compose_display_name(&nome, &identificativo_fiscale);

    Ok(Subject {
        codice_amministrativo: record.field(0).to_string(),
        sezione: record.field(1).to_string(),
        subject_id: record.field(2).to_string(),
        kind,
        nome,
        identificativo_fiscale,
        display_name,
        titolarita: Vec::new(),
    })
}
