// ==========================================
// Catasto Graph - parser del tracciato .tit (titolarità)
// ==========================================
// Una riga -> una Titolarità. L'estrazione degli estremi
// (soggetto al campo 2, immobile al campo 4) è separata dalla
// decodifica completa: l'orchestratore risolve prima gli
// estremi contro lo store e decodifica la riga solo se
// entrambi esistono.
// ==========================================

use crate::domain::ownership::{ImmobileRef, Ownership};
use crate::domain::right_code::RightCode;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::record::RawRecord;

/// Numero minimo di campi di una riga .tit.
pub const MIN_TITLE_FIELDS: usize = 32;

/// Identificativo del soggetto titolare (campo 2).
pub fn extract_subject_id(record: &RawRecord) -> &str {
    record.field(2)
}

/// Identificativo dell'immobile oggetto del titolo (campo 4).
pub fn extract_immobile_id(record: &RawRecord) -> &str {
    record.field(4)
}

/// Decodifica una riga .tit in una Titolarità verso l'immobile
/// già risolto dall'orchestratore.
pub fn parse_title(record: &RawRecord, target: ImmobileRef) -> ImportResult<Ownership> {
    if record.len() < MIN_TITLE_FIELDS {
        return Err(ImportError::TooFewFields {
            line_no: record.line_no(),
            expected: MIN_TITLE_FIELDS,
            actual: record.len(),
        });
    }

    let codice_diritto = record.field(6).to_string();
    let right = RightCode::from_code(&codice_diritto).ok_or_else(|| {
        ImportError::UnknownRightCode {
            line_no: record.line_no(),
            code: codice_diritto.clone(),
        }
    })?;

    let quota_numeratore = record.field(8).to_string();
    let quota_denominatore = record.field(9).to_string();
    let display_name = compose_display_name(right, &quota_numeratore, &quota_denominatore);

    Ok(Ownership {
        codice_amministrativo: record.field(0).to_string(),
        sezione: record.field(1).to_string(),
        tipo_soggetto: record.field(3).to_string(),
        tipo_immobile: record.field(5).to_string(),
        codice_diritto,
        titolo_non_codificato: record.field(7).to_string(),
        quota_numeratore,
        quota_denominatore,
        regime: record.field(10).to_string(),
        soggetto_di_riferimento: record.field(11).to_string(),
        data_validita: record.field(12).to_string(),
        tipo_nota: record.field(13).to_string(),
        numero_nota: record.field(14).to_string(),
        progressivo_nota: record.field(15).to_string(),
        anno_nota: record.field(16).to_string(),
        data_registrazione_atti: record.field(17).to_string(),
        partita: record.field(18).to_string(),
        data_validita2: record.field(19).to_string(),
        tipo_nota2: record.field(20).to_string(),
        numero_nota2: record.field(21).to_string(),
        progressivo_nota2: record.field(22).to_string(),
        anno_nota2: record.field(23).to_string(),
        data_registrazione_atti2: record.field(24).to_string(),
        identificativo_mutazione_iniziale: record.field(25).to_string(),
        identificativo_mutazione_finale: record.field(26).to_string(),
        identificativo_titolarita: record.field(27).to_string(),
        codice_causale_atto_generante: record.field(28).to_string(),
        descrizione_atto_generante: record.field(29).to_string(),
        codice_causale_atto_conclusivo: record.field(30).to_string(),
        descrizione_atto_conclusivo: record.field(31).to_string(),
        display_name,
        target,
    })
}

/// Label della titolarità: descrizione del diritto, con la quota
/// in coda quando numeratore e denominatore differiscono
/// entrambi dalla stringa "0".
fn compose_display_name(right: RightCode, numeratore: &str, denominatore: &str) -> String {
    if numeratore != "0" && denominatore != "0" {
        format!("{} ({}/{})", right.description(), numeratore, denominatore)
    } else {
        right.description().to_string()
    }
}
