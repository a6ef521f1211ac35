// ==========================================
// Catasto Graph - parser del tracciato .ter (terreni)
// ==========================================
// Una riga -> un Terreno. Le righe con meno di 23 campi sono
// errori strutturali della singola riga. La superficie
// (ettari/are/centiare) è coercita: vuoto -> 0, altrimenti
// intero; un valore non vuoto malformato fallisce la riga.
// ==========================================

use crate::domain::parcel::Parcel;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::record::RawRecord;

/// Numero minimo di campi di una riga .ter.
pub const MIN_PARCEL_FIELDS: usize = 23;

/// Sottotipo record delle righe canoniche del tracciato .ter.
pub const PARCEL_BASE_RECORD_TYPE: &str = "1";

/// Decodifica una riga .ter in un Terreno.
pub fn parse_parcel(record: &RawRecord) -> ImportResult<Parcel> {
    if record.len() < MIN_PARCEL_FIELDS {
        return Err(ImportError::TooFewFields {
            line_no: record.line_no(),
            expected: MIN_PARCEL_FIELDS,
            actual: record.len(),
        });
    }

    let foglio = record.field(6).to_string();
    let numero = record.field(7).to_string();
    let qualita = record.field(11).to_string();
    let display_name = Parcel::compose_display_name(&foglio, &numero, &qualita);

    Ok(Parcel {
        codice_amministrativo: record.field(0).to_string(),
        sezione: record.field(1).to_string(),
        immobile_id: record.field(2).to_string(),
        tipo_immobile: record.field(3).to_string(),
        progressivo: record.field(4).to_string(),
        tipo_record: record.field(5).to_string(),
        foglio,
        numero,
        denominatore: record.field(8).to_string(),
        subalterno: record.field(9).to_string(),
        edificabilita: record.field(10).to_string(),
        qualita,
        classe: record.field(12).to_string(),
        ettari: parse_area_field(record, 13, "ettari")?,
        are: parse_area_field(record, 14, "are")?,
        centiare: parse_area_field(record, 15, "centiare")?,
        flag_reddito: record.field(16).to_string(),
        flag_porzione: record.field(17).to_string(),
        flag_deduzioni: record.field(18).to_string(),
        reddito_dominicale_lire: record.field(19).to_string(),
        reddito_agrario_lire: record.field(20).to_string(),
        reddito_dominicale_euro: record.field(21).to_string(),
        reddito_agrario_euro: record.field(22).to_string(),
        display_name,
    })
}

/// Coercizione dei campi superficie: vuoto -> 0, altrimenti intero.
fn parse_area_field(record: &RawRecord, idx: usize, name: &'static str) -> ImportResult<i32> {
    let value = record.field(idx);
    if value.is_empty() {
        return Ok(0);
    }
    value.parse::<i32>().map_err(|_| ImportError::NumericField {
        line_no: record.line_no(),
        field: name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ter_line(fields: &[&str]) -> RawRecord {
        RawRecord::new(1, fields.iter().map(|f| f.to_string()).collect())
    }

    fn valid_fields() -> Vec<&'static str> {
        vec![
            "H501", "A", "T001", "T", "1", "1", "12", "45", "", "", "", "SEMINATIVO", "2", "1",
            "20", "50", "1", "", "", "100", "50", "5.16", "2.58",
        ]
    }

    #[test]
    fn test_parse_valid_line() {
        let parcel = parse_parcel(&ter_line(&valid_fields())).unwrap();
        assert_eq!(parcel.immobile_id, "T001");
        assert_eq!(parcel.tipo_record, "1");
        assert_eq!(parcel.foglio, "12");
        assert_eq!(parcel.numero, "45");
        assert_eq!(parcel.ettari, 1);
        assert_eq!(parcel.are, 20);
        assert_eq!(parcel.centiare, 50);
        assert_eq!(parcel.display_name, "Foglio 12 - Part. 45 (SEMINATIVO)");
    }

    #[test]
    fn test_blank_surface_fields_default_to_zero() {
        let mut fields = valid_fields();
        fields[13] = "";
        fields[14] = "";
        fields[15] = "";
        let parcel = parse_parcel(&ter_line(&fields)).unwrap();
        assert_eq!(parcel.ettari, 0);
        assert_eq!(parcel.are, 0);
        assert_eq!(parcel.centiare, 0);
    }

    #[test]
    fn test_malformed_surface_fails_the_line() {
        let mut fields = valid_fields();
        fields[14] = "abc";
        let err = parse_parcel(&ter_line(&fields)).unwrap_err();
        assert!(matches!(
            err,
            ImportError::NumericField { field: "are", .. }
        ));
        assert!(err.is_line_scoped());
    }

    #[test]
    fn test_too_few_fields_fails_the_line() {
        let record = ter_line(&["H501", "A", "T001"]);
        let err = parse_parcel(&record).unwrap_err();
        assert!(matches!(err, ImportError::TooFewFields { expected: 23, .. }));
    }
}
