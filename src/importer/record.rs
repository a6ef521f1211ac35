// ==========================================
// Catasto Graph - decodifica dei tracciati record
// ==========================================
// I file catastali sono pipe-delimited, senza escaping, con
// campi indirizzati per posizione. L'accesso fuori intervallo
// restituisce campo vuoto, mai un errore: le righe corte sono
// gestite dai singoli parser tramite la soglia minima di campi.
// ==========================================

use crate::importer::error::ImportResult;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Una riga decodificata di un tracciato catastale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    line_no: usize,
    fields: Vec<String>,
}

impl RawRecord {
    pub fn new(line_no: usize, fields: Vec<String>) -> Self {
        Self { line_no, fields }
    }

    /// Decodifica una singola riga (split su '|', trim per campo).
    pub fn from_line(line: &str, line_no: usize) -> Self {
        let fields = line.split('|').map(|f| f.trim().to_string()).collect();
        Self { line_no, fields }
    }

    /// Campo alla posizione `idx`; vuoto se fuori intervallo.
    pub fn field(&self, idx: usize) -> &str {
        self.fields.get(idx).map(String::as_str).unwrap_or("")
    }

    /// Numero di campi presenti sulla riga.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Numero di riga nel file sorgente (1-based).
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// True se tutti i campi della riga sono vuoti.
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.is_empty())
    }
}

/// Legge un intero tracciato in record decodificati.
///
/// Le righe completamente vuote vengono scartate. I numeri di
/// riga sono quelli fisici del file (1-based): le righe saltate,
/// comprese quelle vuote consumate dal reader, non li sfalsano.
pub fn read_records(path: &Path) -> ImportResult<Vec<RawRecord>> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(file);

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row = result?;
        // posizione fisica del record, non l'indice di enumerazione
        let line_no = row
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 1);
        let fields: Vec<String> = row.iter().map(|f| f.to_string()).collect();
        let record = RawRecord::new(line_no, fields);
        if record.is_blank() {
            continue;
        }
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_field_access_is_tolerant() {
        let record = RawRecord::from_line("A|B|C", 1);
        assert_eq!(record.field(0), "A");
        assert_eq!(record.field(2), "C");
        assert_eq!(record.field(3), "");
        assert_eq!(record.field(99), "");
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let record = RawRecord::from_line(" A | B |  ", 1);
        assert_eq!(record.field(0), "A");
        assert_eq!(record.field(1), "B");
        assert_eq!(record.field(2), "");
    }

    #[test]
    fn test_trailing_empty_fields_are_kept() {
        let record = RawRecord::from_line("A|B|||", 1);
        assert_eq!(record.len(), 5);
    }

    #[test]
    fn test_read_records_skips_blank_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "A|B|C").unwrap();
        writeln!(file, "||").unwrap();
        writeln!(file, "D|E|F").unwrap();

        let records = read_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].field(0), "A");
        assert_eq!(records[1].field(0), "D");
        // i numeri di riga restano quelli fisici del file
        assert_eq!(records[1].line_no(), 3);
    }

    #[test]
    fn test_line_numbers_survive_physically_empty_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "A|B|C").unwrap();
        // riga fisicamente vuota, consumata dal reader senza
        // produrre alcun record
        writeln!(file).unwrap();
        writeln!(file, "||").unwrap();
        writeln!(file, "D|E|F").unwrap();

        let records = read_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line_no(), 1);
        assert_eq!(records[1].field(0), "D");
        assert_eq!(records[1].line_no(), 4);
    }
}
