// ==========================================
// Catasto Graph - aggregatore del tracciato .fab (fabbricati)
// ==========================================
// Un fabbricato logico è sparso su più righe fisiche (tipi
// record 1-5) che condividono la chiave composta dei campi 0-4.
// Primo passaggio: raggruppamento per chiave. Secondo
// passaggio: dispatch per sottotipo (campo 5) su un builder
// esplicito, con finalize che produce l'entità immutabile.
//
// Vincoli di ordinamento (comportamento preservato):
// - i sotto-record 2-5 che precedono il tipo 1 del proprio
//   gruppo nell'ordine del file vengono scartati, non bufferizzati
// - più record di tipo 1 per la stessa chiave: vince l'ultimo
// ==========================================

use crate::domain::building::Building;
use crate::importer::record::RawRecord;
use std::collections::HashMap;
use tracing::debug;

/// Numero minimo di campi perché una riga .fab partecipi a un
/// gruppo (chiave composta + sottotipo).
pub const MIN_BUILDING_FIELDS: usize = 6;

/// Numero minimo di campi del record base (tipo 1).
const MIN_BASE_FIELDS: usize = 20;

/// Chiave composta di raggruppamento (campi 0-4).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildingKey {
    pub codice_amministrativo: String,
    pub sezione: String,
    pub immobile_id: String,
    pub tipo_immobile: String,
    pub progressivo: String,
}

impl BuildingKey {
    pub fn from_record(record: &RawRecord) -> Self {
        Self {
            codice_amministrativo: record.field(0).to_string(),
            sezione: record.field(1).to_string(),
            immobile_id: record.field(2).to_string(),
            tipo_immobile: record.field(3).to_string(),
            progressivo: record.field(4).to_string(),
        }
    }
}

/// Sottotipo record del tracciato .fab (campo 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildingRecordKind {
    /// Tipo 1 - caratteristiche dell'unità immobiliare
    Base,
    /// Tipo 2 - identificativi
    Identifiers,
    /// Tipo 3 - indirizzi
    Addresses,
    /// Tipo 4 - utilità comuni
    SharedFacilities,
    /// Tipo 5 - riserve
    Reserves,
    /// Sottotipo non riconosciuto
    Unknown,
}

impl BuildingRecordKind {
    pub fn from_code(code: &str) -> Self {
        match code {
            "1" => BuildingRecordKind::Base,
            "2" => BuildingRecordKind::Identifiers,
            "3" => BuildingRecordKind::Addresses,
            "4" => BuildingRecordKind::SharedFacilities,
            "5" => BuildingRecordKind::Reserves,
            _ => BuildingRecordKind::Unknown,
        }
    }
}

/// Raggruppa le righe .fab per chiave composta, preservando
/// l'ordine di incontro nel file all'interno di ogni gruppo.
/// Le righe con meno di 6 campi non partecipano.
pub fn group_records(records: Vec<RawRecord>) -> HashMap<BuildingKey, Vec<RawRecord>> {
    let mut groups: HashMap<BuildingKey, Vec<RawRecord>> = HashMap::new();
    for record in records {
        if record.len() < MIN_BUILDING_FIELDS {
            continue;
        }
        let key = BuildingKey::from_record(&record);
        groups.entry(key).or_default().push(record);
    }
    groups
}

/// Accumulatore di un singolo gruppo di righe .fab.
#[derive(Debug, Default)]
pub struct BuildingBuilder {
    base: Option<Building>,
}

impl BuildingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applica un sotto-record al gruppo.
    pub fn apply(&mut self, record: &RawRecord) {
        match BuildingRecordKind::from_code(record.field(5)) {
            BuildingRecordKind::Base => {
                // l'ultimo tipo 1 vince, anche se malformato (None)
                self.base = parse_base(record);
            }
            BuildingRecordKind::Identifiers => {
                if let Some(building) = self.base.as_mut() {
                    append_identifiers(building, record);
                }
            }
            BuildingRecordKind::Addresses => {
                if let Some(building) = self.base.as_mut() {
                    append_addresses(building, record);
                }
            }
            BuildingRecordKind::SharedFacilities => {
                if let Some(building) = self.base.as_mut() {
                    append_shared_facilities(building, record);
                }
            }
            BuildingRecordKind::Reserves => {
                if let Some(building) = self.base.as_mut() {
                    append_reserves(building, record);
                }
            }
            BuildingRecordKind::Unknown => {
                debug!(
                    line_no = record.line_no(),
                    tipo_record = record.field(5),
                    "sottotipo record .fab sconosciuto, riga ignorata"
                );
            }
        }
    }

    /// Produce il fabbricato finale del gruppo, con la display
    /// label ricalcolata una sola volta. `None` se il gruppo non
    /// ha mai visto un record di tipo 1 valido.
    pub fn finalize(mut self) -> Option<Building> {
        if let Some(building) = self.base.as_mut() {
            building.update_display_name();
        }
        self.base
    }
}

/// Decodifica il record base (tipo 1); `None` sotto i 20 campi.
fn parse_base(record: &RawRecord) -> Option<Building> {
    if record.len() < MIN_BASE_FIELDS {
        debug!(
            line_no = record.line_no(),
            actual = record.len(),
            "record base .fab troppo corto, gruppo senza base"
        );
        return None;
    }

    Some(Building {
        codice_amministrativo: record.field(0).to_string(),
        sezione: record.field(1).to_string(),
        immobile_id: record.field(2).to_string(),
        tipo_immobile: record.field(3).to_string(),
        progressivo: record.field(4).to_string(),
        // il campo 5 è il sottotipo record, non viene conservato
        zona: record.field(6).to_string(),
        categoria: record.field(7).to_string(),
        classe: record.field(8).to_string(),
        consistenza: record.field(9).to_string(),
        superficie: record.field(10).to_string(),
        rendita_lire: record.field(11).to_string(),
        rendita_euro: record.field(12).to_string(),
        lotto: record.field(13).to_string(),
        edificio: record.field(14).to_string(),
        scala: record.field(15).to_string(),
        interno1: record.field(16).to_string(),
        interno2: record.field(17).to_string(),
        piano1: record.field(18).to_string(),
        piano2: record.field(19).to_string(),
        piano3: record.field(20).to_string(),
        piano4: record.field(21).to_string(),
        data_efficacia_generante: record.field(22).to_string(),
        data_registrazione_generante: record.field(23).to_string(),
        tipo_nota_generante: record.field(24).to_string(),
        numero_nota_generante: record.field(25).to_string(),
        progressivo_nota_generante: record.field(26).to_string(),
        anno_nota_generante: record.field(27).to_string(),
        data_efficacia_conclusiva: record.field(28).to_string(),
        data_registrazione_conclusiva: record.field(29).to_string(),
        tipo_nota_conclusiva: record.field(30).to_string(),
        numero_nota_conclusiva: record.field(31).to_string(),
        progressivo_nota_conclusiva: record.field(32).to_string(),
        anno_nota_conclusiva: record.field(33).to_string(),
        partita: record.field(34).to_string(),
        annotazione: record.field(35).to_string(),
        identificativo_mutazione_iniziale: record.field(36).to_string(),
        identificativo_mutazione_finale: record.field(37).to_string(),
        protocollo_notifica: record.field(38).to_string(),
        data_notifica: record.field(39).to_string(),
        codice_causale_atto_generante: record.field(40).to_string(),
        descrizione_atto_generante: record.field(41).to_string(),
        codice_causale_atto_conclusivo: record.field(42).to_string(),
        descrizione_atto_conclusivo: record.field(43).to_string(),
        flag_classamento: record.field(44).to_string(),
        ..Default::default()
    })
}

/// Tipo 2 - identificativi: finestre di 6 campi da posizione 6.
/// La voce è significativa se sezione urbana, foglio o numero
/// non sono vuoti.
fn append_identifiers(building: &mut Building, record: &RawRecord) {
    let mut pos = 6;
    while pos + 5 < record.len() {
        let sezione_urbana = record.field(pos);
        let foglio = record.field(pos + 1);
        let numero = record.field(pos + 2);

        if !sezione_urbana.is_empty() || !foglio.is_empty() || !numero.is_empty() {
            building.sezioni_urbane.push(sezione_urbana.to_string());
            building.fogli.push(foglio.to_string());
            building.numeri.push(numero.to_string());
            building.denominatori.push(record.field(pos + 3).to_string());
            building.subalterni.push(record.field(pos + 4).to_string());
            building.edificialita.push(record.field(pos + 5).to_string());
        }
        pos += 6;
    }
}

/// Tipo 3 - indirizzi: finestre di 6 campi da posizione 6.
/// La voce è significativa se l'indirizzo non è vuoto.
fn append_addresses(building: &mut Building, record: &RawRecord) {
    let mut pos = 6;
    while pos + 5 < record.len() {
        let indirizzo = record.field(pos + 1);

        if !indirizzo.is_empty() {
            building.toponimi.push(record.field(pos).to_string());
            building.indirizzi.push(indirizzo.to_string());
            building.civici1.push(record.field(pos + 2).to_string());
            building.civici2.push(record.field(pos + 3).to_string());
            building.civici3.push(record.field(pos + 4).to_string());
            building.codici_strada.push(record.field(pos + 5).to_string());
        }
        pos += 6;
    }
}

/// Tipo 4 - utilità comuni: finestre di 5 campi da posizione 6.
/// La voce è significativa se foglio o numero non sono vuoti.
fn append_shared_facilities(building: &mut Building, record: &RawRecord) {
    let mut pos = 6;
    while pos + 4 < record.len() {
        let foglio = record.field(pos + 1);
        let numero = record.field(pos + 2);

        if !foglio.is_empty() || !numero.is_empty() {
            building
                .utilita_sezioni_urbane
                .push(record.field(pos).to_string());
            building.utilita_fogli.push(foglio.to_string());
            building.utilita_numeri.push(numero.to_string());
            building
                .utilita_denominatori
                .push(record.field(pos + 3).to_string());
            building
                .utilita_subalterni
                .push(record.field(pos + 4).to_string());
        }
        pos += 5;
    }
}

/// Tipo 5 - riserve: finestre di 2 campi da posizione 6.
/// La voce è significativa se il codice riserva non è vuoto.
fn append_reserves(building: &mut Building, record: &RawRecord) {
    let mut pos = 6;
    while pos + 1 < record.len() {
        let codice_riserva = record.field(pos);

        if !codice_riserva.is_empty() {
            building.codici_riserva.push(codice_riserva.to_string());
            building
                .partite_iscrizione_riserva
                .push(record.field(pos + 1).to_string());
        }
        pos += 2;
    }
}
