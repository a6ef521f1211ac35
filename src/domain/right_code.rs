// ==========================================
// Catasto Graph - codici di diritto
// ==========================================
// Enumerazione tipizzata dei codici di diritto reale presenti
// nelle titolarità. Attenzione: il tracciato ministeriale
// riusa alcuni codici (es. "20", "30") per diritti diversi a
// seconda del contesto; la risoluzione per codice scorre la
// tabella in ordine di dichiarazione e vince la prima voce.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diritto reale codificato di una titolarità.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RightCode {
    Proprieta,
    ProprietaSuperficiaria,
    ProprietaPerArea,
    NudaProprieta,
    NudaProprietaSuperficiaria,
    Abitazione,
    Comproprietario,
    AbitazioneSuProprietaSuperficiaria,
    DirittoDelConcedente,
    ComproprietarioPer,
    Enfiteusi,
    Superficie,
    Uso,
    ComproprietarioDelFabbricato,
    UsoProprietaSuperficiaria,
    Usufrutto,
    UsufruttoConDirittoAccrescimento,
    UsufruttoSuEnfiteusi,
    UsufruttoSuProprietaSuperficiaria,
    ComproprietarioPerArea,
    Servitu,
    Oneri,
    ConcedenteInParte,
    LivellarioParzialePer,
    UsufruttuarioParzialePer,
    Livellario,
    LivellarioPer,
    LivellarioInParte,
    EnfiteutaInParte,
    ColonoPerpetuo,
    ColonoPerpetuoPer,
    ColonoPerpetuoInParte,
    UsufruttuarioParziale,
    CousufruttuarioGenerale,
    UsufruttuarioGeneraleDiLivello,
    UsufruttuarioParzialeDiLivello,
    UsufruttuarioParzialeDiEnfiteusi,
    UsufruttuarioGeneraleDiColonia,
    UsufruttuarioParzialeDiColonia,
    UsufruttuarioGeneraleDiDominioDiretto,
    UsufruttuarioParzialeDiDominioDiretto,
    CousufruttuarioPer,
    UsuarioPerpetuo,
    UsuarioATempoDeterminato,
    CousufruttuarioDiLivello,
    CousufruttuarioGeneraleDiLivello,
    UsufruttuarioDiLivelloDi,
    ComproprietarioPerParteDi,
    UsufruttuarioDiColoniaPer,
    UsufruttuarioDiDominioDirettoPer,
    CousufruttuarioGeneraleConDirittoDi,
    UtilistaDellaSuperficie,
    UtilistaDellaSuperficiePer,
    Beneficiario,
    BeneficiarioPer,
    BeneficiarioDiDominioDiretto,
    Possessore,
    PossessorePer,
    Compossessore,
    CompossessorePer,
    Contestatario,
    ContestatarioPer,
    ContestatarioPerUsufrutto,
    PresenzaTitoloNonCodificato,
    PresenzaTitoloNonCodificato990,
    AssenzaTitolo,
}

/// Tabella codice -> diritto, in ordine di dichiarazione.
/// La risoluzione per codice restituisce la prima voce che combacia.
const RIGHT_CODE_TABLE: &[(&str, RightCode)] = &[
    ("10", RightCode::Proprieta),
    ("1s", RightCode::ProprietaSuperficiaria),
    ("1t", RightCode::ProprietaPerArea),
    ("20", RightCode::NudaProprieta),
    ("2s", RightCode::NudaProprietaSuperficiaria),
    ("30", RightCode::Abitazione),
    ("3", RightCode::Comproprietario),
    ("3s", RightCode::AbitazioneSuProprietaSuperficiaria),
    ("40", RightCode::DirittoDelConcedente),
    ("4", RightCode::ComproprietarioPer),
    ("50", RightCode::Enfiteusi),
    ("60", RightCode::Superficie),
    ("70", RightCode::Uso),
    ("7", RightCode::ComproprietarioDelFabbricato),
    ("7s", RightCode::UsoProprietaSuperficiaria),
    ("80", RightCode::Usufrutto),
    ("8a", RightCode::UsufruttoConDirittoAccrescimento),
    ("8e", RightCode::UsufruttoSuEnfiteusi),
    ("8s", RightCode::UsufruttoSuProprietaSuperficiaria),
    ("8", RightCode::ComproprietarioPerArea),
    ("90", RightCode::Servitu),
    ("100", RightCode::Oneri),
    ("12", RightCode::ConcedenteInParte),
    ("14", RightCode::LivellarioParzialePer),
    ("15", RightCode::UsufruttuarioParzialePer),
    ("20", RightCode::Livellario),
    ("21", RightCode::LivellarioPer),
    ("22", RightCode::LivellarioInParte),
    ("25", RightCode::EnfiteutaInParte),
    ("26", RightCode::ColonoPerpetuo),
    ("27", RightCode::ColonoPerpetuoPer),
    ("28", RightCode::ColonoPerpetuoInParte),
    ("30", RightCode::UsufruttuarioParziale),
    ("33", RightCode::CousufruttuarioGenerale),
    ("36", RightCode::UsufruttuarioGeneraleDiLivello),
    ("37", RightCode::UsufruttuarioParzialeDiLivello),
    ("39", RightCode::UsufruttuarioParzialeDiEnfiteusi),
    ("40", RightCode::UsufruttuarioGeneraleDiColonia),
    ("41", RightCode::UsufruttuarioParzialeDiColonia),
    ("42", RightCode::UsufruttuarioGeneraleDiDominioDiretto),
    ("43", RightCode::UsufruttuarioParzialeDiDominioDiretto),
    ("50", RightCode::CousufruttuarioPer),
    ("52", RightCode::UsuarioPerpetuo),
    ("53", RightCode::UsuarioATempoDeterminato),
    ("60", RightCode::CousufruttuarioDiLivello),
    ("61", RightCode::CousufruttuarioGeneraleDiLivello),
    ("62", RightCode::UsufruttuarioDiLivelloDi),
    ("64", RightCode::ComproprietarioPerParteDi),
    ("70", RightCode::UsufruttuarioDiColoniaPer),
    ("71", RightCode::UsufruttuarioDiDominioDirettoPer),
    ("72", RightCode::CousufruttuarioGeneraleConDirittoDi),
    ("16", RightCode::UtilistaDellaSuperficie),
    ("17", RightCode::UtilistaDellaSuperficiePer),
    ("35", RightCode::Beneficiario),
    ("65", RightCode::BeneficiarioPer),
    ("54", RightCode::BeneficiarioDiDominioDiretto),
    ("46", RightCode::Possessore),
    ("47", RightCode::PossessorePer),
    ("48", RightCode::Compossessore),
    ("49", RightCode::CompossessorePer),
    ("55", RightCode::Contestatario),
    ("56", RightCode::ContestatarioPer),
    ("57", RightCode::ContestatarioPerUsufrutto),
    ("99", RightCode::PresenzaTitoloNonCodificato),
    ("990", RightCode::PresenzaTitoloNonCodificato990),
    ("0", RightCode::AssenzaTitolo),
];

impl RightCode {
    /// Risolve un codice di diritto; `None` se sconosciuto.
    pub fn from_code(code: &str) -> Option<RightCode> {
        RIGHT_CODE_TABLE
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, right)| *right)
    }

    /// Codice del tracciato.
    pub fn code(&self) -> &'static str {
        RIGHT_CODE_TABLE
            .iter()
            .find(|(_, right)| right == self)
            .map(|(code, _)| *code)
            .unwrap_or("")
    }

    /// Descrizione del diritto.
    pub fn description(&self) -> &'static str {
        match self {
            RightCode::Proprieta => "Proprietà",
            RightCode::ProprietaSuperficiaria => "Proprietà superficiaria",
            RightCode::ProprietaPerArea => "Proprietà per l'area",
            RightCode::NudaProprieta => "Nuda proprietà",
            RightCode::NudaProprietaSuperficiaria => "Nuda proprietà superficiaria",
            RightCode::Abitazione => "Abitazione",
            RightCode::Comproprietario => "Comproprietario",
            RightCode::AbitazioneSuProprietaSuperficiaria => {
                "Abitazione su proprietà superficiaria"
            }
            RightCode::DirittoDelConcedente => "Diritto del concedente",
            RightCode::ComproprietarioPer => "Comproprietario per",
            RightCode::Enfiteusi => "Enfiteusi",
            RightCode::Superficie => "Superficie",
            RightCode::Uso => "Uso",
            RightCode::ComproprietarioDelFabbricato => "Comproprietario del fabbricato",
            RightCode::UsoProprietaSuperficiaria => "Uso proprietà superficiaria",
            RightCode::Usufrutto => "Usufrutto",
            RightCode::UsufruttoConDirittoAccrescimento => {
                "Usufrutto con diritto di accrescimento"
            }
            RightCode::UsufruttoSuEnfiteusi => "Usufrutto su enfiteusi",
            RightCode::UsufruttoSuProprietaSuperficiaria => {
                "Usufrutto su proprietà superficiaria"
            }
            RightCode::ComproprietarioPerArea => "Comproprietario per l'area",
            RightCode::Servitu => "Servità",
            RightCode::Oneri => "Oneri",
            RightCode::ConcedenteInParte => "Concedente in parte",
            RightCode::LivellarioParzialePer => "Livellario parziale per",
            RightCode::UsufruttuarioParzialePer => "Usufruttuario parziale per",
            RightCode::Livellario => "Livellario",
            RightCode::LivellarioPer => "Livellario per",
            RightCode::LivellarioInParte => "Livellario in parte",
            RightCode::EnfiteutaInParte => "Enfiteuta in parte",
            RightCode::ColonoPerpetuo => "Colono perpetuo",
            RightCode::ColonoPerpetuoPer => "Colono perpetuo per",
            RightCode::ColonoPerpetuoInParte => "Colono perpetuo in parte",
            RightCode::UsufruttuarioParziale => "Usufruttuario parziale",
            RightCode::CousufruttuarioGenerale => "Cousufruttuario generale",
            RightCode::UsufruttuarioGeneraleDiLivello => "Usufruttuario generale di livello",
            RightCode::UsufruttuarioParzialeDiLivello => "Usufruttuario parziale di livello",
            RightCode::UsufruttuarioParzialeDiEnfiteusi => "Usufruttuario parziale di enfiteusi",
            RightCode::UsufruttuarioGeneraleDiColonia => "Usufruttuario generale di colonia",
            RightCode::UsufruttuarioParzialeDiColonia => "Usufruttuario parziale di colonia",
            RightCode::UsufruttuarioGeneraleDiDominioDiretto => {
                "Usufruttuario generale di dominio diretto"
            }
            RightCode::UsufruttuarioParzialeDiDominioDiretto => {
                "Usufruttuario parziale di dominio diretto"
            }
            RightCode::CousufruttuarioPer => "Cousufruttuario per",
            RightCode::UsuarioPerpetuo => "Usuario perpetuo",
            RightCode::UsuarioATempoDeterminato => "Usuario a tempo determinato",
            RightCode::CousufruttuarioDiLivello => "Cousufruttuario di livello",
            RightCode::CousufruttuarioGeneraleDiLivello => "Cousufruttuario generale di livello",
            RightCode::UsufruttuarioDiLivelloDi => "Usufruttuario di livello di",
            RightCode::ComproprietarioPerParteDi => "Comproprietario per parte di",
            RightCode::UsufruttuarioDiColoniaPer => "Usufruttuario di colonia per",
            RightCode::UsufruttuarioDiDominioDirettoPer => {
                "Usufruttuario di dominio diretto per"
            }
            RightCode::CousufruttuarioGeneraleConDirittoDi => {
                "Cousufruttuario generale con diritto di"
            }
            RightCode::UtilistaDellaSuperficie => "Utilista della superficie",
            RightCode::UtilistaDellaSuperficiePer => "Utilista della superficie per",
            RightCode::Beneficiario => "Beneficiario",
            RightCode::BeneficiarioPer => "Beneficiario per",
            RightCode::BeneficiarioDiDominioDiretto => "Beneficiario di dominio diretto",
            RightCode::Possessore => "Possessore",
            RightCode::PossessorePer => "Possessore per",
            RightCode::Compossessore => "Compossessore",
            RightCode::CompossessorePer => "Compossessore per",
            RightCode::Contestatario => "Contestatario",
            RightCode::ContestatarioPer => "Contestatario per",
            RightCode::ContestatarioPerUsufrutto => "Contestatario per usufrutto",
            RightCode::PresenzaTitoloNonCodificato => "Presenza di titolo non codificato",
            RightCode::PresenzaTitoloNonCodificato990 => "Presenza di titolo non codificato",
            RightCode::AssenzaTitolo => "Assenza di titolo",
        }
    }
}

impl fmt::Display for RightCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.code())
    }
}
