// ==========================================
// Catasto Graph - configurazione
// ==========================================
// Parametri della pipeline di import, con default
// e override via variabili d'ambiente.
// ==========================================

use serde::{Deserialize, Serialize};

/// Dimensione di default del blocco di flush dei fabbricati.
pub const DEFAULT_BUILDING_FLUSH_SIZE: usize = 1000;

/// Percorso di default del database.
pub const DEFAULT_DB_PATH: &str = "catasto.db";

/// Configurazione della pipeline di import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Numero di fabbricati completati accumulati in memoria prima
    /// di un flush verso lo store (limite di picco della memoria).
    pub building_flush_size: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            building_flush_size: DEFAULT_BUILDING_FLUSH_SIZE,
        }
    }
}

impl ImportConfig {
    /// Costruisce la configurazione leggendo gli override d'ambiente.
    ///
    /// # Variabili d'ambiente
    /// - CATASTO_BUILDING_FLUSH_SIZE: dimensione blocco flush fabbricati
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(value) = std::env::var("CATASTO_BUILDING_FLUSH_SIZE") {
            if let Ok(size) = value.trim().parse::<usize>() {
                if size > 0 {
                    config.building_flush_size = size;
                }
            }
        }
        config
    }
}

/// Percorso del database: CATASTO_DB_PATH oppure il default.
pub fn default_db_path() -> String {
    std::env::var("CATASTO_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flush_size() {
        let config = ImportConfig::default();
        assert_eq!(config.building_flush_size, 1000);
    }
}
