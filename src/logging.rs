// ==========================================
// Inizializzazione del sistema di logging
// ==========================================
// tracing + tracing-subscriber, livello configurabile
// via variabile d'ambiente
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Inizializza il sistema di logging.
///
/// # Variabili d'ambiente
/// - RUST_LOG: filtro di livello (default: info)
///   es. RUST_LOG=debug oppure RUST_LOG=catasto_graph=trace
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// Inizializza il logging per i test (livello debug, writer di test).
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
