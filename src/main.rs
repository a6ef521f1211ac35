// ==========================================
// Catasto Graph - entrypoint a riga di comando
// ==========================================
// Comandi:
//   import <directory>   importa una fornitura catastale
//   titolari <cf>        report di intestazione per codice fiscale
//   stats                conteggi complessivi dello store
// ==========================================

use anyhow::{bail, Context};
use catasto_graph::config::{default_db_path, ImportConfig};
use catasto_graph::{
    BuildingRepository, CatastoApi, CatastoImporter, ParcelRepository, SubjectRepository,
};
use std::path::Path;
use std::sync::Arc;

fn main() {
    catasto_graph::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", catasto_graph::APP_NAME, catasto_graph::VERSION);
    tracing::info!("==================================================");

    if let Err(e) = run() {
        tracing::error!("esecuzione fallita: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("help");

    let db_path = default_db_path();
    tracing::info!("database: {}", db_path);

    let parcel_repo = Arc::new(ParcelRepository::new(&db_path)?);
    let building_repo = Arc::new(BuildingRepository::new(&db_path)?);
    let subject_repo = Arc::new(SubjectRepository::new(&db_path)?);

    match command {
        "import" => {
            let dir = args
                .get(2)
                .context("uso: catasto-graph import <directory>")?;
            let importer = CatastoImporter::with_config(
                parcel_repo,
                building_repo,
                subject_repo,
                ImportConfig::from_env(),
            );
            let summary = importer.import_catasto_data(Path::new(dir))?;
            println!(
                "Import completato: {} terreni, {} fabbricati, {} soggetti, {} titolarità \
                 ({} righe scartate, {} titolarità non risolte)",
                summary.parcels,
                summary.buildings,
                summary.subjects,
                summary.titles,
                summary.skipped_lines,
                summary.unresolved_titles
            );
        }
        "titolari" => {
            let fiscale = args
                .get(2)
                .context("uso: catasto-graph titolari <codice fiscale>")?;
            let api = CatastoApi::new(parcel_repo, building_repo, subject_repo);
            match api.find_ownerships_by_fiscal_id(fiscale)? {
                Some(report) => {
                    println!("{}", report.display_name);
                    for entry in &report.entries {
                        println!(
                            "  [{}] {} - {}",
                            entry.immobile_kind, entry.immobile_display, entry.title_display
                        );
                    }
                    if report.entries.is_empty() {
                        println!("  nessuna titolarità registrata");
                    }
                }
                None => println!("Nessun soggetto con identificativo fiscale '{}'", fiscale),
            }
        }
        "stats" => {
            let api = CatastoApi::new(parcel_repo, building_repo, subject_repo);
            let stats = api.stats()?;
            println!("Terreni:     {}", stats.parcels);
            println!("Fabbricati:  {}", stats.buildings);
            println!("Soggetti:    {}", stats.subjects);
            println!("Titolarità:  {}", stats.titles);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        other => {
            print_usage();
            bail!("comando sconosciuto: {}", other);
        }
    }

    Ok(())
}

fn print_usage() {
    println!("Uso: catasto-graph <comando>");
    println!();
    println!("Comandi:");
    println!("  import <directory>   importa una fornitura catastale (.ter/.fab/.sog/.tit)");
    println!("  titolari <cf>        report di intestazione per codice fiscale");
    println!("  stats                conteggi complessivi dello store");
    println!();
    println!("Variabili d'ambiente:");
    println!("  CATASTO_DB_PATH                 percorso del database (default: catasto.db)");
    println!("  CATASTO_BUILDING_FLUSH_SIZE     dimensione blocco flush fabbricati (default: 1000)");
    println!("  RUST_LOG                        filtro di logging (default: info)");
}
