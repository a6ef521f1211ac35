// ==========================================
// Catasto Graph - pipeline di import dei tracciati catastali
// ==========================================
// Un parser per tracciato (.ter, .sog, .fab, .tit) più
// l'orchestratore a fasi che li collega allo store.
// ==========================================

pub mod building_builder;
pub mod catasto_importer;
pub mod error;
pub mod ownership_parser;
pub mod parcel_parser;
pub mod record;
pub mod resolver;
pub mod subject_parser;

pub use building_builder::{group_records, BuildingBuilder, BuildingKey, BuildingRecordKind};
pub use catasto_importer::{find_file_with_extension, CatastoImporter, ImportSummary};
pub use error::{ImportError, ImportResult};
pub use ownership_parser::{extract_immobile_id, extract_subject_id, parse_title};
pub use parcel_parser::parse_parcel;
pub use record::{read_records, RawRecord};
pub use resolver::ResolutionContext;
pub use subject_parser::parse_subject;
