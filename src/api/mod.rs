// ==========================================
// Catasto Graph - API di interrogazione
// ==========================================

pub mod catasto_api;
pub mod error;

pub use catasto_api::{CatastoApi, CoOwnershipReport, OwnershipEntry, OwnershipReport, StoreStats};
pub use error::{ApiError, ApiResult};
