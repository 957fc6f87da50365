//! decanter - deployment-configuration normalizer
//!
//! Decanter takes a nested deployment-configuration document (as loaded
//! from a YAML-like file by the caller) and normalizes it into one flat
//! settings record for a specific (project, environment) pair: omitted
//! hierarchy levels are inferred and restored, domain lists are rewritten
//! into canonical records, and the selected record is stamped with its
//! identifiers.

pub mod error;
pub mod filter;
pub mod models;

// Re-exports for convenience
pub use error::{DecanterError, DecanterResult};
pub use filter::FilterPipeline;
pub use models::{ConfigContext, DeployTargetSlot, Document, DomainRecord};
