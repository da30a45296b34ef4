//! `asbuilt-recon`: BOM-versus-installed reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded requirements, installed records and
//! aliases, returns one classified result per BOM line plus derived reports.
//! The CSV loaders in [`load`] are the only place input text is parsed.

pub mod alias;
pub mod anchor;
pub mod classify;
pub mod config;
pub mod derived;
pub mod describe;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod index;
pub mod load;
pub mod matcher;
pub mod model;
pub mod numeric;
pub mod resolve;

pub use alias::AliasTable;
pub use config::ReconConfig;
pub use engine::{reconcile, run};
pub use error::ReconError;
pub use index::InstalledIndex;
pub use model::{InstalledRecord, MatchResult, ReconInput, ReconResult, Requirement, Status, TrackingMode};
