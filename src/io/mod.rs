//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - remote CSV download (`download`)
//! - model JSON and CSV exports (`export`)

pub mod download;
pub mod export;
pub mod ingest;

pub use download::*;
pub use export::*;
pub use ingest::*;
