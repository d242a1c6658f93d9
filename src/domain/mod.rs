//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the closed set of candidate shapes (`ModelKind`)
//! - validated paired observations (`SampleSet`)
//! - fit outputs (`FittedModel`) and evaluation wire types
//! - run configuration (`RunConfig`, `DataSource`)

pub mod types;

pub use types::*;
