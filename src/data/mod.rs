//! Data sources that produce samples without reading a file.
//!
//! - seeded synthetic samples from a known model (`synthetic`)

pub mod synthetic;

pub use synthetic::*;
