//! Sinks for a finished result set.
//!
//! # Submodules
//!
//! - [`json`]: Writes the result set to a JSON file at startup
//!
//! The HTTP sink lives in [`crate::server`], which runs the pipeline per
//! request instead of reading this file.

pub mod json;
