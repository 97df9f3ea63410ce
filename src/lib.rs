//! Hausprep: Housing-Price Feature Preparation Library
//!
//! Loads a housing dataset, derives log10 columns, imputes fixed values,
//! one-hot encodes categorical columns and writes seeded train/validation
//! partitions for regression training.
//!
//! The whole job is available as [`pipeline::run_pipeline`]; each stage is
//! also exposed on its own.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
