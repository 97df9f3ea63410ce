//! Report module - summarizing preparation results

pub mod manifest;
pub mod summary;

pub use manifest::*;
pub use summary::*;
