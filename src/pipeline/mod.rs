//! Pipeline module - the feature preparation stages

pub mod category;
pub mod config;
pub mod encoder;
pub mod error;
pub mod impute;
pub mod loader;
pub mod runner;
pub mod select;
pub mod split;
pub mod transform;
pub mod writer;

pub use category::*;
pub use config::*;
pub use encoder::*;
pub use error::PipelineError;
pub use impute::*;
pub use loader::*;
pub use runner::*;
pub use select::*;
pub use split::*;
pub use transform::*;
pub use writer::*;
