//! Littering analysis worker.
//!
//! Ties the media and inference crates together:
//! - [`AnalysisPipeline`] runs sampling, inference and thumbnail assembly
//! - [`assemble`] attaches thumbnails to reported incidents
//! - [`WorkerConfig`] holds the tunables read from the environment

pub mod assembler;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod pipeline;

#[cfg(test)]
mod testing;

pub use assembler::assemble;
pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use logging::RunLogger;
pub use pipeline::AnalysisPipeline;
