//! Library components of the `mmf` command-line tool.

pub mod error;
pub mod logging;
pub mod pipeline;
pub mod types;

pub use error::PipelineError;
pub use pipeline::run_integration;
