//! Runtime for corpus extraction runs.
//!
//! This module holds the run configuration and the file-level driver that
//! turns a directory of corpus files into one output artifact.

pub mod config_loader;
pub mod pipeline;

// Re-export key types
pub use config_loader::{ConfigError, ExtractConfig, OutputFormat};
pub use pipeline::{
    discover_files, extract_records, process_entries, process_file, run, FileReport,
    PipelineError, RunSummary,
};
