//! biocflat Core - shared plumbing for the BioC export pipeline
//!
//! Logging, progress reporting, input opening and the atomic text sink
//! used by the extraction crate and the CLI.

pub mod input;
pub mod logging;
pub mod progress;
pub mod sink;

// Re-exports for convenience
pub use input::{is_gzip_path, read_input};
pub use logging::{IndicatifLogger, init_logging};
pub use progress::{ProgressContext, SharedProgress, fmt_num};
pub use sink::{TextSink, write_atomic};
