//! biocflat BioC - flat-text export of BioC XML corpora
//!
//! Loads a BioC collection and writes two newline-delimited files:
//! `<pmid>/<title+abstract>` and `<pmid>/<ref_pmid>/...`.
//!
//! # Example
//!
//! ```ignore
//! use biocflat_bioc::{Config, run};
//!
//! let config = Config::new("litcovid2BioCXML.xml");
//! let summary = run(&config)?;
//! println!("Wrote {} title/abstract lines", summary.title_abstract_records);
//! ```

pub mod config;
pub mod export;
pub mod extract;
pub mod model;
pub mod parser;
pub mod runner;
pub mod stats;

// Re-exports
pub use config::Config;
pub use model::{Collection, Document, Infon, Passage};
pub use runner::{ExportCounts, Summary, export_documents, run, run_with_progress};
pub use stats::CorpusStats;
