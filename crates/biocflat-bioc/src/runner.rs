//! Main runner for the export pipeline

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use biocflat_core::{ProgressContext, fmt_num, write_atomic};

use crate::config::Config;
use crate::export::{self, Rendered};
use crate::model::Document;
use crate::parser::load_bioc_file;

/// Pipeline execution summary
#[derive(Debug)]
pub struct Summary {
    pub total_documents: usize,
    pub title_abstract_records: usize,
    pub reference_records: usize,
    pub elapsed: Duration,
}

/// Record counts written by [`export_documents`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportCounts {
    pub title_abstract_records: usize,
    pub reference_records: usize,
}

/// Run the pipeline without progress bars.
pub fn run(config: &Config) -> Result<Summary> {
    run_with_progress(config, &ProgressContext::with_tty(false))
}

/// Load `config.input`, then write both output files.
///
/// A malformed input aborts before either file is touched.
pub fn run_with_progress(config: &Config, progress: &ProgressContext) -> Result<Summary> {
    let start = Instant::now();

    let pb = progress.stage_line("load");
    pb.set_message(config.input.display().to_string());
    log::info!("Loading {}", config.input.display());
    let collection = load_bioc_file(&config.input);
    pb.finish_and_clear();
    let collection = collection?;
    log::info!("Loaded {} documents", fmt_num(collection.documents.len()));

    let pb = progress.stage_line("write");
    pb.set_message("title/abstract + references");
    let counts = export_documents(&collection.documents, config);
    pb.finish_and_clear();
    let counts = counts?;

    let summary = Summary {
        total_documents: collection.documents.len(),
        title_abstract_records: counts.title_abstract_records,
        reference_records: counts.reference_records,
        elapsed: start.elapsed(),
    };

    log::info!("=== Export Summary ===");
    log::info!("Documents: {}", fmt_num(summary.total_documents));
    log::info!(
        "Title/abstract: {} lines -> {}",
        fmt_num(summary.title_abstract_records),
        config.title_abstract_path.display()
    );
    log::info!(
        "References: {} lines -> {}",
        fmt_num(summary.reference_records),
        config.references_path.display()
    );
    log::info!("Time: {:.1}s", summary.elapsed.as_secs_f64());

    if summary.total_documents > 0 && summary.elapsed.as_secs_f64() > 0.0 {
        let rate = summary.total_documents as f64 / summary.elapsed.as_secs_f64();
        log::info!("Throughput: {:.0} documents/sec", rate);
    }

    Ok(summary)
}

/// Run both extraction passes over `docs` and write their files.
///
/// The passes share nothing but the read-only input, so they run in
/// parallel. Each file is written atomically; a failed pass leaves its
/// target untouched and is reported after both passes finish.
pub fn export_documents(docs: &[Document], config: &Config) -> Result<ExportCounts> {
    let (title_abstract, references) = rayon::join(
        || {
            write_pass("title/abstract", &config.title_abstract_path, || {
                export::render_title_abstracts(docs)
            })
        },
        || {
            write_pass("references", &config.references_path, || {
                export::render_references(docs)
            })
        },
    );

    Ok(ExportCounts {
        title_abstract_records: title_abstract?,
        reference_records: references?,
    })
}

fn write_pass(name: &str, path: &Path, render: impl FnOnce() -> Rendered) -> Result<usize> {
    let started = Instant::now();
    let rendered = render();
    write_atomic(path, &rendered.text)
        .with_context(|| format!("Failed to write {} output {}", name, path.display()))?;
    log::debug!(
        "{}: {} records in {:.2}s",
        name,
        rendered.records,
        started.elapsed().as_secs_f64()
    );
    Ok(rendered.records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Infon, Passage};
    use tempfile::TempDir;

    fn config_in(dir: &Path) -> Config {
        Config {
            input: dir.join("in.xml"),
            title_abstract_path: dir.join("ta.txt"),
            references_path: dir.join("refs.txt"),
        }
    }

    fn sample_docs() -> Vec<Document> {
        vec![Document {
            infons: vec![Infon::new("article-id_pmid", "123")],
            passages: vec![
                Passage {
                    infons: vec![Infon::new("section_type", "TITLE")],
                    offset: Some(0),
                    texts: vec!["Hello".to_string()],
                },
                Passage {
                    infons: vec![
                        Infon::new("section_type", "REF"),
                        Infon::new("pub-id_pmid", "555"),
                    ],
                    ..Default::default()
                },
            ],
            ..Default::default()
        }]
    }

    #[test]
    fn export_documents_writes_both_files() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());

        let counts = export_documents(&sample_docs(), &config).unwrap();

        assert_eq!(counts.title_abstract_records, 1);
        assert_eq!(counts.reference_records, 1);
        assert_eq!(
            std::fs::read_to_string(&config.title_abstract_path).unwrap(),
            "123/Hello"
        );
        assert_eq!(
            std::fs::read_to_string(&config.references_path).unwrap(),
            "123/555"
        );
    }

    #[test]
    fn failing_pass_does_not_block_other() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(dir.path());
        config.title_abstract_path = dir.path().join("missing").join("ta.txt");

        let err = export_documents(&sample_docs(), &config).unwrap_err();

        assert!(format!("{err:#}").contains("title/abstract"));
        assert!(!config.title_abstract_path.exists());
        assert_eq!(
            std::fs::read_to_string(&config.references_path).unwrap(),
            "123/555"
        );
    }

    #[test]
    fn run_missing_input_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());

        assert!(run(&config).is_err());
        assert!(!config.title_abstract_path.exists());
        assert!(!config.references_path.exists());
    }
}
