//! Export subcommand - write title/abstract and reference files

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use biocflat_core::{SharedProgress, fmt_num};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// BioC XML input file (.xml or .xml.gz)
    pub input: PathBuf,

    /// Output path for `<pmid>/<title+abstract>` lines
    #[arg(long)]
    pub title_abstract: Option<PathBuf>,

    /// Output path for `<pmid>/<ref>/...` lines
    #[arg(long)]
    pub references: Option<PathBuf>,
}

impl ExportArgs {
    /// CLI flags override config file values.
    fn into_config(self, config: &Config) -> biocflat_bioc::Config {
        biocflat_bioc::Config {
            input: self.input,
            title_abstract_path: self
                .title_abstract
                .unwrap_or_else(|| config.output.title_abstract_path.clone()),
            references_path: self
                .references
                .unwrap_or_else(|| config.output.references_path.clone()),
        }
    }
}

pub fn run(args: ExportArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    let export_config = args.into_config(config);
    let summary = biocflat_bioc::run_with_progress(&export_config, progress)?;

    progress.println(format!(
        "Exported {} documents: {} title/abstract lines, {} reference lines ({:.1}s)",
        fmt_num(summary.total_documents),
        fmt_num(summary.title_abstract_records),
        fmt_num(summary.reference_records),
        summary.elapsed.as_secs_f64()
    ));
    Ok(())
}
