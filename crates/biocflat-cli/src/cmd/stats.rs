//! Stats subcommand - corpus overview without writing outputs

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use biocflat_bioc::CorpusStats;
use biocflat_bioc::parser::load_bioc_file;
use biocflat_core::{SharedProgress, fmt_num};

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// BioC XML input file (.xml or .xml.gz)
    pub input: PathBuf,
}

pub fn run(args: StatsArgs, progress: &SharedProgress) -> Result<()> {
    let pb = progress.stage_line("load");
    pb.set_message(args.input.display().to_string());
    let collection = load_bioc_file(&args.input);
    pb.finish_and_clear();
    let collection = collection?;

    let stats = CorpusStats::compute(&collection.documents);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Statistic").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    table.add_row(vec!["Source", collection.source.as_str()]);
    table.add_row(vec!["Documents", &fmt_num(stats.total_documents)]);
    table.add_row(vec!["With PMID", &fmt_num(stats.with_pmid)]);
    table.add_row(vec!["With abstract", &fmt_num(stats.with_abstract)]);
    table.add_row(vec![
        "Avg references",
        &format!("{:.2}", stats.avg_references()),
    ]);
    table.add_row(vec!["Max references", &fmt_num(stats.max_references)]);

    progress.println(format!("\n{table}"));
    Ok(())
}
