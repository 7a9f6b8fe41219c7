//! biocflat - flat-text exports of BioC XML corpora
//!
//! Writes `<pmid>/<title+abstract>` and `<pmid>/<ref>/...` files from a
//! BioC collection such as LitCovid.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "biocflat")]
#[command(about = "Flat-text exports of BioC XML corpora")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./biocflat.toml or ~/.config/biocflat/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Write title/abstract and reference files from a BioC collection
    Export(cmd::export::ExportArgs),
    /// Show corpus statistics
    Stats(cmd::stats::StatsArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let progress = Arc::new(biocflat_core::ProgressContext::new());

    // TTY: spinners show activity, logs stay at warn unless --debug
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = is_tty && !cli.debug;
    biocflat_core::init_logging(quiet, cli.debug, multi)?;

    let config = match cli.config {
        Some(path) => Config::from_file(&path)?,
        None => Config::load()?,
    };

    match cli.command {
        Command::Export(args) => cmd::export::run(args, &config, &progress),
        Command::Stats(args) => cmd::stats::run(args, &progress),
        Command::Config => {
            use comfy_table::{
                Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
            };

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec![
                    Cell::new("Setting").fg(Color::Cyan),
                    Cell::new("Value").fg(Color::Cyan),
                ]);

            table.add_row(vec![
                "Title/abstract output",
                &config.output.title_abstract_path.display().to_string(),
            ]);
            table.add_row(vec![
                "References output",
                &config.output.references_path.display().to_string(),
            ]);

            eprintln!("\n{table}");
            Ok(())
        }
    }
}
