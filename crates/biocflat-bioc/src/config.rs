//! Export pipeline configuration

use std::path::PathBuf;

pub const DEFAULT_TITLE_ABSTRACT_PATH: &str = "resultat_3_1.txt";
pub const DEFAULT_REFERENCES_PATH: &str = "resultat_3_2.txt";

/// Runtime configuration for the export pipeline
#[derive(Debug, Clone)]
pub struct Config {
    /// BioC XML input (`.xml` or `.xml.gz`)
    pub input: PathBuf,
    /// Output for `<pmid>/<title+abstract>` lines
    pub title_abstract_path: PathBuf,
    /// Output for `<pmid>/<ref>/...` lines
    pub references_path: PathBuf,
}

impl Config {
    /// Config for `input` with default output paths.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Default::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("litcovid2BioCXML.xml"),
            title_abstract_path: PathBuf::from(DEFAULT_TITLE_ABSTRACT_PATH),
            references_path: PathBuf::from(DEFAULT_REFERENCES_PATH),
        }
    }
}
