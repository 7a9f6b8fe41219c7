//! Serialize extracted records into newline-delimited text

use std::fmt::{Display, Write};

use crate::extract;
use crate::model::Document;

/// Serialized output of one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    /// Records joined with `\n`, no trailing newline
    pub text: String,
    pub records: usize,
}

fn render_lines<R: Display>(records: impl Iterator<Item = R>) -> Rendered {
    let mut out = Rendered::default();
    for record in records {
        if out.records > 0 {
            out.text.push('\n');
        }
        // Writing into a String cannot fail
        let _ = write!(out.text, "{record}");
        out.records += 1;
    }
    out
}

/// File 1: one `<pmid>/<text>` line per document with a PMID and text.
pub fn render_title_abstracts(docs: &[Document]) -> Rendered {
    render_lines(docs.iter().filter_map(extract::title_abstract))
}

/// File 2: one `<pmid>[/<ref>...]` line per document with a PMID.
pub fn render_references(docs: &[Document]) -> Rendered {
    render_lines(docs.iter().filter_map(extract::references))
}
