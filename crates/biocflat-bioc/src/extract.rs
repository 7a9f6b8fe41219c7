//! Per-document field extraction
//!
//! Both passes are pure functions of a [`Document`]; a `None` result means
//! the document produces no record.

use std::fmt;

use crate::model::{
    Document, Passage, REF_PMID_KEY, SECTION_ABSTRACT, SECTION_REF, SECTION_TITLE, TYPE_ABSTRACT,
    TYPE_KEY,
};

/// `<pmid>/<title+abstract text>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleAbstractRecord {
    pub pmid: String,
    pub combined_text: String,
}

impl fmt::Display for TitleAbstractRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.pmid, self.combined_text)
    }
}

/// `<pmid>` or `<pmid>/<ref_1>/.../<ref_n>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRecord {
    pub pmid: String,
    pub ref_pmids: Vec<String>,
}

impl fmt::Display for ReferenceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pmid)?;
        for r in &self.ref_pmids {
            write!(f, "/{r}")?;
        }
        Ok(())
    }
}

/// Collapse whitespace runs to one space and strip both ends.
pub fn normalize_space(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn join_passages<'a>(passages: impl Iterator<Item = &'a Passage>) -> String {
    passages.map(Passage::text).collect::<Vec<_>>().join(" ")
}

/// Text of all TITLE passages, space-joined in document order.
pub fn title_text(doc: &Document) -> String {
    join_passages(doc.sections(SECTION_TITLE))
}

/// Text of ABSTRACT passages whose `type` is `abstract`.
///
/// Other ABSTRACT subtypes (captions, ...) are excluded.
pub fn abstract_text(doc: &Document) -> String {
    join_passages(
        doc.sections(SECTION_ABSTRACT)
            .filter(|p| p.has_infon(TYPE_KEY, TYPE_ABSTRACT)),
    )
}

/// `pub-id_pmid` values of REF passages, in order, duplicates kept.
///
/// REF passages without the infon (or with an empty value) contribute nothing.
pub fn reference_pmids(doc: &Document) -> Vec<String> {
    doc.sections(SECTION_REF)
        .flat_map(|p| p.infon_values(REF_PMID_KEY))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pass 1: requires a PMID and non-empty normalized text.
pub fn title_abstract(doc: &Document) -> Option<TitleAbstractRecord> {
    let pmid = doc.pmid();
    if pmid.is_empty() {
        return None;
    }
    let combined = format!("{} {}", title_text(doc), abstract_text(doc));
    let combined_text = normalize_space(&combined);
    if combined_text.is_empty() {
        return None;
    }
    Some(TitleAbstractRecord {
        pmid: pmid.to_string(),
        combined_text,
    })
}

/// Pass 2: requires only a PMID; the reference list may be empty.
pub fn references(doc: &Document) -> Option<ReferenceRecord> {
    let pmid = doc.pmid();
    if pmid.is_empty() {
        return None;
    }
    Some(ReferenceRecord {
        pmid: pmid.to_string(),
        ref_pmids: reference_pmids(doc),
    })
}
