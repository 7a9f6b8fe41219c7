//! Corpus statistics

use crate::extract::{abstract_text, reference_pmids};
use crate::model::Document;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorpusStats {
    pub total_documents: usize,
    /// Documents carrying an `article-id_pmid`
    pub with_pmid: usize,
    /// Documents whose normalized abstract text is non-empty
    pub with_abstract: usize,
    pub total_references: usize,
    pub max_references: usize,
}

impl CorpusStats {
    pub fn compute(docs: &[Document]) -> Self {
        let mut stats = Self {
            total_documents: docs.len(),
            ..Default::default()
        };

        for doc in docs {
            if !abstract_text(doc).trim().is_empty() {
                stats.with_abstract += 1;
            }
            if doc.pmid().is_empty() {
                continue;
            }
            stats.with_pmid += 1;
            let refs = reference_pmids(doc).len();
            stats.total_references += refs;
            stats.max_references = stats.max_references.max(refs);
        }

        stats
    }

    /// Mean reference count over documents with a PMID.
    pub fn avg_references(&self) -> f64 {
        if self.with_pmid == 0 {
            return 0.0;
        }
        self.total_references as f64 / self.with_pmid as f64
    }
}
