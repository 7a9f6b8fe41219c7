//! BioC document tree

/// Infon key carrying a document's own PMID
pub const ARTICLE_PMID_KEY: &str = "article-id_pmid";
/// Infon key carrying a cited article's PMID on a REF passage
pub const REF_PMID_KEY: &str = "pub-id_pmid";
pub const SECTION_TYPE_KEY: &str = "section_type";
pub const TYPE_KEY: &str = "type";

pub const SECTION_TITLE: &str = "TITLE";
pub const SECTION_ABSTRACT: &str = "ABSTRACT";
pub const SECTION_REF: &str = "REF";
pub const TYPE_ABSTRACT: &str = "abstract";

/// Key/value metadata pair (`<infon key="...">value</infon>`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Infon {
    pub key: String,
    pub value: String,
}

impl Infon {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// First value stored under `key`, in insertion order.
fn first_value<'a>(infons: &'a [Infon], key: &str) -> Option<&'a str> {
    infons
        .iter()
        .find(|i| i.key == key)
        .map(|i| i.value.as_str())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Passage {
    pub infons: Vec<Infon>,
    pub offset: Option<u64>,
    /// Raw `<text>` spans, untrimmed
    pub texts: Vec<String>,
}

impl Passage {
    pub fn infon(&self, key: &str) -> Option<&str> {
        first_value(&self.infons, key)
    }

    /// All values stored under `key`, in order.
    pub fn infon_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.infons
            .iter()
            .filter(move |i| i.key == key)
            .map(|i| i.value.as_str())
    }

    pub fn has_infon(&self, key: &str, value: &str) -> bool {
        self.infon(key) == Some(value)
    }

    pub fn section_type(&self) -> Option<&str> {
        self.infon(SECTION_TYPE_KEY)
    }

    /// Text spans joined with single spaces.
    pub fn text(&self) -> String {
        self.texts.join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// `<id>` element; not used for export, the PMID infon is authoritative
    pub id: String,
    pub infons: Vec<Infon>,
    pub passages: Vec<Passage>,
}

impl Document {
    /// The document PMID, or `""` when no `article-id_pmid` infon exists.
    ///
    /// Document-level infons are checked first, then passages in order.
    pub fn pmid(&self) -> &str {
        first_value(&self.infons, ARTICLE_PMID_KEY)
            .or_else(|| {
                self.passages
                    .iter()
                    .find_map(|p| p.infon(ARTICLE_PMID_KEY))
            })
            .unwrap_or("")
    }

    /// Passages whose `section_type` equals `section`.
    pub fn sections<'a>(&'a self, section: &'a str) -> impl Iterator<Item = &'a Passage> + 'a {
        self.passages
            .iter()
            .filter(move |p| p.has_infon(SECTION_TYPE_KEY, section))
    }
}

/// Root `<collection>` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    pub source: String,
    pub date: String,
    pub key: String,
    pub documents: Vec<Document>,
}
