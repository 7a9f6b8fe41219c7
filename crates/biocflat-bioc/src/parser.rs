//! BioC XML parser using quick-xml
//!
//! Builds the whole [`Collection`] in memory. Annotations, relations and
//! sentences are skipped; only infons, offsets and text spans are kept.

use std::path::Path;

use anyhow::{Context, Result, bail};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::model::{Collection, Document, Infon, Passage};

/// Parse a BioC XML string into a [`Collection`].
///
/// Fails on XML syntax errors, mismatched or unclosed elements, and input
/// without a `<collection>` root.
pub fn parse_bioc_xml(xml: &str) -> Result<Collection> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().expand_empty_elements = true;

    let mut collection = None;
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .with_context(|| format!("XML parse error at byte {}", reader.error_position()))?;
        match event {
            Event::Start(e) if e.name().as_ref() == b"collection" => {
                if collection.is_some() {
                    bail!("more than one <collection> element");
                }
                collection = Some(
                    parse_collection(&mut reader)
                        .with_context(|| format!("near byte {}", reader.buffer_position()))?,
                );
            }
            Event::Start(e) => bail!(
                "expected <collection> root, found <{}>",
                String::from_utf8_lossy(e.name().as_ref())
            ),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let collection = collection.context("no <collection> element in input")?;
    log::debug!(
        "Parsed collection '{}' with {} documents",
        collection.source,
        collection.documents.len()
    );
    Ok(collection)
}

/// Read and parse a BioC file (`.xml` or `.xml.gz`).
pub fn load_bioc_file(path: &Path) -> Result<Collection> {
    let xml = biocflat_core::read_input(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_bioc_xml(&xml).with_context(|| format!("Failed to parse {}", path.display()))
}

fn parse_collection(reader: &mut Reader<&[u8]>) -> Result<Collection> {
    let mut collection = Collection::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"source" => collection.source = read_text(reader, b"source")?.trim().to_string(),
                b"date" => collection.date = read_text(reader, b"date")?.trim().to_string(),
                b"key" => collection.key = read_text(reader, b"key")?.trim().to_string(),
                b"document" => collection.documents.push(parse_document(reader)?),
                other => skip_element(reader, other)?,
            },
            Event::End(e) if e.name().as_ref() == b"collection" => break,
            Event::Eof => bail!("unexpected end of input inside <collection>"),
            _ => {}
        }
        buf.clear();
    }

    Ok(collection)
}

fn parse_document(reader: &mut Reader<&[u8]>) -> Result<Document> {
    let mut doc = Document::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"id" => doc.id = read_text(reader, b"id")?.trim().to_string(),
                b"infon" => doc.infons.push(parse_infon(reader, &e)?),
                b"passage" => doc.passages.push(parse_passage(reader)?),
                other => skip_element(reader, other)?,
            },
            Event::End(e) if e.name().as_ref() == b"document" => break,
            Event::Eof => bail!("unexpected end of input inside <document>"),
            _ => {}
        }
        buf.clear();
    }

    Ok(doc)
}

fn parse_passage(reader: &mut Reader<&[u8]>) -> Result<Passage> {
    let mut passage = Passage::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"infon" => passage.infons.push(parse_infon(reader, &e)?),
                b"offset" => passage.offset = read_text(reader, b"offset")?.trim().parse().ok(),
                b"text" => passage.texts.push(read_text(reader, b"text")?),
                other => skip_element(reader, other)?,
            },
            Event::End(e) if e.name().as_ref() == b"passage" => break,
            Event::Eof => bail!("unexpected end of input inside <passage>"),
            _ => {}
        }
        buf.clear();
    }

    Ok(passage)
}

/// `<infon key="k">v</infon>`; a missing key attribute yields an empty key.
fn parse_infon(reader: &mut Reader<&[u8]>, start: &BytesStart) -> Result<Infon> {
    let key = match start.try_get_attribute("key")? {
        Some(attr) => attr.unescape_value()?.into_owned(),
        None => String::new(),
    };
    let value = read_text(reader, b"infon")?.trim().to_string();
    Ok(Infon { key, value })
}

/// Collect all text inside the current element, including nested children.
fn read_text(reader: &mut Reader<&[u8]>, end_tag: &[u8]) -> Result<String> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e)),
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Event::Eof => bail!(
                "unexpected end of input inside <{}>",
                String::from_utf8_lossy(end_tag)
            ),
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

fn skip_element(reader: &mut Reader<&[u8]>, end_tag: &[u8]) -> Result<()> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Event::Eof => bail!(
                "unexpected end of input inside <{}>",
                String::from_utf8_lossy(end_tag)
            ),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE collection SYSTEM "BioC.dtd">
<collection>
  <source>PMC</source>
  <date>20240101</date>
  <key>pmc.key</key>
  <document>
    <id>PMC7000001</id>
    <passage>
      <infon key="article-id_pmid">32000001</infon>
      <infon key="section_type">TITLE</infon>
      <infon key="type">front</infon>
      <offset>0</offset>
      <text>Coronavirus &amp; host response</text>
    </passage>
    <passage>
      <infon key="section_type">ABSTRACT</infon>
      <infon key="type">abstract</infon>
      <offset>30</offset>
      <text>We study <![CDATA[SARS-CoV-2]]> entry.</text>
      <annotation id="1">
        <infon key="type">Species</infon>
        <location offset="39" length="10"/>
        <text>SARS-CoV-2</text>
      </annotation>
    </passage>
    <passage>
      <infon key="section_type">REF</infon>
      <infon key="type">ref</infon>
      <infon key="pub-id_pmid">31000001</infon>
      <offset>80</offset>
      <text/>
    </passage>
  </document>
</collection>"#;

    #[test]
    fn parse_collection_header() {
        let c = parse_bioc_xml(SAMPLE_XML).unwrap();
        assert_eq!(c.source, "PMC");
        assert_eq!(c.date, "20240101");
        assert_eq!(c.key, "pmc.key");
        assert_eq!(c.documents.len(), 1);
    }

    #[test]
    fn parse_document_passages() {
        let c = parse_bioc_xml(SAMPLE_XML).unwrap();
        let doc = &c.documents[0];
        assert_eq!(doc.id, "PMC7000001");
        assert_eq!(doc.pmid(), "32000001");
        assert_eq!(doc.passages.len(), 3);

        let title = &doc.passages[0];
        assert_eq!(title.section_type(), Some("TITLE"));
        assert_eq!(title.offset, Some(0));
        assert_eq!(title.texts, vec!["Coronavirus & host response"]);
    }

    #[test]
    fn annotation_text_is_not_passage_text() {
        let c = parse_bioc_xml(SAMPLE_XML).unwrap();
        let abs = &c.documents[0].passages[1];
        assert_eq!(abs.texts, vec!["We study SARS-CoV-2 entry."]);
        assert_eq!(abs.infon("type"), Some("abstract"));
    }

    #[test]
    fn empty_text_element_is_empty_span() {
        let c = parse_bioc_xml(SAMPLE_XML).unwrap();
        let r = &c.documents[0].passages[2];
        assert_eq!(r.infon("pub-id_pmid"), Some("31000001"));
        assert_eq!(r.texts, vec![""]);
    }

    #[test]
    fn text_whitespace_preserved_infon_trimmed() {
        let xml = r#"<collection><document><passage>
            <infon key="section_type">
              TITLE
            </infon>
            <text>  spaced   out  </text>
        </passage></document></collection>"#;
        let c = parse_bioc_xml(xml).unwrap();
        let p = &c.documents[0].passages[0];
        assert_eq!(p.section_type(), Some("TITLE"));
        assert_eq!(p.texts, vec!["  spaced   out  "]);
    }

    #[test]
    fn document_level_infons() {
        let xml = r#"<collection><document>
            <id>1</id>
            <infon key="article-id_pmid">77</infon>
        </document></collection>"#;
        let c = parse_bioc_xml(xml).unwrap();
        assert_eq!(c.documents[0].pmid(), "77");
        assert!(c.documents[0].passages.is_empty());
    }

    #[test]
    fn multiple_text_spans() {
        let xml = r#"<collection><document><passage>
            <text>first</text><text>second</text>
        </passage></document></collection>"#;
        let c = parse_bioc_xml(xml).unwrap();
        assert_eq!(c.documents[0].passages[0].texts, vec!["first", "second"]);
    }

    #[test]
    fn parse_empty_collection() {
        let c = parse_bioc_xml("<collection></collection>").unwrap();
        assert!(c.documents.is_empty());

        let c = parse_bioc_xml("<collection/>").unwrap();
        assert!(c.documents.is_empty());
    }

    #[test]
    fn missing_collection_root_fails() {
        assert!(parse_bioc_xml("").is_err());
        assert!(parse_bioc_xml("<?xml version=\"1.0\"?>").is_err());
        assert!(parse_bioc_xml("<PubmedArticleSet></PubmedArticleSet>").is_err());
    }

    #[test]
    fn truncated_input_fails() {
        let xml = "<collection><document><passage><text>cut off";
        assert!(parse_bioc_xml(xml).is_err());
    }

    #[test]
    fn mismatched_end_tag_fails() {
        let xml = "<collection><document><passage></document></passage></collection>";
        assert!(parse_bioc_xml(xml).is_err());
    }

    #[test]
    fn unknown_elements_are_skipped() {
        let xml = r#"<collection>
            <infon key="x">collection-level</infon>
            <document>
              <relation id="R1"><node refid="1" role="a"/></relation>
              <passage>
                <sentence><offset>0</offset><text>inner</text></sentence>
                <text>outer</text>
              </passage>
            </document>
        </collection>"#;
        let c = parse_bioc_xml(xml).unwrap();
        assert_eq!(c.documents[0].passages[0].texts, vec!["outer"]);
    }
}
