use biocflat_bioc::export::{render_references, render_title_abstracts};
use biocflat_bioc::parser::parse_bioc_xml;

fn load_sample(filename: &str) -> String {
    let dir = std::env::var("BENCH_DATA_DIR")
        .expect("set BENCH_DATA_DIR to directory with sample data files");
    let path = std::path::Path::new(&dir).join(filename);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

#[divan::bench]
fn parse_bioc_xml_bench(bencher: divan::Bencher) {
    let xml = load_sample("bioc_sample.xml");
    bencher.bench(|| parse_bioc_xml(&xml).unwrap());
}

#[divan::bench]
fn render_outputs_bench(bencher: divan::Bencher) {
    let docs = parse_bioc_xml(&load_sample("bioc_sample.xml"))
        .unwrap()
        .documents;
    bencher.bench(|| (render_title_abstracts(&docs), render_references(&docs)));
}

fn main() {
    divan::main();
}
