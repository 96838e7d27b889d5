use prodex_store::{parse_snapshot, InMemoryCatalog};

pub(crate) const SITE_URL: &str = "https://shop.example";

pub(crate) fn catalog() -> InMemoryCatalog {
    let snapshot = parse_snapshot(include_str!("../tests/fixtures/catalog.yaml"))
        .expect("fixture catalog should parse");
    InMemoryCatalog::new(snapshot, SITE_URL)
}
