//! Behaviour of the in-memory catalog against a small snapshot.

use indexmap::IndexMap;
use prodex_core::PublishStatus;
use prodex_store::{
    parse_snapshot, CatalogQuery, CatalogStore, InMemoryCatalog, PostTypes, SortOrder,
};
use rust_decimal::Decimal;

const SNAPSHOT: &str = r"
platform_version: '6.5.2'
engine_version: '8.4.0'
categories:
  - { id: 10, name: Home }
taxonomies:
  - name: pa_color
    label: رنگ
    terms:
      - { slug: red, name: قرمز }
      - { slug: blue, name: آبی }
media:
  - { id: 100, url: 'https://cdn.shop.example/a.jpg' }
products:
  - id: 1
    kind: simple
    slug: kettle
    name: Kettle
    price: '10'
    date_created: '2024-01-01T00:00:00Z'
  - id: 2
    kind: variable
    slug: '%d8%aa%db%8c%d8%b4%d8%b1%d8%aa'
    name: Shirt
    date_created: '2024-01-02T00:00:00Z'
  - id: 3
    parent_id: 2
    kind: variation
    name: Shirt - Red
    price: '20'
    selected_attributes: { pa_color: red }
    date_created: '2024-01-02T00:00:00Z'
  - id: 4
    parent_id: 2
    kind: variation
    name: Shirt - Any
    price: '25'
    selected_attributes: { pa_color: '' }
    date_created: '2024-01-02T00:00:00Z'
  - id: 5
    kind: simple
    status: draft
    slug: draft-thing
    name: Draft
    date_created: '2024-01-03T00:00:00Z'
";

fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(
        parse_snapshot(SNAPSHOT).expect("snapshot"),
        "https://shop.example/",
    )
}

fn query(post_types: PostTypes, page: u32, per_page: Option<u32>) -> CatalogQuery {
    CatalogQuery {
        post_types,
        status: PublishStatus::Publish,
        order: SortOrder::IdDesc,
        page,
        per_page,
    }
}

fn selection(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

#[test]
fn query_orders_by_id_descending_and_skips_drafts() {
    let page = catalog().query(&query(PostTypes::ProductsAndVariations, 1, Some(10)));
    let ids: Vec<i64> = page.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![4, 3, 2, 1]);
    assert_eq!(page.total, 4);
    assert_eq!(page.max_pages, 1);
}

#[test]
fn query_without_variations_returns_top_level_only() {
    let page = catalog().query(&query(PostTypes::Products, 1, Some(10)));
    let ids: Vec<i64> = page.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[test]
fn query_pages_and_counts() {
    let store = catalog();
    let second = store.query(&query(PostTypes::ProductsAndVariations, 2, Some(3)));
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].id, 1);
    assert_eq!(second.total, 4);
    assert_eq!(second.max_pages, 2);

    let beyond = store.query(&query(PostTypes::ProductsAndVariations, 9, Some(3)));
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total, 4);
}

#[test]
fn unbounded_query_returns_everything_on_one_page() {
    let page = catalog().query(&query(PostTypes::ProductsAndVariations, 1, None));
    assert_eq!(page.items.len(), 4);
    assert_eq!(page.max_pages, 1);
}

#[test]
fn slug_lookup_matches_decoded_form() {
    let store = catalog();
    let shirt = store.product_by_slug("تیشرت").expect("decoded slug");
    assert_eq!(shirt.id, 2);
    assert_eq!(
        store.product_by_slug("%D8%AA%DB%8C%D8%B4%D8%B1%D8%AA").map(|p| p.id),
        Some(2)
    );
    assert!(store.product_by_slug("missing").is_none());
}

#[test]
fn matching_variation_prefers_exact_pin_in_store_order() {
    let store = catalog();
    let parent = store.product(2).expect("parent");
    assert_eq!(
        store.find_matching_variation(&parent, &selection(&[("attribute_pa_color", "red")])),
        Some(3)
    );
    assert_eq!(
        store.find_matching_variation(&parent, &selection(&[("attribute_pa_color", "blue")])),
        Some(4)
    );
    assert_eq!(store.find_matching_variation(&parent, &IndexMap::new()), None);
}

#[test]
fn variations_are_listed_in_store_order() {
    let prices: Vec<Option<Decimal>> = catalog().variations(2).iter().map(|v| v.price).collect();
    assert_eq!(prices, vec![Some(Decimal::new(20, 0)), Some(Decimal::new(25, 0))]);
}

#[test]
fn lookups_resolve_labels_terms_and_media() {
    let store = catalog();
    assert_eq!(store.attribute_label("pa_color").as_deref(), Some("رنگ"));
    assert_eq!(store.term_name("pa_color", "blue").as_deref(), Some("آبی"));
    assert!(store.term_name("pa_color", "green").is_none());
    assert_eq!(store.category_name(10).as_deref(), Some("Home"));
    assert_eq!(
        store.image_url(100).as_deref(),
        Some("https://cdn.shop.example/a.jpg")
    );
}

#[test]
fn permalinks_follow_product_base_and_variation_query() {
    let store = catalog();
    let kettle = store.product(1).expect("kettle");
    assert_eq!(store.permalink(&kettle), "https://shop.example/product/kettle/");

    let red = store.product(3).expect("variation");
    assert!(store
        .permalink(&red)
        .ends_with("/?attribute_pa_color=red"));

    let any = store.product(4).expect("variation");
    assert!(!store.permalink(&any).contains('?'));
}

#[test]
fn info_reports_versions() {
    let info = catalog().info();
    assert_eq!(info.platform_version, "6.5.2");
    assert_eq!(info.engine_version, "8.4.0");
    assert_eq!(info.product_count, 5);
}
