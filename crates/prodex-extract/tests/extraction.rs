use indexmap::IndexMap;
use prodex_core::{MediaId, ProductId, RawProduct, TermId, SKU_LABEL};
use prodex_extract::{ExtractRequest, Extractor, RawParams};
use prodex_store::{
    parse_snapshot, CatalogQuery, CatalogStore, InMemoryCatalog, QueryPage, StoreInfo,
};

fn catalog() -> InMemoryCatalog {
    let snapshot =
        parse_snapshot(include_str!("fixtures/catalog.yaml")).expect("fixture should parse");
    InMemoryCatalog::new(snapshot, "https://shop.example")
}

/// Delegates to the fixture catalog but answers every listing query with a
/// fixed page.
struct FixedPage {
    inner: InMemoryCatalog,
    page: Vec<ProductId>,
}

impl CatalogStore for FixedPage {
    fn info(&self) -> StoreInfo {
        self.inner.info()
    }

    fn query(&self, _query: &CatalogQuery) -> QueryPage {
        let items: Vec<RawProduct> = self
            .page
            .iter()
            .filter_map(|id| self.inner.product(*id))
            .collect();
        QueryPage {
            total: items.len() as u64,
            max_pages: 2,
            items,
        }
    }

    fn product(&self, id: ProductId) -> Option<RawProduct> {
        self.inner.product(id)
    }

    fn product_by_slug(&self, slug: &str) -> Option<RawProduct> {
        self.inner.product_by_slug(slug)
    }

    fn variations(&self, parent_id: ProductId) -> Vec<RawProduct> {
        self.inner.variations(parent_id)
    }

    fn find_matching_variation(
        &self,
        parent: &RawProduct,
        selection: &IndexMap<String, String>,
    ) -> Option<ProductId> {
        self.inner.find_matching_variation(parent, selection)
    }

    fn category_name(&self, id: TermId) -> Option<String> {
        self.inner.category_name(id)
    }

    fn attribute_label(&self, taxonomy: &str) -> Option<String> {
        self.inner.attribute_label(taxonomy)
    }

    fn term_name(&self, taxonomy: &str, slug: &str) -> Option<String> {
        self.inner.term_name(taxonomy, slug)
    }

    fn image_url(&self, id: MediaId) -> Option<String> {
        self.inner.image_url(id)
    }

    fn permalink(&self, product: &RawProduct) -> String {
        self.inner.permalink(product)
    }
}

fn params(pairs: &[(&str, &str)]) -> RawParams {
    let mut raw = RawParams::default();
    for (key, value) in pairs {
        let value = Some((*value).to_owned());
        match *key {
            "variation" => raw.variation = value,
            "limit" => raw.limit = value,
            "page" => raw.page = value,
            "products" => raw.products = value,
            "slugs" => raw.slugs = value,
            other => panic!("unknown parameter {other}"),
        }
    }
    raw
}

#[test]
fn id_list_with_draft_yields_only_published_product() {
    let store = catalog();
    let request = ExtractRequest::from_params(&params(&[("products", "5,9")]), 10);
    let out = Extractor::new(&store).extract(&request);

    assert_eq!(out.products.len(), 1);
    let item = &out.products[0];
    assert_eq!(item.page_unique, 5);
    let spec = item.spec.as_ref().expect("spec present");
    assert_eq!(spec.get(SKU_LABEL).map(String::as_str), Some("X1"));
}

#[test]
fn paged_variation_scan_emits_children_and_simple_products() {
    let store = FixedPage {
        inner: catalog(),
        page: vec![30, 32, 31, 5],
    };
    let request =
        ExtractRequest::from_params(&params(&[("variation", "true"), ("limit", "2")]), 10);
    let out = Extractor::new(&store).extract(&request);

    let ids: Vec<ProductId> = out.products.iter().map(|p| p.page_unique).collect();
    assert_eq!(ids, vec![32, 31, 5]);
    assert_eq!(out.count, Some(4));
    assert_eq!(out.max_pages, Some(2));
}

#[test]
fn variable_product_in_variation_mode_becomes_its_priced_variations() {
    let store = catalog();
    let request = ExtractRequest::from_params(&params(&[("variation", "1"), ("limit", "-1")]), 10);
    let out = Extractor::new(&store).extract(&request);

    let mug: Vec<_> = out
        .products
        .iter()
        .filter(|p| p.title == "Mug")
        .collect();
    assert_eq!(mug.len(), 2);
    assert!(mug.iter().all(|p| p.parent_id == 30));
    assert!(out.products.iter().all(|p| p.page_unique != 30));
}

#[test]
fn slug_and_id_modes_serialize_identically() {
    let store = catalog();
    let extractor = Extractor::new(&store);
    let by_id = extractor.extract(&ExtractRequest::from_params(&params(&[("products", "20")]), 10));
    let by_slug = extractor.extract(&ExtractRequest::from_params(&params(&[("slugs", "shirt")]), 10));

    assert_eq!(
        serde_json::to_value(&by_id.products).expect("serialize"),
        serde_json::to_value(&by_slug.products).expect("serialize"),
    );
}

#[test]
fn serialized_item_uses_wire_field_names() {
    let store = catalog();
    let out = Extractor::new(&store).extract(&ExtractRequest::Ids(vec![40]));
    let json = serde_json::to_value(&out.products[0]).expect("serialize");

    assert_eq!(json["page_unique"], 40);
    assert_eq!(json["parent_id"], 0);
    assert_eq!(json["subtitle"], "");
    assert_eq!(json["spec"], serde_json::json!([]));
    assert_eq!(json["current_price"], "0");
    assert!(json["image_link"].is_null());
}
