//! In-memory [`CatalogStore`] hydrated from a [`CatalogSnapshot`].

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use prodex_core::{MediaId, ProductId, RawProduct, TermId};

use crate::snapshot::CatalogSnapshot;
use crate::store::{CatalogQuery, CatalogStore, QueryPage, SortOrder, StoreInfo};

/// Characters left untouched when building permalink query strings.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const SELECTION_PREFIX: &str = "attribute_";

#[derive(Debug)]
struct TaxonomyEntry {
    label: String,
    terms: HashMap<String, String>,
}

/// Immutable catalog held entirely in memory.
#[derive(Debug)]
pub struct InMemoryCatalog {
    site_url: String,
    platform_version: String,
    engine_version: String,
    products: BTreeMap<ProductId, RawProduct>,
    slugs: HashMap<String, ProductId>,
    children: HashMap<ProductId, Vec<ProductId>>,
    categories: HashMap<TermId, String>,
    taxonomies: HashMap<String, TaxonomyEntry>,
    media: HashMap<MediaId, String>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new(snapshot: CatalogSnapshot, site_url: &str) -> Self {
        let mut slugs = HashMap::new();
        let mut children: HashMap<ProductId, Vec<ProductId>> = HashMap::new();
        let mut products = BTreeMap::new();

        for product in snapshot.products {
            if product.is_variation() {
                children
                    .entry(product.parent_id)
                    .or_default()
                    .push(product.id);
            } else if !product.slug.is_empty() {
                slugs.insert(slug_key(&product.slug), product.id);
            }
            products.insert(product.id, product);
        }

        let taxonomies = snapshot
            .taxonomies
            .into_iter()
            .map(|t| {
                let terms = t.terms.into_iter().map(|term| (term.slug, term.name)).collect();
                (
                    t.name,
                    TaxonomyEntry {
                        label: t.label,
                        terms,
                    },
                )
            })
            .collect();

        tracing::info!(
            products = products.len(),
            slugs = slugs.len(),
            "catalog snapshot loaded"
        );

        Self {
            site_url: site_url.trim_end_matches('/').to_owned(),
            platform_version: snapshot.platform_version,
            engine_version: snapshot.engine_version,
            products,
            slugs,
            children,
            categories: snapshot.categories.into_iter().map(|c| (c.id, c.name)).collect(),
            taxonomies,
            media: snapshot.media.into_iter().map(|m| (m.id, m.url)).collect(),
        }
    }

    fn top_level_permalink(&self, product: &RawProduct) -> String {
        if product.slug.is_empty() {
            format!("{}/?p={}", self.site_url, product.id)
        } else {
            format!("{}/product/{}/", self.site_url, product.slug)
        }
    }
}

/// Slugs compare in decoded, lower-cased form so `%D9%85` and `م` resolve alike.
fn slug_key(slug: &str) -> String {
    percent_decode_str(slug.trim().trim_matches('/'))
        .decode_utf8_lossy()
        .to_lowercase()
}

/// A variation matches when every attribute it pins to a value agrees with
/// the selection; an empty pinned value accepts anything.
fn variation_matches(variation: &RawProduct, selection: &IndexMap<String, String>) -> bool {
    variation
        .selected_attributes
        .iter()
        .filter(|(_, pinned)| !pinned.is_empty())
        .all(|(key, pinned)| {
            selection
                .get(&format!("{SELECTION_PREFIX}{key}"))
                .is_some_and(|chosen| chosen == pinned)
        })
}

impl CatalogStore for InMemoryCatalog {
    fn info(&self) -> StoreInfo {
        StoreInfo {
            platform_version: self.platform_version.clone(),
            engine_version: self.engine_version.clone(),
            product_count: self.products.len(),
        }
    }

    fn query(&self, query: &CatalogQuery) -> QueryPage {
        let wanted = |p: &&RawProduct| p.status == query.status && query.post_types.includes(p.kind);
        let ordered: Vec<&RawProduct> = match query.order {
            SortOrder::IdAsc => self.products.values().filter(wanted).collect(),
            SortOrder::IdDesc => self.products.values().rev().filter(wanted).collect(),
        };
        let total = ordered.len() as u64;

        let (items, max_pages) = match query.per_page {
            None => {
                let max_pages = u64::from(total > 0);
                (ordered.into_iter().cloned().collect(), max_pages)
            }
            Some(per_page) => {
                let per_page = per_page.max(1);
                let offset = (query.page.max(1) as usize - 1).saturating_mul(per_page as usize);
                let items = ordered
                    .into_iter()
                    .skip(offset)
                    .take(per_page as usize)
                    .cloned()
                    .collect();
                (items, total.div_ceil(u64::from(per_page)))
            }
        };

        QueryPage {
            items,
            total,
            max_pages,
        }
    }

    fn product(&self, id: ProductId) -> Option<RawProduct> {
        self.products.get(&id).cloned()
    }

    fn product_by_slug(&self, slug: &str) -> Option<RawProduct> {
        let id = self.slugs.get(&slug_key(slug))?;
        self.products.get(id).cloned()
    }

    fn variations(&self, parent_id: ProductId) -> Vec<RawProduct> {
        self.children
            .get(&parent_id)
            .map(|ids| ids.iter().filter_map(|id| self.products.get(id)).cloned().collect())
            .unwrap_or_default()
    }

    fn find_matching_variation(
        &self,
        parent: &RawProduct,
        selection: &IndexMap<String, String>,
    ) -> Option<ProductId> {
        if selection.is_empty() {
            return None;
        }
        self.children
            .get(&parent.id)?
            .iter()
            .filter_map(|id| self.products.get(id))
            .filter(|variation| variation.is_published())
            .find(|variation| variation_matches(variation, selection))
            .map(|variation| variation.id)
    }

    fn category_name(&self, id: TermId) -> Option<String> {
        self.categories.get(&id).cloned()
    }

    fn attribute_label(&self, taxonomy: &str) -> Option<String> {
        self.taxonomies.get(taxonomy).map(|t| t.label.clone())
    }

    fn term_name(&self, taxonomy: &str, slug: &str) -> Option<String> {
        self.taxonomies.get(taxonomy)?.terms.get(slug).cloned()
    }

    fn image_url(&self, id: MediaId) -> Option<String> {
        self.media.get(&id).cloned()
    }

    fn permalink(&self, product: &RawProduct) -> String {
        if !product.is_variation() {
            return self.top_level_permalink(product);
        }
        let Some(parent) = self.products.get(&product.parent_id) else {
            return format!("{}/?p={}", self.site_url, product.id);
        };

        let query: Vec<String> = product
            .selected_attributes
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| {
                format!(
                    "{SELECTION_PREFIX}{}={}",
                    utf8_percent_encode(key.as_str(), QUERY_VALUE),
                    utf8_percent_encode(value, QUERY_VALUE)
                )
            })
            .collect();

        let base = self.top_level_permalink(parent);
        if query.is_empty() {
            base
        } else {
            format!("{base}?{}", query.join("&"))
        }
    }
}
