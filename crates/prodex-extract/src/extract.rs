//! Request-mode dispatch over the catalog store.

use prodex_core::{CatalogItem, Metadata, PublishStatus, RawProduct};
use prodex_store::{CatalogQuery, CatalogStore, PostTypes, SortOrder, StoreInfo};
use serde::Serialize;

use crate::flatten::Flattener;
use crate::params::{ExtractRequest, PageRequest};

/// Result of one extraction, before the transport adds metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Extraction {
    pub products: Vec<CatalogItem>,
    /// Total matches of a paged scan; `None` for ID and slug requests.
    pub count: Option<u64>,
    pub max_pages: Option<u64>,
    /// Entities left out of `products` (missing, unpublished, unpriced or
    /// orphaned).
    pub skipped: usize,
}

/// Wire envelope of a successful extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub products: Vec<CatalogItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<u64>,
    pub metadata: Metadata,
}

impl Extraction {
    #[must_use]
    pub fn into_envelope(self, metadata: Metadata) -> Envelope {
        Envelope {
            products: self.products,
            count: self.count,
            max_pages: self.max_pages,
            metadata,
        }
    }

    fn push(&mut self, item: Option<CatalogItem>) {
        match item {
            Some(item) => self.products.push(item),
            None => self.skipped += 1,
        }
    }
}

/// Builds the version block reported alongside every successful extraction.
///
/// `php_version` carries the workspace's declared minimum Rust toolchain.
#[must_use]
pub fn metadata(info: &StoreInfo, plugin_version: &str) -> Metadata {
    Metadata {
        wordpress_version: info.platform_version.clone(),
        php_version: env!("CARGO_PKG_RUST_VERSION").to_owned(),
        plugin_version: plugin_version.to_owned(),
        woocommerce_version: info.engine_version.clone(),
    }
}

pub struct Extractor<'a> {
    store: &'a dyn CatalogStore,
    flattener: Flattener<'a>,
}

impl<'a> Extractor<'a> {
    #[must_use]
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Self {
            store,
            flattener: Flattener::new(store),
        }
    }

    /// Runs `request` against the store. Never fails: entities that cannot be
    /// emitted are counted in [`Extraction::skipped`].
    #[must_use]
    pub fn extract(&self, request: &ExtractRequest) -> Extraction {
        match request {
            ExtractRequest::Ids(ids) => {
                let mut out = Extraction::default();
                for id in ids {
                    let item = self.store.product(*id).and_then(|p| self.by_id(&p));
                    out.push(item);
                }
                out
            }
            ExtractRequest::Slugs(slugs) => {
                let mut out = Extraction::default();
                for slug in slugs {
                    let item = self
                        .store
                        .product_by_slug(slug)
                        .filter(RawProduct::is_published)
                        .and_then(|p| self.emit(&p, false));
                    out.push(item);
                }
                out
            }
            ExtractRequest::Page(page) => self.paged(*page),
        }
    }

    fn by_id(&self, product: &RawProduct) -> Option<CatalogItem> {
        if !product.is_published() {
            tracing::debug!(product_id = product.id, "skipping unpublished product");
            return None;
        }
        if product.is_variation() {
            if !product.has_price() {
                return None;
            }
            return self.emit(product, true);
        }
        self.emit(product, false)
    }

    fn paged(&self, request: PageRequest) -> Extraction {
        let query = CatalogQuery {
            post_types: if request.show_variations {
                PostTypes::ProductsAndVariations
            } else {
                PostTypes::Products
            },
            status: PublishStatus::Publish,
            order: SortOrder::IdDesc,
            page: request.page,
            per_page: request.per_page,
        };
        let page = self.store.query(&query);

        let mut out = Extraction {
            count: Some(page.total),
            max_pages: Some(page.max_pages),
            ..Extraction::default()
        };
        for product in &page.items {
            let item = if !request.show_variations {
                self.emit(product, false)
            } else if product.is_variable() {
                None
            } else if product.is_variation() {
                product
                    .has_price()
                    .then(|| self.emit(product, true))
                    .flatten()
            } else {
                self.emit(product, false)
            };
            out.push(item);
        }
        out
    }

    fn emit(&self, product: &RawProduct, is_variation_child: bool) -> Option<CatalogItem> {
        self.flattener
            .flatten(product, is_variation_child)
            .map_err(|err| tracing::debug!(error = %err, "skipping product"))
            .ok()
    }
}
