//! The read interface the extractor needs from a catalog store.

use indexmap::IndexMap;
use prodex_core::{MediaId, ProductId, ProductKind, PublishStatus, RawProduct, TermId};

/// Which post types a listing query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostTypes {
    /// Top-level products only.
    Products,
    /// Top-level products and their variations.
    ProductsAndVariations,
}

impl PostTypes {
    #[must_use]
    pub fn includes(self, kind: ProductKind) -> bool {
        match self {
            Self::Products => kind != ProductKind::Variation,
            Self::ProductsAndVariations => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    IdAsc,
    IdDesc,
}

/// A paged listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub post_types: PostTypes,
    pub status: PublishStatus,
    pub order: SortOrder,
    /// 1-based page number.
    pub page: u32,
    /// Items per page; `None` returns every match on a single page.
    pub per_page: Option<u32>,
}

/// One page of a listing query together with the totals for the whole match set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryPage {
    pub items: Vec<RawProduct>,
    pub total: u64,
    pub max_pages: u64,
}

/// Versions and size of the backing store, reported in response metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoreInfo {
    pub platform_version: String,
    pub engine_version: String,
    pub product_count: usize,
}

/// Read-only access to the product hierarchy, taxonomies and media.
///
/// Lookups that miss return `None`; a store never fails an individual read.
pub trait CatalogStore: Send + Sync {
    fn info(&self) -> StoreInfo;

    fn query(&self, query: &CatalogQuery) -> QueryPage;

    /// Looks up any product or variation by id, regardless of status.
    fn product(&self, id: ProductId) -> Option<RawProduct>;

    /// Resolves a top-level product by its URL slug, regardless of status.
    fn product_by_slug(&self, slug: &str) -> Option<RawProduct>;

    /// Variations owned by `parent_id`, in store order.
    fn variations(&self, parent_id: ProductId) -> Vec<RawProduct>;

    /// Finds the variation of `parent` matching `selection`, whose keys carry
    /// the `attribute_` prefix (e.g. `attribute_pa_color`).
    fn find_matching_variation(
        &self,
        parent: &RawProduct,
        selection: &IndexMap<String, String>,
    ) -> Option<ProductId>;

    fn category_name(&self, id: TermId) -> Option<String>;

    /// Display label registered for a `pa_` taxonomy.
    fn attribute_label(&self, taxonomy: &str) -> Option<String>;

    /// Display name of the term with `slug` in `taxonomy`.
    fn term_name(&self, taxonomy: &str, slug: &str) -> Option<String>;

    /// Full-size URL of a media attachment.
    fn image_url(&self, id: MediaId) -> Option<String>;

    fn permalink(&self, product: &RawProduct) -> String;
}
