//! Catalog-store entities as the extractor reads them.
//!
//! These mirror the shape of a WooCommerce product post: a top-level product
//! is either simple (or one of the simple-like kinds) or variable, and a
//! variable product owns variation posts that point back at it through
//! `parent_id`.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type ProductId = i64;
pub type TermId = i64;
pub type MediaId = i64;

/// Namespace prefix that marks an attribute key as a global taxonomy.
pub const TAXONOMY_PREFIX: &str = "pa_";

/// Attribute key, split on whether its values are controlled taxonomy terms
/// or free text.
///
/// The raw string form (e.g. `"pa_color"` or `"Material"`) is parsed once at
/// the boundary; everything downstream dispatches on the variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttributeKey {
    /// Global attribute backed by a taxonomy, e.g. `pa_color`. Holds the full
    /// taxonomy name including the prefix.
    Taxonomy(String),
    /// Product-local attribute with free-text values.
    Plain(String),
}

impl AttributeKey {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self::from(raw.to_owned())
    }

    /// The raw key as stored in the catalog.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Taxonomy(name) | Self::Plain(name) => name,
        }
    }

    #[must_use]
    pub fn is_taxonomy(&self) -> bool {
        matches!(self, Self::Taxonomy(_))
    }
}

impl From<String> for AttributeKey {
    fn from(raw: String) -> Self {
        if raw.starts_with(TAXONOMY_PREFIX) {
            Self::Taxonomy(raw)
        } else {
            Self::Plain(raw)
        }
    }
}

impl From<AttributeKey> for String {
    fn from(key: AttributeKey) -> Self {
        match key {
            AttributeKey::Taxonomy(name) | AttributeKey::Plain(name) => name,
        }
    }
}

impl std::fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An attribute attached to a top-level product.
///
/// For taxonomy keys `values` holds the slugs of the terms assigned to the
/// product; for plain keys it holds the literal option strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttribute {
    pub key: AttributeKey,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub values: Vec<String>,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Simple,
    Variable,
    Variation,
    Grouped,
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    Publish,
    Draft,
    Pending,
    Private,
}

/// Stock status token as the store reports it.
///
/// Unknown tokens are carried through verbatim so the feed never drops a
/// status the store invented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StockStatus {
    #[default]
    InStock,
    OutOfStock,
    OnBackorder,
    Other(String),
}

impl StockStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::InStock => "instock",
            Self::OutOfStock => "outofstock",
            Self::OnBackorder => "onbackorder",
            Self::Other(token) => token,
        }
    }
}

impl From<String> for StockStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "instock" => Self::InStock,
            "outofstock" => Self::OutOfStock,
            "onbackorder" => Self::OnBackorder,
            _ => Self::Other(raw),
        }
    }
}

impl From<StockStatus> for String {
    fn from(status: StockStatus) -> Self {
        match status {
            StockStatus::Other(token) => token,
            known => known.as_str().to_owned(),
        }
    }
}

/// A product or variation node read from the catalog store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProduct {
    pub id: ProductId,
    /// Owning variable product for variations, `0` for top-level products.
    #[serde(default)]
    pub parent_id: ProductId,
    pub kind: ProductKind,
    #[serde(default = "default_status")]
    pub status: PublishStatus,
    /// URL path segment; variations usually have none.
    #[serde(default)]
    pub slug: String,
    pub name: String,
    /// Value of the `product_english_name` meta field.
    #[serde(default)]
    pub english_name: Option<String>,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub category_ids: Vec<TermId>,
    #[serde(default)]
    pub gallery_image_ids: Vec<MediaId>,
    #[serde(default)]
    pub image_id: Option<MediaId>,
    /// Attributes of a top-level product, in display order.
    #[serde(default)]
    pub attributes: Vec<ProductAttribute>,
    /// Attribute values a variation is pinned to. An empty value means
    /// "any value".
    #[serde(default)]
    pub selected_attributes: IndexMap<AttributeKey, String>,
    /// Representative attribute combination of a variable product.
    #[serde(default)]
    pub default_attributes: IndexMap<AttributeKey, String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub regular_price: Option<Decimal>,
    #[serde(default)]
    pub stock_status: StockStatus,
    pub date_created: DateTime<Utc>,
}

fn default_status() -> PublishStatus {
    PublishStatus::Publish
}

impl RawProduct {
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.status == PublishStatus::Publish
    }

    #[must_use]
    pub fn is_variable(&self) -> bool {
        self.kind == ProductKind::Variable
    }

    #[must_use]
    pub fn is_variation(&self) -> bool {
        self.kind == ProductKind::Variation
    }

    /// `true` when the product has a price that is set and non-zero, the
    /// condition a variation must meet to be listed on its own.
    #[must_use]
    pub fn has_price(&self) -> bool {
        self.price.is_some_and(|price| !price.is_zero())
    }
}
