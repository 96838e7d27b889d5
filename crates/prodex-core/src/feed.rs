//! Flat records emitted to the price-comparison aggregator.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::products::{ProductId, StockStatus};

/// Ordered label → value specification block of one catalog item.
pub type SpecMap = IndexMap<String, String>;

/// Spec labels recognised as a guarantee, in priority order.
pub const GUARANTEE_KEYS: [&str; 9] = [
    "گارانتی",
    "guarantee",
    "warranty",
    "garanty",
    "گارانتی:",
    "گارانتی محصول",
    "گارانتی محصول:",
    "ضمانت",
    "ضمانت:",
];

/// Spec label carrying the product identifier (SKU).
pub const SKU_LABEL: &str = "شناسه کالا";

/// One sellable unit in the feed: a simple product or a single variation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogItem {
    pub title: String,
    /// English name; empty when the product has none.
    pub subtitle: String,
    pub page_unique: ProductId,
    pub parent_id: ProductId,
    pub current_price: Option<Decimal>,
    pub old_price: Option<Decimal>,
    pub availability: StockStatus,
    pub category_name: String,
    pub image_link: Option<String>,
    pub image_links: Vec<String>,
    pub page_url: String,
    pub short_desc: String,
    /// Serialized as `[]` when absent and `[{...}]` otherwise.
    #[serde(serialize_with = "serialize_spec")]
    pub spec: Option<SpecMap>,
    pub date: DateTime<Utc>,
    pub guarantee: String,
}

#[allow(clippy::ref_option)]
fn serialize_spec<S>(spec: &Option<SpecMap>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let block: &[SpecMap] = spec.as_ref().map_or(&[], std::slice::from_ref);
    block.serialize(serializer)
}

/// Version block appended to every successful extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub wordpress_version: String,
    pub php_version: String,
    pub plugin_version: String,
    pub woocommerce_version: String,
}
