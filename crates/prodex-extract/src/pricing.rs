//! Price and availability of variable products.

use indexmap::IndexMap;
use prodex_core::{AttributeKey, ProductId, RawProduct, SpecMap, StockStatus};
use prodex_store::CatalogStore;
use rust_decimal::Decimal;

use crate::resolve::AttributeResolver;

/// Key prefix the store's variation matcher expects on selection keys.
const SELECTION_PREFIX: &str = "attribute_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPrice {
    pub current: Option<Decimal>,
    pub regular: Option<Decimal>,
    pub availability: StockStatus,
    /// Variation the price was taken from, `None` when the bounding-price
    /// fallback was used.
    pub matched_variation: Option<ProductId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariablePricing {
    pub price: ResolvedPrice,
    /// Resolved default-attribute entries, in selection order.
    pub default_spec: SpecMap,
}

/// Normalizes default-attribute keys to the `attribute_` form.
fn selection_from_defaults(defaults: &IndexMap<AttributeKey, String>) -> IndexMap<String, String> {
    defaults
        .iter()
        .map(|(key, value)| {
            let key = key.as_str();
            let key = if key.starts_with(SELECTION_PREFIX) {
                key.to_owned()
            } else {
                format!("{SELECTION_PREFIX}{key}")
            };
            (key, value.clone())
        })
        .collect()
}

/// Highest price among a variable product's visible variations; zero when
/// there are none.
fn max_variation_price<F>(variations: &[RawProduct], field: F) -> Decimal
where
    F: Fn(&RawProduct) -> Option<Decimal>,
{
    variations
        .iter()
        .filter(|v| v.is_published() && v.price.is_some())
        .filter_map(field)
        .max()
        .unwrap_or(Decimal::ZERO)
}

/// Resolves the representative price of a variable product.
///
/// The variation matching the product's default-attribute selection supplies
/// price, regular price and stock status. Without a match the highest
/// variation prices are reported and availability stays the parent's.
/// Independently of the match, the default selection is resolved into spec
/// entries; the first entry written under a label wins.
#[must_use]
pub fn resolve_variable_price(
    store: &dyn CatalogStore,
    resolver: AttributeResolver<'_>,
    product: &RawProduct,
) -> VariablePricing {
    let selection = selection_from_defaults(&product.default_attributes);
    let matched = store
        .find_matching_variation(product, &selection)
        .and_then(|id| store.product(id));

    let price = if let Some(variation) = matched {
        ResolvedPrice {
            current: variation.price,
            regular: variation.regular_price,
            availability: variation.stock_status,
            matched_variation: Some(variation.id),
        }
    } else {
        tracing::debug!(
            product_id = product.id,
            "no variation matches default attributes; using highest variation price"
        );
        let variations = store.variations(product.id);
        ResolvedPrice {
            current: Some(max_variation_price(&variations, |v| v.price)),
            regular: Some(max_variation_price(&variations, |v| v.regular_price)),
            availability: product.stock_status.clone(),
            matched_variation: None,
        }
    };

    let mut default_spec = SpecMap::new();
    for (key, value) in &product.default_attributes {
        if value.is_empty() {
            continue;
        }
        let (label, value) = resolver.resolve(key, value);
        default_spec.entry(label).or_insert(value);
    }

    VariablePricing {
        price,
        default_spec,
    }
}
