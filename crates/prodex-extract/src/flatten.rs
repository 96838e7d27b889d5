//! Composition of one flat [`CatalogItem`] per sellable unit.

use prodex_core::{CatalogItem, MediaId, RawProduct, SpecMap, GUARANTEE_KEYS, SKU_LABEL};
use prodex_store::CatalogStore;

use crate::error::ExtractError;
use crate::pricing::{resolve_variable_price, ResolvedPrice};
use crate::resolve::AttributeResolver;

/// Turns raw catalog products into feed records.
#[derive(Clone, Copy)]
pub struct Flattener<'a> {
    store: &'a dyn CatalogStore,
    resolver: AttributeResolver<'a>,
}

impl<'a> Flattener<'a> {
    #[must_use]
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Self {
            store,
            resolver: AttributeResolver::new(store),
        }
    }

    /// Flattens `product` into a feed record.
    ///
    /// With `is_variation_child` the record takes title, subtitle, category
    /// and `parent_id` from the owning variable product, and price and stock
    /// from the variation itself.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MissingParent`] when a child's parent is not in
    /// the store.
    pub fn flatten(
        &self,
        product: &RawProduct,
        is_variation_child: bool,
    ) -> Result<CatalogItem, ExtractError> {
        let parent = if is_variation_child {
            let parent =
                self.store
                    .product(product.parent_id)
                    .ok_or(ExtractError::MissingParent {
                        id: product.id,
                        parent_id: product.parent_id,
                    })?;
            Some(parent)
        } else {
            None
        };
        let identity = parent.as_ref().unwrap_or(product);

        let (price, mut spec) = match &parent {
            Some(_) => (own_price(product), self.child_spec(product)),
            None if product.is_variable() => {
                let pricing = resolve_variable_price(self.store, self.resolver, product);
                let spec = self.visible_spec(product, pricing.default_spec);
                (pricing.price, spec)
            }
            None => (own_price(product), self.visible_spec(product, SpecMap::new())),
        };

        let image_id = product
            .image_id
            .or_else(|| parent.as_ref().and_then(|p| p.image_id));
        let (image_link, image_links) = self.images(product, image_id);

        let short_desc = inherit(&product.short_description, parent.as_ref(), |p| {
            &p.short_description
        });
        let sku = inherit(&product.sku, parent.as_ref(), |p| &p.sku);

        let guarantee = guarantee(&spec);
        if !spec.contains_key(SKU_LABEL) && !sku.is_empty() {
            spec.insert(SKU_LABEL.to_owned(), sku.to_owned());
        }

        Ok(CatalogItem {
            title: identity.name.clone(),
            subtitle: identity.english_name.clone().unwrap_or_default(),
            page_unique: product.id,
            parent_id: parent.as_ref().map_or(0, |p| p.id),
            current_price: price.current,
            old_price: price.regular,
            availability: price.availability,
            category_name: self.category_name(identity),
            image_link,
            image_links,
            page_url: self.store.permalink(product),
            short_desc: short_desc.to_owned(),
            spec: (!spec.is_empty()).then_some(spec),
            date: product.date_created,
            guarantee,
        })
    }

    /// Name of the last category assigned to the product.
    fn category_name(&self, product: &RawProduct) -> String {
        product
            .category_ids
            .last()
            .and_then(|id| self.store.category_name(*id))
            .unwrap_or_default()
    }

    /// Gallery URLs in order, with the primary image appended when it is not
    /// already part of the gallery.
    fn images(
        &self,
        product: &RawProduct,
        image_id: Option<MediaId>,
    ) -> (Option<String>, Vec<String>) {
        let mut links: Vec<String> = product
            .gallery_image_ids
            .iter()
            .filter_map(|id| self.store.image_url(*id))
            .collect();

        let primary = image_id.and_then(|id| self.store.image_url(id));
        if let Some(url) = &primary {
            if !links.contains(url) {
                links.push(url.clone());
            }
        }
        (primary, links)
    }

    /// Spec of a top-level product: `spec` (the resolved defaults, if any)
    /// followed by every visible attribute whose label is not taken yet.
    fn visible_spec(&self, product: &RawProduct, mut spec: SpecMap) -> SpecMap {
        for attribute in product.attributes.iter().filter(|a| a.visible) {
            let label = self.resolver.label(&attribute.key);
            if !spec.contains_key(&label) {
                let values = self.resolver.joined_values(attribute);
                spec.insert(label, values);
            }
        }
        spec
    }

    /// Spec of a variation: its own pinned attribute values.
    fn child_spec(&self, product: &RawProduct) -> SpecMap {
        let mut spec = SpecMap::new();
        for (key, value) in &product.selected_attributes {
            if value.is_empty() {
                continue;
            }
            let (label, value) = self.resolver.resolve(key, value);
            spec.insert(label, value);
        }
        spec
    }
}

fn own_price(product: &RawProduct) -> ResolvedPrice {
    ResolvedPrice {
        current: product.price,
        regular: product.regular_price,
        availability: product.stock_status.clone(),
        matched_variation: None,
    }
}

/// A variation's empty field falls back to the parent's value.
fn inherit<'p, F>(own: &'p str, parent: Option<&'p RawProduct>, field: F) -> &'p str
where
    F: Fn(&'p RawProduct) -> &'p String,
{
    match parent {
        Some(parent) if own.is_empty() => field(parent),
        _ => own,
    }
}

/// First non-empty spec value stored under a recognised guarantee label.
fn guarantee(spec: &SpecMap) -> String {
    GUARANTEE_KEYS
        .iter()
        .find_map(|key| spec.get(*key).filter(|value| !value.is_empty()))
        .cloned()
        .unwrap_or_default()
}
