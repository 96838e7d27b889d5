//! Attribute resolution: raw keys and values to display label/value pairs.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use prodex_core::{AttributeKey, ProductAttribute};
use prodex_store::CatalogStore;

/// Decodes with form semantics (`+` is a space).
pub(crate) fn decode_key(raw: &str) -> String {
    let spaced: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Decodes an attribute value; only `%XX` escapes are interpreted.
pub(crate) fn decode_value(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Looks up taxonomy labels and term names in the catalog store.
#[derive(Clone, Copy)]
pub struct AttributeResolver<'a> {
    store: &'a dyn CatalogStore,
}

impl<'a> AttributeResolver<'a> {
    #[must_use]
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Self { store }
    }

    /// Display label of an attribute key. Taxonomies without a registered
    /// label fall back to their own name.
    #[must_use]
    pub fn label(&self, key: &AttributeKey) -> String {
        match key {
            AttributeKey::Taxonomy(taxonomy) => {
                let label = self
                    .store
                    .attribute_label(taxonomy)
                    .unwrap_or_else(|| taxonomy.clone());
                decode_key(&label)
            }
            AttributeKey::Plain(name) => decode_key(name),
        }
    }

    /// Resolves one selected attribute value to a `(label, value)` pair.
    ///
    /// For taxonomy keys `raw_value` is a term slug; an unknown term resolves
    /// to an empty value. Callers skip empty raw values before calling this.
    #[must_use]
    pub fn resolve(&self, key: &AttributeKey, raw_value: &str) -> (String, String) {
        let value = match key {
            AttributeKey::Taxonomy(taxonomy) => {
                if let Some(name) = self.store.term_name(taxonomy, raw_value) {
                    decode_value(&name)
                } else {
                    tracing::debug!(%taxonomy, slug = raw_value, "unknown taxonomy term");
                    String::new()
                }
            }
            AttributeKey::Plain(_) => decode_value(raw_value),
        };
        (self.label(key), value)
    }

    /// All values of a product attribute joined into one display string:
    /// term names for taxonomies (unknown slugs dropped), literal options
    /// otherwise.
    #[must_use]
    pub fn joined_values(&self, attribute: &ProductAttribute) -> String {
        match &attribute.key {
            AttributeKey::Taxonomy(taxonomy) => attribute
                .values
                .iter()
                .filter_map(|slug| self.store.term_name(taxonomy, slug))
                .collect::<Vec<_>>()
                .join(", "),
            AttributeKey::Plain(_) => attribute.values.join(", "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::catalog;

    #[test]
    fn decode_key_treats_plus_as_space() {
        assert_eq!(decode_key("Glaze+Type"), "Glaze Type");
        assert_eq!(decode_key("Care%20Notes"), "Care Notes");
    }

    #[test]
    fn decode_value_keeps_plus() {
        assert_eq!(decode_value("A+B%20C"), "A+B C");
    }

    #[test]
    fn decoding_leaves_invalid_escapes_alone() {
        assert_eq!(decode_value("100%"), "100%");
    }

    #[test]
    fn taxonomy_attribute_resolves_label_and_term_name() {
        let store = catalog();
        let resolver = AttributeResolver::new(&store);
        let (label, value) = resolver.resolve(&AttributeKey::parse("pa_color"), "red");
        assert_eq!(label, "رنگ");
        assert_eq!(value, "قرمز");
    }

    #[test]
    fn taxonomy_label_is_url_decoded() {
        let store = catalog();
        let resolver = AttributeResolver::new(&store);
        assert_eq!(resolver.label(&AttributeKey::parse("pa_size")), "سایز");
    }

    #[test]
    fn unknown_term_resolves_to_empty_value() {
        let store = catalog();
        let resolver = AttributeResolver::new(&store);
        let (label, value) = resolver.resolve(&AttributeKey::parse("pa_color"), "green");
        assert_eq!(label, "رنگ");
        assert_eq!(value, "");
    }

    #[test]
    fn unregistered_taxonomy_falls_back_to_its_name() {
        let store = catalog();
        let resolver = AttributeResolver::new(&store);
        let (label, value) = resolver.resolve(&AttributeKey::parse("pa_weight"), "1kg");
        assert_eq!(label, "pa_weight");
        assert_eq!(value, "");
    }

    #[test]
    fn plain_attribute_is_decoded_verbatim() {
        let store = catalog();
        let resolver = AttributeResolver::new(&store);
        let (label, value) =
            resolver.resolve(&AttributeKey::parse("Glaze+Type"), "Matte%20Finish");
        assert_eq!(label, "Glaze Type");
        assert_eq!(value, "Matte Finish");
    }

    #[test]
    fn joined_values_uses_term_names_for_taxonomies() {
        let store = catalog();
        let resolver = AttributeResolver::new(&store);
        let attribute = ProductAttribute {
            key: AttributeKey::parse("pa_color"),
            visible: true,
            values: vec!["red".into(), "purple".into(), "blue".into()],
        };
        assert_eq!(resolver.joined_values(&attribute), "قرمز, آبی");
    }

    #[test]
    fn joined_values_keeps_plain_options() {
        let store = catalog();
        let resolver = AttributeResolver::new(&store);
        let attribute = ProductAttribute {
            key: AttributeKey::parse("Material"),
            visible: true,
            values: vec!["Steel".into(), "Glass".into()],
        };
        assert_eq!(resolver.joined_values(&attribute), "Steel, Glass");
    }
}
