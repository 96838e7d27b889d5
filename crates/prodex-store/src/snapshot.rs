//! YAML catalog snapshots used to hydrate [`crate::InMemoryCatalog`].

use std::collections::HashSet;
use std::path::Path;

use prodex_core::{MediaId, ProductId, ProductKind, RawProduct, TermId, TAXONOMY_PREFIX};
use serde::Deserialize;

use crate::StoreError;

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub platform_version: String,
    #[serde(default)]
    pub engine_version: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub taxonomies: Vec<Taxonomy>,
    #[serde(default)]
    pub media: Vec<Media>,
    #[serde(default)]
    pub products: Vec<RawProduct>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: TermId,
    pub name: String,
}

/// A `pa_` attribute taxonomy and its terms.
#[derive(Debug, Clone, Deserialize)]
pub struct Taxonomy {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub terms: Vec<Term>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Term {
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Media {
    pub id: MediaId,
    pub url: String,
}

/// Load and validate a catalog snapshot from a YAML file.
///
/// # Errors
///
/// Returns [`StoreError`] if the file cannot be read, parsed, or fails validation.
pub fn load_snapshot(path: &Path) -> Result<CatalogSnapshot, StoreError> {
    let content = std::fs::read_to_string(path).map_err(|e| StoreError::SnapshotIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_snapshot(&content)
}

/// Parse and validate a catalog snapshot from YAML text.
///
/// # Errors
///
/// Returns [`StoreError::SnapshotParse`] for malformed YAML and one of the
/// validation variants when the product hierarchy is inconsistent.
pub fn parse_snapshot(content: &str) -> Result<CatalogSnapshot, StoreError> {
    let snapshot: CatalogSnapshot = serde_yaml::from_str(content)?;
    validate_snapshot(&snapshot)?;
    Ok(snapshot)
}

fn validate_snapshot(snapshot: &CatalogSnapshot) -> Result<(), StoreError> {
    if let Some(taxonomy) = snapshot
        .taxonomies
        .iter()
        .find(|t| !t.name.starts_with(TAXONOMY_PREFIX))
    {
        return Err(StoreError::InvalidTaxonomy(taxonomy.name.clone()));
    }

    let mut seen: HashSet<ProductId> = HashSet::new();
    for product in &snapshot.products {
        if !seen.insert(product.id) {
            return Err(StoreError::DuplicateProduct(product.id));
        }
    }

    let variable: HashSet<ProductId> = snapshot
        .products
        .iter()
        .filter(|p| p.kind == ProductKind::Variable)
        .map(|p| p.id)
        .collect();

    for product in &snapshot.products {
        if product.is_variation() {
            if !variable.contains(&product.parent_id) {
                return Err(StoreError::OrphanVariation {
                    id: product.id,
                    parent_id: product.parent_id,
                });
            }
        } else if product.parent_id != 0 {
            return Err(StoreError::UnexpectedParent {
                id: product.id,
                parent_id: product.parent_id,
            });
        }
    }

    Ok(())
}
