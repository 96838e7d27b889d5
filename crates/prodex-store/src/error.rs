use prodex_core::ProductId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read catalog snapshot {path}: {source}")]
    SnapshotIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog snapshot: {0}")]
    SnapshotParse(#[from] serde_yaml::Error),

    #[error("duplicate product id {0} in catalog snapshot")]
    DuplicateProduct(ProductId),

    #[error("variation {id} points at parent {parent_id}, which is not a variable product in the snapshot")]
    OrphanVariation { id: ProductId, parent_id: ProductId },

    #[error("product {id} is not a variation but has parent {parent_id}")]
    UnexpectedParent { id: ProductId, parent_id: ProductId },

    #[error("taxonomy {0:?} must carry the pa_ prefix")]
    InvalidTaxonomy(String),
}
