//! Read-only catalog store abstraction and its in-memory implementation.

pub mod error;
pub mod memory;
pub mod snapshot;
pub mod store;

pub use error::StoreError;
pub use memory::InMemoryCatalog;
pub use snapshot::{load_snapshot, parse_snapshot, CatalogSnapshot};
pub use store::{CatalogQuery, CatalogStore, PostTypes, QueryPage, SortOrder, StoreInfo};
