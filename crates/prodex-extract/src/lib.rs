//! Flattening of hierarchical catalog products into aggregator feed records.
//!
//! The pipeline runs leaf-first: [`resolve`] turns raw attribute keys and
//! values into display pairs, [`pricing`] settles the price of variable
//! products, [`flatten`] composes both into one [`prodex_core::CatalogItem`]
//! per sellable unit, and [`extract`] drives the store queries for the three
//! request modes.

pub mod error;
pub mod extract;
pub mod flatten;
pub mod params;
pub mod pricing;
pub mod resolve;

pub use error::ExtractError;
pub use extract::{metadata, Envelope, Extraction, Extractor};
pub use flatten::Flattener;
pub use params::{ExtractRequest, PageRequest, RawParams};
pub use pricing::{resolve_variable_price, ResolvedPrice, VariablePricing};
pub use resolve::AttributeResolver;

#[cfg(test)]
mod test_support;
