use prodex_core::ProductId;
use thiserror::Error;

/// Entity-level failures. None of these abort an extraction; the offending
/// entity is left out of the feed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("variation {id} references missing parent {parent_id}")]
    MissingParent { id: ProductId, parent_id: ProductId },
}
