//! Station lookup error types.

use std::sync::Arc;

use crate::source::SourceError;

/// Errors from station lookups and matching.
///
/// Source errors are shared: every caller waiting on the same collection
/// fetch receives the same error value.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StationsError {
    /// The full station collection could not be loaded
    #[error("failed to load station collection: {0}")]
    Collection(Arc<SourceError>),

    /// A structured query to the remote source failed
    #[error("remote station query failed: {0}")]
    Query(Arc<SourceError>),
}
