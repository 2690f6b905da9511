//! Error types surfaced by lookups and by the history cache.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    /// The upstream answered cleanly but has no such product.
    #[error("product {code} not found")]
    NotFound { code: String },

    /// Transport or parse failure talking to the upstream; safe to retry.
    #[error("failed to fetch product data: {0}")]
    FetchFailed(String),

    /// The durable store rejected a read or write. In-memory state is still current.
    #[error("failed to persist history: {0}")]
    PersistFailed(String),

    #[error("invalid barcode: {0}")]
    InvalidBarcode(String),
}

impl ScanError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScanError::NotFound { .. })
    }
}

impl From<reqwest::Error> for ScanError {
    fn from(e: reqwest::Error) -> Self {
        ScanError::FetchFailed(e.to_string())
    }
}
