//! Upstream product lookups.
//!
//! [`openfoodfacts::fetch_product`] returns the raw payload; [`lookup`] adds
//! normalization so callers get a [`Product`] or a typed [`ScanError`].

pub mod openfoodfacts;

use reqwest::Client;

use crate::error::ScanError;
use crate::models::Product;
use crate::normalizer::normalize;
use crate::reference::ReferenceTables;

/// Fetch and normalize one barcode.
pub async fn lookup(
    client: &Client,
    base_url: &str,
    barcode: &str,
    tables: &ReferenceTables,
) -> Result<Product, ScanError> {
    let payload = openfoodfacts::fetch_product(client, base_url, barcode).await?;
    match normalize(payload, tables) {
        Err(ScanError::NotFound { .. }) => {
            tracing::info!(barcode, "product not found upstream");
            Err(ScanError::NotFound {
                code: barcode.to_string(),
            })
        }
        other => other,
    }
}
