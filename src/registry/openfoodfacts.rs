use reqwest::{Client, StatusCode};

use crate::error::ScanError;
use crate::normalizer::{parse_payload, RawPayload};

pub const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org";

pub fn product_url(base_url: &str, barcode: &str) -> String {
    format!(
        "{}/api/v0/product/{}.json",
        base_url.trim_end_matches('/'),
        barcode
    )
}

/// Fetch the raw product record for a barcode from Open Food Facts.
///
/// A 404 is reported as [`ScanError::NotFound`]; any other non-success status,
/// transport error or undecodable body is [`ScanError::FetchFailed`].
pub async fn fetch_product(
    client: &Client,
    base_url: &str,
    barcode: &str,
) -> Result<RawPayload, ScanError> {
    let url = product_url(base_url, barcode);
    tracing::debug!(%url, "fetching product");

    let response = client
        .get(&url)
        .header(
            "User-Agent",
            concat!("food-checkr/", env!("CARGO_PKG_VERSION")),
        )
        .header("Accept", "application/json")
        .send()
        .await?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ScanError::NotFound {
            code: barcode.to_string(),
        });
    }
    if !status.is_success() {
        return Err(ScanError::FetchFailed(format!(
            "API request failed with status {}",
            status
        )));
    }

    let body = response.bytes().await?;
    parse_payload(&body)
}
