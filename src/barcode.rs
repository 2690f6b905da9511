use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ScanError;

static BARCODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{8,14}$").unwrap());

/// Validate a manually entered barcode (EAN-8 through GTIN-14) and return it trimmed.
pub fn validate(raw: &str) -> Result<String, ScanError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ScanError::InvalidBarcode("please enter a barcode".to_string()));
    }
    if !BARCODE.is_match(trimmed) {
        return Err(ScanError::InvalidBarcode(format!(
            "'{}' must be 8 to 14 digits",
            trimmed
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_barcodes() {
        assert_eq!(validate("5449000000996").unwrap(), "5449000000996");
        assert_eq!(validate("  96385074 ").unwrap(), "96385074");
    }

    #[test]
    fn test_invalid_barcodes() {
        for raw in ["", "   ", "1234567", "123456789012345", "54490000abc96", "5449-0000-0996", "٠١٢٣٤٥٦٧", "１２３４５６７８"] {
            assert!(matches!(validate(raw), Err(ScanError::InvalidBarcode(_))), "{raw}");
        }
    }
}
