use crate::error::PttError;
use crate::model::rules;
use serde::{Deserialize, Serialize};

/// Outcome of a barcode existence check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarcodeCheckResult {
    pub barcode: String,
    pub exists: bool,
    pub message: Option<String>,
}

/// Validated input list for a bulk barcode check. Construction fails before
/// any network call when the list is empty, contains a blank entry or
/// exceeds the upstream batch cap.
#[derive(Debug, Clone)]
pub struct BulkBarcodeCheck {
    barcodes: Vec<String>,
}

impl BulkBarcodeCheck {
    pub fn new(barcodes: Vec<String>) -> Result<Self, PttError> {
        if barcodes.is_empty() {
            return Err(PttError::Validation(
                "at least one barcode is required".to_string(),
            ));
        }
        if barcodes.iter().any(|b| b.trim().is_empty()) {
            return Err(PttError::Validation(
                "empty or whitespace-only barcodes are not allowed".to_string(),
            ));
        }
        if barcodes.len() > rules::MAX_BULK_ITEMS {
            return Err(PttError::Validation(format!(
                "maximum {} barcodes allowed per request",
                rules::MAX_BULK_ITEMS
            )));
        }
        Ok(BulkBarcodeCheck { barcodes })
    }

    pub fn barcodes(&self) -> &[String] {
        &self.barcodes
    }
}
