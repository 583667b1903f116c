use crate::error::PttError;
use crate::model::barcode::BulkBarcodeCheck;
use crate::model::rules;
use crate::model::{BarcodeCheckResult, Product, ProductUpdateRequest};
use crate::soap::find_child;
use crate::transport::{Params, Transport};
use serde_json::{json, Value};

const BARCODE_CHECK_OPERATION: &str = "BarkodKontrol";
const BULK_BARCODE_CHECK_OPERATION: &str = "TopluBarkodKontrol";
const ACTIVATION_OPERATION: &str = "AktifYap";
const PRODUCT_UPDATE_OPERATION: &str = "StokGuncelleV2";
const BULK_PRODUCT_UPDATE_OPERATION: &str = "TopluStokGuncelleV2";

pub struct ProductService<T> {
    transport: T,
}

impl<T: Transport> ProductService<T> {
    pub fn new(transport: T) -> Self {
        ProductService { transport }
    }

    /// Check whether a barcode exists upstream.
    pub fn check_barcode(&self, barcode: &str) -> Result<BarcodeCheckResult, PttError> {
        let trimmed = barcode.trim();
        if trimmed.is_empty() {
            return Err(PttError::Validation(
                "barcode must not be empty or whitespace".to_string(),
            ));
        }

        let mut params = Params::new();
        params.insert("Barkod".to_string(), json!(trimmed));

        let response = self
            .transport
            .call(BARCODE_CHECK_OPERATION, params)
            .map_err(|e| PttError::Barcode(format!("failed to check {trimmed}: {e}")))?;

        Ok(decode_check_entry(trimmed, Some(&response)))
    }

    /// Fetch the full catalog record behind a barcode. `Ok(None)` when the
    /// barcode is unknown; parsing is lenient.
    pub fn get_product(&self, barcode: &str) -> Result<Option<Product>, PttError> {
        let trimmed = barcode.trim();
        if trimmed.is_empty() {
            return Err(PttError::Validation(
                "barcode must not be empty or whitespace".to_string(),
            ));
        }

        let mut params = Params::new();
        params.insert("Barkod".to_string(), json!(trimmed));

        let response = self
            .transport
            .call(BARCODE_CHECK_OPERATION, params)
            .map_err(|e| PttError::Barcode(format!("failed to check {trimmed}: {e}")))?;

        if response.is_null() {
            return Ok(None);
        }
        Ok(Some(Product::from_response(&response)))
    }

    /// Check up to 100 barcodes in one batched call. Every input barcode is
    /// echoed in the result, in input order, defaulting to `exists = false`
    /// when the response carries no entry for it.
    pub fn check_barcodes_bulk(
        &self,
        barcodes: &[String],
    ) -> Result<Vec<BarcodeCheckResult>, PttError> {
        let batch = BulkBarcodeCheck::new(barcodes.to_vec())?;

        let mut params = Params::new();
        params.insert(
            "BarkodListesi".to_string(),
            json!({"Barkod": batch.barcodes()}),
        );

        let response = self
            .transport
            .call(BULK_BARCODE_CHECK_OPERATION, params)
            .map_err(|e| PttError::Barcode(format!("bulk barcode check failed: {e}")))?;

        Ok(batch
            .barcodes()
            .iter()
            .map(|barcode| decode_check_entry(barcode, find_child(&response, barcode)))
            .collect())
    }

    /// Toggle a product's active flag. Success is any non-empty transport
    /// result; the upstream payload carries no explicit success flag.
    pub fn activate_product(&self, product_id: i64, is_active: bool) -> Result<bool, PttError> {
        if product_id <= 0 {
            return Err(PttError::RequiredField(
                "valid product id (UrunId)".to_string(),
            ));
        }

        let mut params = Params::new();
        params.insert("UrunId".to_string(), json!(product_id));
        params.insert("Aktif".to_string(), json!(is_active));

        let response = self
            .transport
            .call(ACTIVATION_OPERATION, params)
            .map_err(|e| {
                PttError::ProductUpdate(format!("failed to toggle product {product_id}: {e}"))
            })?;
        Ok(!response.is_null())
    }

    /// Apply one validated product update.
    pub fn update_product(&self, request: &ProductUpdateRequest) -> Result<bool, PttError> {
        let response = self
            .transport
            .call(PRODUCT_UPDATE_OPERATION, request.to_params())
            .map_err(|e| {
                PttError::ProductUpdate(format!("failed to update {}: {e}", request.barcode))
            })?;
        Ok(!response.is_null())
    }

    /// Apply up to 100 product updates in one call. The batch cap is
    /// enforced before any network activity.
    pub fn update_products_bulk(
        &self,
        requests: &[ProductUpdateRequest],
    ) -> Result<bool, PttError> {
        if requests.is_empty() {
            return Err(PttError::Validation(
                "at least one product update is required".to_string(),
            ));
        }
        if requests.len() > rules::MAX_BULK_ITEMS {
            return Err(PttError::Validation(format!(
                "at most {} product updates allowed per request",
                rules::MAX_BULK_ITEMS
            )));
        }

        let items: Vec<Value> = requests
            .iter()
            .map(|r| Value::Object(r.to_params()))
            .collect();
        let mut params = Params::new();
        params.insert("UrunListesi".to_string(), json!({"Urun": items}));

        let response = self
            .transport
            .call(BULK_PRODUCT_UPDATE_OPERATION, params)
            .map_err(|e| PttError::ProductUpdate(format!("bulk update failed: {e}")))?;
        Ok(!response.is_null())
    }
}

/// Map one response entry onto a check result. `None` or null means the
/// barcode has no upstream record; an entry without an explicit success
/// flag counts as existing.
fn decode_check_entry(barcode: &str, entry: Option<&Value>) -> BarcodeCheckResult {
    let (exists, message) = match entry {
        None | Some(Value::Null) => (false, None),
        Some(Value::Bool(b)) => (*b, None),
        Some(Value::String(s)) => (s.eq_ignore_ascii_case("true"), None),
        Some(entry) => {
            let exists = match find_child(entry, "Success") {
                Some(Value::Bool(b)) => *b,
                Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
                _ => true,
            };
            let message = find_child(entry, "Message")
                .and_then(|m| m.as_str())
                .map(str::to_string);
            (exists, message)
        }
    };

    BarcodeCheckResult {
        barcode: barcode.to_string(),
        exists,
        message,
    }
}
