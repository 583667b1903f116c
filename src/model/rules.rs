//! Upstream business limits and the pure derivation functions shared by the
//! update payloads.

use crate::error::PttError;
use crate::model::update::ProductImage;
use crate::model::variant::Variant;
use chrono::{Duration, NaiveDateTime, Utc};

pub const MAX_VARIANTS: usize = 100;
pub const MIN_STOCK: i64 = 0;
pub const MAX_STOCK: i64 = 9999;
pub const MAX_DESI: f64 = 300.0;
pub const MAX_WARRANTY_PERIOD: i64 = 240;
pub const MAX_SHIPPING_DAYS: i64 = 30;
pub const MAX_IMAGES: usize = 12;
pub const MAX_BULK_ITEMS: usize = 100;
pub const VALID_VAT_RATES: [f64; 4] = [0.0, 1.0, 10.0, 20.0];

/// Barcode updates are rejected upstream for five minutes after the previous
/// one.
const BARCODE_UPDATE_COOLDOWN_MINS: i64 = 5;

/// Desi is the greater of the volume-based and weight-based estimates.
/// Dimensions are in centimeters, weight in grams.
pub fn calculate_desi(dimensions: Option<(f64, f64, f64)>, weight_grams: Option<f64>) -> f64 {
    let from_volume = match dimensions {
        Some((x, y, z)) => (x * y * z) / 3000.0,
        None => 0.0,
    };
    let from_weight = match weight_grams {
        Some(weight) => weight / 1000.0,
        None => 0.0,
    };
    from_volume.max(from_weight)
}

/// `price * (1 - discount/100)`. Applied once at request construction.
pub fn calculate_discounted_price(price: f64, discount: f64) -> f64 {
    price * (1.0 - discount / 100.0)
}

/// Out-of-range quantities are clamped, not rejected.
pub fn validate_stock_quantity(quantity: i64) -> i64 {
    quantity.clamp(MIN_STOCK, MAX_STOCK)
}

pub fn is_valid_vat_rate(vat_rate: f64) -> bool {
    VALID_VAT_RATES.contains(&vat_rate)
}

/// Combined variant quantity must stay within the stock ceiling.
pub fn variants_total_within_limit(variants: &[Variant]) -> bool {
    let total: i64 = variants.iter().map(|v| v.quantity).sum();
    total <= MAX_STOCK
}

/// At least one image is required; anything beyond the upstream cap is
/// silently truncated.
pub fn validate_images(images: &[ProductImage]) -> Result<&[ProductImage], PttError> {
    if images.is_empty() {
        return Err(PttError::Validation(
            "at least one product image is required".to_string(),
        ));
    }
    Ok(&images[..images.len().min(MAX_IMAGES)])
}

/// Upstream character limit for a named field, where one exists.
pub fn max_field_length(field: &str) -> Option<usize> {
    match field {
        "warranty_company" | "product_code" | "barcode" => Some(250),
        "product_name" => Some(120),
        "short_description" => Some(2500),
        "long_description" => Some(102_400),
        "part_no" | "part_comment" => Some(255),
        _ => None,
    }
}

pub fn field_length_ok(field: &str, value: &str) -> bool {
    match max_field_length(field) {
        Some(max) => value.chars().count() <= max,
        None => true,
    }
}

/// Barcode updates are throttled upstream; true once the cooldown has passed.
pub fn can_update_barcode(last_update: NaiveDateTime) -> bool {
    Utc::now().naive_utc() - last_update > Duration::minutes(BARCODE_UPDATE_COOLDOWN_MINS)
}
