use crate::decode::{FieldMap, ParseMode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Catalog record returned by `BarkodKontrol`.
///
/// Parsing is lenient by design: every numeric field falls back to
/// zero/false when the source value is missing or malformed, so an omitted
/// upstream field never aborts a batch parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub barcode: String,
    pub product_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub product_code: Option<String>,
    pub product_url: Option<String>,
    pub weight: f64,
    pub is_active: bool,
    pub dimension_x: i64,
    pub dimension_y: i64,
    pub dimension_z: i64,
    pub desi: f64,
    pub status: String,
    pub warranty_period: i64,
    pub warranty_company: String,
    pub gtin: String,
    pub discount: f64,
    pub vat_rate: f64,
    pub price_with_vat: f64,
    pub price_without_vat: f64,
    pub cargo_profile_id: i64,
    pub is_available: bool,
    pub stock_quantity: i64,
    pub shop_id: i64,
    pub single_box: i64,
    pub tag: String,
    pub shipping_period: i64,
    pub category_id: String,
}

impl Product {
    pub fn from_response(response: &Value) -> Self {
        let fields = FieldMap::new(response, ParseMode::Lenient);

        // Numeric reads cannot fail in lenient mode.
        Product {
            barcode: fields.string("a:Barkod"),
            product_id: fields.i64("a:UrunId").unwrap_or_default(),
            name: fields.string("a:UrunAdi"),
            description: fields.opt_string("a:Aciklama"),
            long_description: fields.opt_string("a:UzunAciklama"),
            product_code: fields.opt_string("a:UrunKodu"),
            product_url: fields.opt_string("a:UrunUrl"),
            weight: fields.f64("a:Agirlik").unwrap_or_default(),
            is_active: fields.bool("a:Aktif"),
            dimension_x: fields.i64("a:BoyX").unwrap_or_default(),
            dimension_y: fields.i64("a:BoyY").unwrap_or_default(),
            dimension_z: fields.i64("a:BoyZ").unwrap_or_default(),
            desi: fields.f64("a:Desi").unwrap_or_default(),
            status: fields.string("a:Durum"),
            warranty_period: fields.i64("a:GarantiSuresi").unwrap_or_default(),
            warranty_company: fields.string("a:GarantiVerenFirma"),
            gtin: fields.string("a:Gtin"),
            discount: fields.f64("a:Iskonto").unwrap_or_default(),
            vat_rate: fields.f64("a:KDVOran").unwrap_or_default(),
            price_with_vat: fields.f64("a:KDVli").unwrap_or_default(),
            price_without_vat: fields.f64("a:KDVsiz").unwrap_or_default(),
            cargo_profile_id: fields.i64("a:KargoProfilId").unwrap_or_default(),
            is_available: fields.bool("a:Mevcut"),
            stock_quantity: fields.i64("a:Miktar").unwrap_or_default(),
            shop_id: fields.i64("a:ShopId").unwrap_or_default(),
            single_box: fields.i64("a:SingleBox").unwrap_or_default(),
            tag: fields.string("a:Tag"),
            shipping_period: fields.i64("a:TahminiKargoSuresi").unwrap_or_default(),
            category_id: match fields.opt_string("a:YeniKategoriId") {
                Some(id) => id,
                None => "0".to_string(),
            },
        }
    }
}
