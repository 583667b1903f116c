use crate::decode::{FieldMap, ParseMode};
use crate::error::PttError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockWarranty {
    pub period: i64,
    pub company: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockDimensions {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockPrice {
    pub discount: f64,
    pub vat_rate: f64,
    pub with_vat: f64,
    pub without_vat: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockProductSummary {
    pub name: String,
    pub id: i64,
    pub code: Option<String>,
    pub url: Option<String>,
    pub long_description: Option<String>,
}

/// One row of the `StokKontrolListesi` result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stock {
    pub barcode: Option<String>,
    pub description: Option<String>,
    pub weight: f64,
    pub is_active: bool,
    pub dimensions: StockDimensions,
    pub desi: f64,
    pub status: Option<String>,
    pub warranty: StockWarranty,
    pub gtin: Option<String>,
    pub price: StockPrice,
    pub cargo_profile_id: i64,
    pub is_available: bool,
    pub quantity: i64,
    pub shop_id: i64,
    pub is_single_box: bool,
    pub product: StockProductSummary,
    pub category_id: i64,
}

impl Stock {
    /// Decode one record with strict scalar coercion. List callers drop a
    /// failing record and continue; the single-record path propagates the
    /// error instead (found-but-unparsable is fatal there, unlike not-found).
    pub fn from_response(record: &Value) -> Result<Self, PttError> {
        let fields = FieldMap::new(record, ParseMode::Strict);

        Ok(Stock {
            barcode: fields.opt_string("a:Barkod"),
            description: fields.opt_string("a:Aciklama"),
            weight: fields.f64("a:Agirlik")?,
            is_active: fields.bool("a:Aktif"),
            dimensions: StockDimensions {
                x: fields.f64("a:BoyX")?,
                y: fields.f64("a:BoyY")?,
                z: fields.f64("a:BoyZ")?,
            },
            desi: fields.f64("a:Desi")?,
            status: fields.opt_string("a:Durum"),
            warranty: StockWarranty {
                period: fields.i64("a:GarantiSuresi")?,
                company: fields.opt_string("a:GarantiVerenFirma"),
            },
            gtin: fields.opt_string("a:Gtin"),
            price: StockPrice {
                discount: fields.f64("a:Iskonto")?,
                vat_rate: fields.f64("a:KDVOran")?,
                with_vat: fields.f64("a:KDVli")?,
                without_vat: fields.f64("a:KDVsiz")?,
            },
            cargo_profile_id: fields.i64("a:KargoProfilId")?,
            is_available: fields.bool("a:Mevcut"),
            quantity: fields.i64("a:Miktar")?,
            shop_id: fields.i64("a:ShopId")?,
            is_single_box: fields.bool("a:SingleBox"),
            product: StockProductSummary {
                name: fields.string("a:UrunAdi"),
                id: fields.i64("a:UrunId")?,
                code: fields.opt_string("a:UrunKodu"),
                url: fields.opt_string("a:UrunUrl"),
                long_description: fields.opt_string("a:UzunAciklama"),
            },
            category_id: fields.i64("a:YeniKategoriId")?,
        })
    }
}
