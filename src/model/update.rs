//! Outbound update payloads. Every request validates all of its fields at
//! construction and is immutable afterwards; a validation failure never
//! leaves a partially-constructed request behind.

use crate::error::PttError;
use crate::model::rules;
use crate::model::variant::Variant;
use crate::transport::Params;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Stock and price update for one barcode (`StokFiyatGuncelle`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockPriceUpdateRequest {
    pub barcode: String,
    pub price_without_vat: f64,
    pub vat_rate: f64,
    pub is_active: bool,
    pub discount: f64,
    pub price_with_vat: f64,
    pub quantity: i64,
    pub category_id: i64,
    pub variants: Vec<Variant>,
}

impl StockPriceUpdateRequest {
    pub fn builder(
        barcode: impl Into<String>,
        price_without_vat: f64,
        vat_rate: f64,
    ) -> StockPriceUpdateBuilder {
        StockPriceUpdateBuilder {
            barcode: barcode.into(),
            price_without_vat,
            vat_rate,
            is_active: true,
            discount: 0.0,
            price_with_vat: 0.0,
            quantity: 0,
            category_id: 0,
            variants: Vec::new(),
        }
    }

    /// `price_without_vat * (1 + vat_rate/100)`, for callers that leave
    /// `price_with_vat` unset.
    pub fn price_with_vat_derived(&self) -> f64 {
        self.price_without_vat * (1.0 + self.vat_rate / 100.0)
    }

    /// True when every variant's main barcode matches the request barcode.
    pub fn variants_match_barcode(&self) -> bool {
        self.variants.iter().all(|v| v.main_barcode == self.barcode)
    }

    pub(crate) fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("Barkod".to_string(), json!(self.barcode));
        params.insert("KDVsiz".to_string(), json!(self.price_without_vat));
        params.insert("KDVOran".to_string(), json!(self.vat_rate));
        params.insert("Aktif".to_string(), json!(self.is_active));
        params.insert("Iskonto".to_string(), json!(self.discount));
        params.insert("KDVli".to_string(), json!(self.price_with_vat));
        params.insert("Miktar".to_string(), json!(self.quantity));
        params.insert("YeniKategoriId".to_string(), json!(self.category_id));
        if !self.variants.is_empty() {
            let variants: Vec<Value> = self.variants.iter().map(|v| v.to_param()).collect();
            params.insert("VariantListesi".to_string(), json!({"Variant": variants}));
        }
        params
    }
}

pub struct StockPriceUpdateBuilder {
    barcode: String,
    price_without_vat: f64,
    vat_rate: f64,
    is_active: bool,
    discount: f64,
    price_with_vat: f64,
    quantity: i64,
    category_id: i64,
    variants: Vec<Variant>,
}

impl StockPriceUpdateBuilder {
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn price_with_vat(mut self, price_with_vat: f64) -> Self {
        self.price_with_vat = price_with_vat;
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn category_id(mut self, category_id: i64) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn variants(mut self, variants: Vec<Variant>) -> Self {
        self.variants = variants;
        self
    }

    /// Validate every field, apply the discount once and clamp the quantity.
    pub fn build(self) -> Result<StockPriceUpdateRequest, PttError> {
        if self.barcode.is_empty() {
            return Err(PttError::RequiredField("barcode (Barkod)".to_string()));
        }
        if !rules::field_length_ok("barcode", &self.barcode) {
            return Err(PttError::Validation(
                "barcode exceeds 250 characters".to_string(),
            ));
        }
        if self.price_without_vat <= 0.0 && self.price_with_vat <= 0.0 {
            return Err(PttError::Validation(
                "either price with VAT or price without VAT must be greater than zero".to_string(),
            ));
        }
        if !rules::is_valid_vat_rate(self.vat_rate) {
            return Err(PttError::Validation(format!(
                "invalid VAT rate {}; valid rates: {:?}",
                self.vat_rate,
                rules::VALID_VAT_RATES
            )));
        }
        if self.variants.len() > rules::MAX_VARIANTS {
            return Err(PttError::Validation(format!(
                "at most {} variants allowed",
                rules::MAX_VARIANTS
            )));
        }
        if !rules::variants_total_within_limit(&self.variants) {
            return Err(PttError::Validation(format!(
                "combined variant quantity exceeds {}",
                rules::MAX_STOCK
            )));
        }
        if self.category_id < 0 {
            return Err(PttError::Validation(
                "category id (YeniKategoriId) cannot be negative".to_string(),
            ));
        }

        let price_without_vat = if self.discount > 0.0 {
            rules::calculate_discounted_price(self.price_without_vat, self.discount)
        } else {
            self.price_without_vat
        };

        Ok(StockPriceUpdateRequest {
            barcode: self.barcode,
            price_without_vat,
            vat_rate: self.vat_rate,
            is_active: self.is_active,
            discount: self.discount,
            price_with_vat: self.price_with_vat,
            quantity: rules::validate_stock_quantity(self.quantity),
            category_id: self.category_id,
            variants: self.variants,
        })
    }
}

/// One product image with its display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    pub order: u32,
}

impl ProductImage {
    pub fn new(url: impl Into<String>, order: u32) -> Result<Self, PttError> {
        let url = url.into();
        if url.is_empty() {
            return Err(PttError::RequiredField("image URL".to_string()));
        }
        if order < 1 {
            return Err(PttError::Validation(
                "image order (Sira) must be a positive integer".to_string(),
            ));
        }
        Ok(ProductImage { url, order })
    }

    fn to_param(&self) -> Value {
        json!({"Url": self.url, "Sira": self.order})
    }
}

/// One shippable part of a multi-part product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPart {
    pub part_no: u32,
    pub desi: f64,
    pub comment: Option<String>,
}

impl ProductPart {
    pub fn new(part_no: u32, desi: f64) -> Result<Self, PttError> {
        if part_no < 1 {
            return Err(PttError::Validation(
                "part number must be a positive integer".to_string(),
            ));
        }
        if desi < 0.0 {
            return Err(PttError::Validation(
                "part desi cannot be negative".to_string(),
            ));
        }
        Ok(ProductPart {
            part_no,
            desi,
            comment: None,
        })
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    fn to_param(&self) -> Value {
        let mut part = serde_json::Map::new();
        part.insert("PartNo".to_string(), json!(self.part_no));
        part.insert("Desi".to_string(), json!(self.desi));
        if let Some(comment) = &self.comment {
            part.insert("Comment".to_string(), json!(comment));
        }
        Value::Object(part)
    }
}

/// Full product update (`StokGuncelleV2`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdateRequest {
    pub barcode: String,
    pub product_name: String,
    pub product_code: String,
    pub category_id: i64,
    pub description: String,
    pub admin_code: Option<String>,
    pub weight: f64,
    pub is_active: bool,
    pub subcategory_name: Option<String>,
    pub subcategory_id: i64,
    pub main_category_id: i64,
    pub dimensions: (f64, f64, f64),
    pub desi: f64,
    pub status: String,
    pub warranty_period: i64,
    pub warranty_company: Option<String>,
    pub gtin: Option<String>,
    pub is_admin: bool,
    pub discount: f64,
    pub vat_rate: f64,
    pub price_with_vat: f64,
    pub price_without_vat: f64,
    pub cargo_profile_id: i64,
    pub update_category_info: bool,
    pub is_available: bool,
    pub quantity: i64,
    pub parts: Vec<ProductPart>,
    pub sale_start_date: Option<NaiveDateTime>,
    pub sale_end_date: Option<NaiveDateTime>,
    pub shop_id: i64,
    pub is_single_box: bool,
    pub tag: Option<String>,
    pub estimated_shipping_time: i64,
    pub supplier_subcategory_name: Option<String>,
    pub supplier_subcategory_id: i64,
    pub supplier_virtual_category_id: i64,
    pub product_id: i64,
    pub images: Vec<ProductImage>,
    pub product_url: Option<String>,
    pub long_description: Option<String>,
    pub variants: Vec<Variant>,
}

impl ProductUpdateRequest {
    pub fn builder(
        barcode: impl Into<String>,
        product_name: impl Into<String>,
        product_code: impl Into<String>,
        category_id: i64,
    ) -> ProductUpdateBuilder {
        ProductUpdateBuilder {
            request: ProductUpdateRequest {
                barcode: barcode.into(),
                product_name: product_name.into(),
                product_code: product_code.into(),
                category_id,
                description: String::new(),
                admin_code: None,
                weight: 0.0,
                is_active: true,
                subcategory_name: None,
                subcategory_id: 0,
                main_category_id: 0,
                dimensions: (0.0, 0.0, 0.0),
                desi: 0.0,
                status: "Mevcut".to_string(),
                warranty_period: 0,
                warranty_company: None,
                gtin: None,
                is_admin: false,
                discount: 0.0,
                vat_rate: 0.0,
                price_with_vat: 0.0,
                price_without_vat: 0.0,
                cargo_profile_id: 0,
                update_category_info: false,
                is_available: true,
                quantity: 0,
                parts: Vec::new(),
                sale_start_date: None,
                sale_end_date: None,
                shop_id: 0,
                is_single_box: true,
                tag: None,
                estimated_shipping_time: 0,
                supplier_subcategory_name: None,
                supplier_subcategory_id: 0,
                supplier_virtual_category_id: 0,
                product_id: 0,
                images: Vec::new(),
                product_url: None,
                long_description: None,
                variants: Vec::new(),
            },
        }
    }

    /// Serialize into the transport parameter mapping. Absent optional
    /// fields are omitted from the payload entirely.
    pub(crate) fn to_params(&self) -> Params {
        let mut params = Params::new();
        let mut put = |key: &str, value: Value| {
            params.insert(key.to_string(), value);
        };

        put("Barkod", json!(self.barcode));
        put("UrunAdi", json!(self.product_name));
        put("UrunKodu", json!(self.product_code));
        put("YeniKategoriId", json!(self.category_id));
        put("Aciklama", json!(self.description));
        if let Some(admin_code) = &self.admin_code {
            put("AdminCode", json!(admin_code));
        }
        put("Agirlik", json!(self.weight));
        put("Aktif", json!(self.is_active));
        if let Some(name) = &self.subcategory_name {
            put("AltKategoriAdi", json!(name));
        }
        put("AltKategoriId", json!(self.subcategory_id));
        put("AnaKategoriId", json!(self.main_category_id));
        put("BoyX", json!(self.dimensions.0));
        put("BoyY", json!(self.dimensions.1));
        put("BoyZ", json!(self.dimensions.2));
        put("Desi", json!(self.desi));
        put("Durum", json!(self.status));
        put("GarantiSuresi", json!(self.warranty_period));
        if let Some(company) = &self.warranty_company {
            put("GarantiVerenFirma", json!(company));
        }
        if let Some(gtin) = &self.gtin {
            put("Gtin", json!(gtin));
        }
        put("IsAdmin", json!(self.is_admin));
        put("Iskonto", json!(self.discount));
        put("KDVOran", json!(self.vat_rate));
        put("KDVli", json!(self.price_with_vat));
        put("KDVsiz", json!(self.price_without_vat));
        put("KargoProfilId", json!(self.cargo_profile_id));
        put("KategoriBilgisiGuncelle", json!(self.update_category_info));
        put("Mevcut", json!(self.is_available));
        put("Miktar", json!(self.quantity));
        if !self.parts.is_empty() {
            let parts: Vec<Value> = self.parts.iter().map(|p| p.to_param()).collect();
            put("Parts", json!({"Part": parts}));
        }
        if let Some(start) = self.sale_start_date {
            put(
                "SatisBaslangicTarihi",
                json!(start.format(DATE_FORMAT).to_string()),
            );
        }
        if let Some(end) = self.sale_end_date {
            put(
                "SatisBitisTarihi",
                json!(end.format(DATE_FORMAT).to_string()),
            );
        }
        put("ShopId", json!(self.shop_id));
        put("SingleBox", json!(self.is_single_box));
        if let Some(tag) = &self.tag {
            put("Tag", json!(tag));
        }
        put("TahminiKargoSuresi", json!(self.estimated_shipping_time));
        if let Some(name) = &self.supplier_subcategory_name {
            put("TedarikciAltKategoriAdi", json!(name));
        }
        put("TedarikciAltKategoriId", json!(self.supplier_subcategory_id));
        put(
            "TedarikciSanalKategoriId",
            json!(self.supplier_virtual_category_id),
        );
        put("UrunId", json!(self.product_id));
        if !self.images.is_empty() {
            let images: Vec<Value> = self.images.iter().map(|i| i.to_param()).collect();
            put("UrunResimleri", json!({"UrunResmi": images}));
        }
        if let Some(url) = &self.product_url {
            put("UrunUrl", json!(url));
        }
        if let Some(long_description) = &self.long_description {
            put("UzunAciklama", json!(long_description));
        }
        if !self.variants.is_empty() {
            let variants: Vec<Value> = self.variants.iter().map(|v| v.to_param()).collect();
            put("VariantListesi", json!({"Variant": variants}));
        }
        params
    }
}

pub struct ProductUpdateBuilder {
    request: ProductUpdateRequest,
}

impl ProductUpdateBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.request.description = description.into();
        self
    }

    pub fn admin_code(mut self, admin_code: impl Into<String>) -> Self {
        self.request.admin_code = Some(admin_code.into());
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.request.weight = weight;
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.request.is_active = is_active;
        self
    }

    pub fn subcategory(mut self, name: impl Into<String>, id: i64) -> Self {
        self.request.subcategory_name = Some(name.into());
        self.request.subcategory_id = id;
        self
    }

    pub fn main_category_id(mut self, id: i64) -> Self {
        self.request.main_category_id = id;
        self
    }

    pub fn dimensions(mut self, x: f64, y: f64, z: f64) -> Self {
        self.request.dimensions = (x, y, z);
        self
    }

    pub fn desi(mut self, desi: f64) -> Self {
        self.request.desi = desi;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.request.status = status.into();
        self
    }

    pub fn warranty(mut self, period: i64, company: impl Into<String>) -> Self {
        self.request.warranty_period = period;
        self.request.warranty_company = Some(company.into());
        self
    }

    pub fn gtin(mut self, gtin: impl Into<String>) -> Self {
        self.request.gtin = Some(gtin.into());
        self
    }

    pub fn is_admin(mut self, is_admin: bool) -> Self {
        self.request.is_admin = is_admin;
        self
    }

    pub fn discount(mut self, discount: f64) -> Self {
        self.request.discount = discount;
        self
    }

    pub fn vat_rate(mut self, vat_rate: f64) -> Self {
        self.request.vat_rate = vat_rate;
        self
    }

    pub fn price_with_vat(mut self, price: f64) -> Self {
        self.request.price_with_vat = price;
        self
    }

    pub fn price_without_vat(mut self, price: f64) -> Self {
        self.request.price_without_vat = price;
        self
    }

    pub fn cargo_profile_id(mut self, id: i64) -> Self {
        self.request.cargo_profile_id = id;
        self
    }

    pub fn update_category_info(mut self, update: bool) -> Self {
        self.request.update_category_info = update;
        self
    }

    pub fn is_available(mut self, is_available: bool) -> Self {
        self.request.is_available = is_available;
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.request.quantity = quantity;
        self
    }

    pub fn parts(mut self, parts: Vec<ProductPart>) -> Self {
        self.request.parts = parts;
        self
    }

    pub fn sale_window(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.request.sale_start_date = Some(start);
        self.request.sale_end_date = Some(end);
        self
    }

    pub fn shop_id(mut self, shop_id: i64) -> Self {
        self.request.shop_id = shop_id;
        self
    }

    pub fn is_single_box(mut self, is_single_box: bool) -> Self {
        self.request.is_single_box = is_single_box;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.request.tag = Some(tag.into());
        self
    }

    pub fn estimated_shipping_time(mut self, days: i64) -> Self {
        self.request.estimated_shipping_time = days;
        self
    }

    pub fn supplier_subcategory(mut self, name: impl Into<String>, id: i64) -> Self {
        self.request.supplier_subcategory_name = Some(name.into());
        self.request.supplier_subcategory_id = id;
        self
    }

    pub fn supplier_virtual_category_id(mut self, id: i64) -> Self {
        self.request.supplier_virtual_category_id = id;
        self
    }

    pub fn product_id(mut self, product_id: i64) -> Self {
        self.request.product_id = product_id;
        self
    }

    pub fn images(mut self, images: Vec<ProductImage>) -> Self {
        self.request.images = images;
        self
    }

    pub fn product_url(mut self, url: impl Into<String>) -> Self {
        self.request.product_url = Some(url.into());
        self
    }

    pub fn long_description(mut self, text: impl Into<String>) -> Self {
        self.request.long_description = Some(text.into());
        self
    }

    pub fn variants(mut self, variants: Vec<Variant>) -> Self {
        self.request.variants = variants;
        self
    }

    pub fn build(self) -> Result<ProductUpdateRequest, PttError> {
        let request = self.request;

        if request.barcode.is_empty() {
            return Err(PttError::RequiredField("barcode (Barkod)".to_string()));
        }
        if request.product_name.is_empty() {
            return Err(PttError::RequiredField(
                "product name (UrunAdi)".to_string(),
            ));
        }
        if request.product_code.is_empty() {
            return Err(PttError::RequiredField(
                "product code (UrunKodu)".to_string(),
            ));
        }
        if request.category_id <= 0 {
            return Err(PttError::RequiredField(
                "valid category id (YeniKategoriId)".to_string(),
            ));
        }
        if !rules::field_length_ok("barcode", &request.barcode) {
            return Err(PttError::Validation(
                "barcode exceeds 250 characters".to_string(),
            ));
        }
        if !rules::field_length_ok("product_name", &request.product_name) {
            return Err(PttError::Validation(
                "product name exceeds 120 characters".to_string(),
            ));
        }
        if !rules::field_length_ok("product_code", &request.product_code) {
            return Err(PttError::Validation(
                "product code exceeds 250 characters".to_string(),
            ));
        }
        if request.weight < 0.0 {
            return Err(PttError::Validation("weight cannot be negative".to_string()));
        }
        if request.desi < 0.0 {
            return Err(PttError::Validation("desi cannot be negative".to_string()));
        }
        if request.warranty_period < 0 {
            return Err(PttError::Validation(
                "warranty period cannot be negative".to_string(),
            ));
        }
        if request.discount < 0.0 {
            return Err(PttError::Validation(
                "discount cannot be negative".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&request.vat_rate) {
            return Err(PttError::Validation(
                "VAT rate must be between 0 and 100".to_string(),
            ));
        }
        if request.price_without_vat < 0.0 {
            return Err(PttError::Validation(
                "price without VAT cannot be negative".to_string(),
            ));
        }
        if request.quantity < 0 {
            return Err(PttError::Validation(
                "quantity cannot be negative".to_string(),
            ));
        }
        if request.estimated_shipping_time < 0 {
            return Err(PttError::Validation(
                "estimated shipping time cannot be negative".to_string(),
            ));
        }
        if request.images.len() > rules::MAX_IMAGES {
            return Err(PttError::Validation(format!(
                "at most {} product images allowed",
                rules::MAX_IMAGES
            )));
        }

        Ok(request)
    }
}
