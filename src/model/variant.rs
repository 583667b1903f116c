use crate::error::PttError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One attribute of a variant (e.g. color or size), optionally carrying a
/// price delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantAttribute {
    pub name: String,
    pub value: String,
    pub price: f64,
    pub is_price_difference: bool,
}

impl VariantAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self, PttError> {
        let name = name.into();
        let value = value.into();
        if name.is_empty() {
            return Err(PttError::RequiredField(
                "variant attribute name (Tanim)".to_string(),
            ));
        }
        if value.is_empty() {
            return Err(PttError::RequiredField(
                "variant attribute value (Deger)".to_string(),
            ));
        }
        Ok(VariantAttribute {
            name,
            value,
            price: 0.0,
            is_price_difference: false,
        })
    }

    /// Attach a price delta; `is_difference` marks it as relative rather than
    /// absolute.
    pub fn with_price(mut self, price: f64, is_difference: bool) -> Self {
        self.price = price;
        self.is_price_difference = is_difference;
        self
    }

    pub(crate) fn to_param(&self) -> Value {
        json!({
            "Tanim": self.name,
            "Deger": self.value,
            "Fiyat": self.price,
            "FiyatFarkiMi": self.is_price_difference,
        })
    }
}

/// A barcode-distinct sub-SKU of a product carrying its own quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub main_barcode: String,
    pub variant_barcode: String,
    pub quantity: i64,
    pub attributes: Vec<VariantAttribute>,
}

impl Variant {
    pub fn new(
        main_barcode: impl Into<String>,
        variant_barcode: impl Into<String>,
        quantity: i64,
        attributes: Vec<VariantAttribute>,
    ) -> Result<Self, PttError> {
        let main_barcode = main_barcode.into();
        let variant_barcode = variant_barcode.into();
        if main_barcode.is_empty() {
            return Err(PttError::RequiredField(
                "main barcode (AnaUrunKodu)".to_string(),
            ));
        }
        if variant_barcode.is_empty() {
            return Err(PttError::RequiredField(
                "variant barcode (VariantBarkod)".to_string(),
            ));
        }
        if quantity < 0 {
            return Err(PttError::Validation(
                "variant quantity (Miktar) cannot be negative".to_string(),
            ));
        }
        if attributes.is_empty() {
            return Err(PttError::RequiredField(
                "at least one variant attribute".to_string(),
            ));
        }
        Ok(Variant {
            main_barcode,
            variant_barcode,
            quantity,
            attributes,
        })
    }

    pub(crate) fn to_param(&self) -> Value {
        json!({
            "AnaUrunKodu": self.main_barcode,
            "VariantBarkod": self.variant_barcode,
            "Miktar": self.quantity,
            "Attributes": {
                "VariantAttribute": self.attributes.iter().map(|a| a.to_param()).collect::<Vec<_>>(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attribute() -> VariantAttribute {
        VariantAttribute::new("Renk", "Kirmizi").unwrap()
    }

    #[test]
    fn attribute_requires_name_and_value() {
        assert!(matches!(
            VariantAttribute::new("", "Kirmizi"),
            Err(PttError::RequiredField(_))
        ));
        assert!(matches!(
            VariantAttribute::new("Renk", ""),
            Err(PttError::RequiredField(_))
        ));
    }

    #[test]
    fn attribute_price_defaults_to_zero() {
        let attr = attribute();
        assert_eq!(attr.price, 0.0);
        assert!(!attr.is_price_difference);

        let priced = attr.with_price(30.0, true);
        assert_eq!(priced.price, 30.0);
        assert!(priced.is_price_difference);
    }

    #[test]
    fn variant_requires_all_fields() {
        assert!(Variant::new("", "v", 1, vec![attribute()]).is_err());
        assert!(Variant::new("m", "", 1, vec![attribute()]).is_err());
        assert!(Variant::new("m", "v", 1, vec![]).is_err());
        assert!(matches!(
            Variant::new("m", "v", -1, vec![attribute()]),
            Err(PttError::Validation(_))
        ));
        assert!(Variant::new("m", "v", 0, vec![attribute()]).is_ok());
    }

    #[test]
    fn variant_serializes_with_upstream_field_names() {
        let variant = Variant::new("main-1", "main-1-red", 4, vec![attribute()]).unwrap();
        let param = variant.to_param();
        assert_eq!(param["AnaUrunKodu"], "main-1");
        assert_eq!(param["Miktar"], 4);
        assert_eq!(param["Attributes"]["VariantAttribute"][0]["Tanim"], "Renk");
    }
}
