pub mod barcode;
pub mod category;
pub mod product;
pub mod rules;
pub mod stock;
pub mod update;
pub mod variant;

pub use barcode::BarcodeCheckResult;
pub use category::Category;
pub use product::Product;
pub use stock::{Stock, StockDimensions, StockPrice, StockProductSummary, StockWarranty};
pub use update::{ProductImage, ProductPart, ProductUpdateRequest, StockPriceUpdateRequest};
pub use variant::{Variant, VariantAttribute};
