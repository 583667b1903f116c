//! Client library for the PTT AVM marketplace SOAP API.
//!
//! The facade [`PttClient`] covers the full operation surface: category
//! lookup, single/paged/full stock retrieval, barcode checks, product
//! activation, product and stock/price updates and version probing. Every
//! call is synchronous and blocking; nothing is retried at this layer.
//!
//! ```no_run
//! use pttavm::{ClientConfig, PttClient};
//!
//! let client = PttClient::new(ClientConfig::new("user", "pass"))?;
//! let count = client.get_stock_count()?;
//! println!("{count} stock records");
//! # Ok::<(), pttavm::PttError>(())
//! ```

pub mod config;
pub mod decode;
pub mod error;
pub mod model;
pub mod service;
mod soap;
pub mod transport;

pub use config::ClientConfig;
pub use error::{PttError, TransportError};
pub use model::{
    BarcodeCheckResult, Category, Product, ProductImage, ProductPart, ProductUpdateRequest,
    Stock, StockPriceUpdateRequest, Variant, VariantAttribute,
};
pub use transport::{Params, SoapTransport, Transport};

use service::{CategoryService, ProductService, StockService, VersionService};

/// Entry point owning one transport and exposing every service operation.
///
/// Services take their transport handle at construction; there is no global
/// state and no lazy wiring. Use [`PttClient::with_transport`] to inject a
/// custom (or mock) transport.
pub struct PttClient<T: Transport = SoapTransport> {
    transport: T,
}

impl PttClient<SoapTransport> {
    pub fn new(config: ClientConfig) -> Result<Self, PttError> {
        config.validate()?;
        let transport = SoapTransport::new(config)?;
        Ok(PttClient { transport })
    }
}

impl<T: Transport> PttClient<T> {
    pub fn with_transport(transport: T) -> Self {
        PttClient { transport }
    }

    pub fn category_service(&self) -> CategoryService<&T> {
        CategoryService::new(&self.transport)
    }

    pub fn stock_service(&self) -> StockService<&T> {
        StockService::new(&self.transport)
    }

    pub fn product_service(&self) -> ProductService<&T> {
        ProductService::new(&self.transport)
    }

    pub fn version_service(&self) -> VersionService<&T> {
        VersionService::new(&self.transport)
    }

    // Category operations

    pub fn get_category(&self, category_id: &str) -> Result<Option<Category>, PttError> {
        self.category_service().get_category(category_id)
    }

    // Stock operations

    pub fn get_stock(&self, barcode: &str) -> Result<Option<Stock>, PttError> {
        self.stock_service().get_single_stock(barcode)
    }

    pub fn get_stocks(&self, page: u32) -> Result<Vec<Stock>, PttError> {
        self.stock_service().get_stock_list(page)
    }

    pub fn get_all_stocks(&self) -> Result<Vec<Stock>, PttError> {
        self.stock_service().get_all_stocks()
    }

    pub fn get_all_stocks_with_progress<F>(&self, progress: F) -> Result<Vec<Stock>, PttError>
    where
        F: FnMut(&[Stock], usize, usize),
    {
        self.stock_service().get_all_stocks_with_progress(progress)
    }

    pub fn get_stock_count(&self) -> Result<usize, PttError> {
        self.stock_service().get_total_stock_count()
    }

    pub fn update_stock_price(&self, update: &StockPriceUpdateRequest) -> Result<bool, PttError> {
        self.stock_service().update_stock_price(update)
    }

    pub fn update_stock_prices_bulk(
        &self,
        updates: &[StockPriceUpdateRequest],
    ) -> Result<bool, PttError> {
        self.stock_service().update_stock_prices_bulk(updates)
    }

    // Product operations

    pub fn check_barcode(&self, barcode: &str) -> Result<BarcodeCheckResult, PttError> {
        self.product_service().check_barcode(barcode)
    }

    pub fn check_barcodes_bulk(
        &self,
        barcodes: &[String],
    ) -> Result<Vec<BarcodeCheckResult>, PttError> {
        self.product_service().check_barcodes_bulk(barcodes)
    }

    pub fn get_product(&self, barcode: &str) -> Result<Option<Product>, PttError> {
        self.product_service().get_product(barcode)
    }

    pub fn activate_product(&self, product_id: i64, is_active: bool) -> Result<bool, PttError> {
        self.product_service().activate_product(product_id, is_active)
    }

    pub fn update_product(&self, request: &ProductUpdateRequest) -> Result<bool, PttError> {
        self.product_service().update_product(request)
    }

    pub fn update_products_bulk(
        &self,
        requests: &[ProductUpdateRequest],
    ) -> Result<bool, PttError> {
        self.product_service().update_products_bulk(requests)
    }

    // Version operations

    pub fn get_version(&self) -> Result<String, PttError> {
        self.version_service().get_version()
    }
}
