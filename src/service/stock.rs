use crate::decode::normalize_to_sequence;
use crate::error::PttError;
use crate::model::rules;
use crate::model::{Stock, StockPriceUpdateRequest};
use crate::transport::{Params, Transport};
use serde_json::{json, Value};

/// Fixed page size of `StokKontrolListesi`. The upstream service controls
/// it; this client only observes it to detect the last page.
pub const ITEMS_PER_PAGE: usize = 1000;

const STOCK_LIST_OPERATION: &str = "StokKontrolListesi";
const STOCK_UPDATE_OPERATION: &str = "StokFiyatGuncelle";
const BULK_STOCK_UPDATE_OPERATION: &str = "TopluStokFiyatGuncelle";

pub struct StockService<T> {
    transport: T,
}

impl<T: Transport> StockService<T> {
    pub fn new(transport: T) -> Self {
        StockService { transport }
    }

    /// Fetch the stock record for one barcode.
    ///
    /// Returns `Ok(None)` when the barcode is unknown. A record that is
    /// present but unparsable is an error here, unlike in the list path.
    pub fn get_single_stock(&self, barcode: &str) -> Result<Option<Stock>, PttError> {
        let mut params = Params::new();
        params.insert("Barkod".to_string(), json!(barcode));

        let response = self
            .transport
            .call(STOCK_LIST_OPERATION, params)
            .map_err(|e| PttError::Stock(format!("failed to fetch stock for {barcode}: {e}")))?;

        let record = match response.get("a:StokKontrolDetay") {
            Some(Value::Null) | None => return Ok(None),
            Some(record) => record.clone(),
        };

        let stock = Stock::from_response(&record)
            .map_err(|e| PttError::Stock(format!("failed to parse stock for {barcode}: {e}")))?;
        Ok(Some(stock))
    }

    /// Fetch one page of stock records. A record that fails to parse is
    /// dropped from the result and logged; the page itself never fails for
    /// a single bad record.
    pub fn get_stock_list(&self, page: u32) -> Result<Vec<Stock>, PttError> {
        let mut params = Params::new();
        params.insert("SearchPage".to_string(), json!(page));

        let response = self
            .transport
            .call(STOCK_LIST_OPERATION, params)
            .map_err(|e| PttError::Stock(format!("failed to fetch stock page {page}: {e}")))?;

        if response.is_null() {
            return Ok(Vec::new());
        }

        let records = normalize_to_sequence(response.get("a:StokKontrolDetay"));
        let mut stocks = Vec::with_capacity(records.len());
        for record in records {
            match Stock::from_response(record) {
                Ok(stock) => stocks.push(stock),
                Err(e) => tracing::warn!("dropping unparsable stock record on page {page}: {e}"),
            }
        }
        Ok(stocks)
    }

    /// Count all stock records by walking pages until an empty page or a
    /// short page. All-or-nothing: a failure on any page aborts the count.
    pub fn get_total_stock_count(&self) -> Result<usize, PttError> {
        let mut total = 0;
        let mut page = 0;

        loop {
            let stocks = self.get_stock_list(page)?;
            if stocks.is_empty() {
                break;
            }
            total += stocks.len();
            if stocks.len() < ITEMS_PER_PAGE {
                break;
            }
            page += 1;
        }
        Ok(total)
    }

    /// Fetch the complete stock list. See
    /// [`get_all_stocks_with_progress`](Self::get_all_stocks_with_progress).
    pub fn get_all_stocks(&self) -> Result<Vec<Stock>, PttError> {
        self.get_all_stocks_with_progress(|_, _, _| {})
    }

    /// Fetch the complete stock list, invoking `progress` once per fetched
    /// non-empty page with the page's records, the 1-indexed page number and
    /// the running total, in page order, before the short-page termination
    /// check. No page is retried; any failure discards the partial result.
    pub fn get_all_stocks_with_progress<F>(&self, mut progress: F) -> Result<Vec<Stock>, PttError>
    where
        F: FnMut(&[Stock], usize, usize),
    {
        let mut all_stocks: Vec<Stock> = Vec::new();
        let mut page = 0u32;

        loop {
            let stocks = self.get_stock_list(page)?;
            if stocks.is_empty() {
                break;
            }

            let page_len = stocks.len();
            progress(&stocks, page as usize + 1, all_stocks.len() + page_len);
            all_stocks.extend(stocks);

            if page_len < ITEMS_PER_PAGE {
                break;
            }
            page += 1;
        }
        Ok(all_stocks)
    }

    /// Apply one validated stock/price update. Success is a non-empty
    /// transport result.
    pub fn update_stock_price(&self, update: &StockPriceUpdateRequest) -> Result<bool, PttError> {
        let response = self
            .transport
            .call(STOCK_UPDATE_OPERATION, update.to_params())
            .map_err(|e| {
                PttError::StockUpdate(format!("failed to update {}: {e}", update.barcode))
            })?;
        Ok(!response.is_null())
    }

    /// Apply up to 100 stock/price updates in one call. The batch cap is
    /// enforced before any network activity.
    pub fn update_stock_prices_bulk(
        &self,
        updates: &[StockPriceUpdateRequest],
    ) -> Result<bool, PttError> {
        if updates.is_empty() {
            return Err(PttError::Validation(
                "at least one stock update is required".to_string(),
            ));
        }
        if updates.len() > rules::MAX_BULK_ITEMS {
            return Err(PttError::Validation(format!(
                "at most {} stock updates allowed per request",
                rules::MAX_BULK_ITEMS
            )));
        }

        let items: Vec<Value> = updates
            .iter()
            .map(|u| Value::Object(u.to_params()))
            .collect();
        let mut params = Params::new();
        params.insert(
            "StokFiyatListesi".to_string(),
            json!({"StokFiyat": items}),
        );

        let response = self
            .transport
            .call(BULK_STOCK_UPDATE_OPERATION, params)
            .map_err(|e| PttError::StockUpdate(format!("bulk update failed: {e}")))?;
        Ok(!response.is_null())
    }
}
