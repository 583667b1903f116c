use pttavm::service::StockService;
use pttavm::{PttError, StockPriceUpdateRequest};
use serde_json::{json, Value};
use std::cell::RefCell;

mod common;

use common::{empty_page, init_tracing, stock_page, stock_record, MockTransport};

#[test]
fn total_count_stops_on_short_page() {
    let transport = MockTransport::with_responses(vec![
        stock_page(1000, 0),
        stock_page(1000, 1000),
        stock_page(437, 2000),
    ]);
    let service = StockService::new(&transport);

    let count = service.get_total_stock_count().unwrap();
    assert_eq!(count, 2437);
    assert_eq!(transport.call_count(), 3);
}

#[test]
fn total_count_stops_on_empty_page() {
    let transport = MockTransport::with_responses(vec![
        stock_page(1000, 0),
        stock_page(1000, 1000),
        empty_page(),
    ]);
    let service = StockService::new(&transport);

    let count = service.get_total_stock_count().unwrap();
    assert_eq!(count, 2000);
    assert_eq!(transport.call_count(), 3);
}

#[test]
fn pages_are_requested_sequentially_from_zero() {
    let transport = MockTransport::with_responses(vec![
        stock_page(1000, 0),
        stock_page(2, 1000),
    ]);
    let service = StockService::new(&transport);
    service.get_total_stock_count().unwrap();

    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|(op, _)| op == "StokKontrolListesi"));
    assert_eq!(calls[0].1["SearchPage"], json!(0));
    assert_eq!(calls[1].1["SearchPage"], json!(1));
}

#[test]
fn get_all_stocks_reports_progress_per_page() {
    let transport = MockTransport::with_responses(vec![
        stock_page(1000, 0),
        stock_page(1000, 1000),
        stock_page(437, 2000),
    ]);
    let service = StockService::new(&transport);

    let observed: RefCell<Vec<(usize, usize, usize)>> = RefCell::new(Vec::new());
    let stocks = service
        .get_all_stocks_with_progress(|page_records, page_number, running_total| {
            observed
                .borrow_mut()
                .push((page_records.len(), page_number, running_total));
        })
        .unwrap();

    assert_eq!(stocks.len(), 2437);
    assert_eq!(
        observed.into_inner(),
        vec![(1000, 1, 1000), (1000, 2, 2000), (437, 3, 2437)]
    );
    // Records accumulate in page order.
    assert_eq!(stocks[0].barcode.as_deref(), Some("bar-0"));
    assert_eq!(stocks[2436].barcode.as_deref(), Some("bar-2436"));
}

#[test]
fn get_all_stocks_skips_callback_for_trailing_empty_page() {
    let transport = MockTransport::with_responses(vec![stock_page(1000, 0), empty_page()]);
    let service = StockService::new(&transport);

    let mut invocations = 0;
    let stocks = service
        .get_all_stocks_with_progress(|_, _, _| invocations += 1)
        .unwrap();

    assert_eq!(stocks.len(), 1000);
    assert_eq!(invocations, 1);
    assert_eq!(transport.call_count(), 2);
}

#[test]
fn callback_panic_aborts_aggregation() {
    let transport = MockTransport::with_responses(vec![
        stock_page(1000, 0),
        stock_page(1000, 1000),
        stock_page(437, 2000),
    ]);
    let service = StockService::new(&transport);

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        service.get_all_stocks_with_progress(|_, page_number, _| {
            if page_number == 2 {
                panic!("observer gave up");
            }
        })
    }));

    assert!(outcome.is_err());
    // Page 3 is never requested once the callback unwinds.
    assert_eq!(transport.call_count(), 2);
}

#[test]
fn aggregation_is_all_or_nothing() {
    let transport = MockTransport::new();
    transport.push_response(stock_page(1000, 0));
    transport.push_failure("connection reset");
    let service = StockService::new(&transport);

    let result = service.get_all_stocks();
    assert!(matches!(result, Err(PttError::Stock(message)) if message.contains("page 1")));

    let transport = MockTransport::new();
    transport.push_response(stock_page(1000, 0));
    transport.push_failure("connection reset");
    let service = StockService::new(&transport);
    assert!(service.get_total_stock_count().is_err());
}

#[test]
fn malformed_records_are_dropped_from_list_results() {
    init_tracing();
    let mut bad_record = stock_record("bar-bad");
    bad_record["a:Miktar"] = json!("bes adet");
    let page = json!({
        "a:StokKontrolDetay": [stock_record("bar-1"), bad_record, stock_record("bar-3")],
    });
    let transport = MockTransport::with_responses(vec![page]);
    let service = StockService::new(&transport);

    let stocks = service.get_stock_list(0).unwrap();
    assert_eq!(stocks.len(), 2);
    assert_eq!(stocks[0].barcode.as_deref(), Some("bar-1"));
    assert_eq!(stocks[1].barcode.as_deref(), Some("bar-3"));
}

#[test]
fn single_record_page_is_normalized() {
    let page = json!({"a:StokKontrolDetay": stock_record("bar-solo")});
    let transport = MockTransport::with_responses(vec![page]);
    let service = StockService::new(&transport);

    let stocks = service.get_stock_list(0).unwrap();
    assert_eq!(stocks.len(), 1);
    assert_eq!(stocks[0].barcode.as_deref(), Some("bar-solo"));
}

#[test]
fn single_stock_distinguishes_not_found_from_unparsable() {
    // Not found: absent detail key.
    let transport = MockTransport::with_responses(vec![json!({})]);
    let service = StockService::new(&transport);
    assert!(service.get_single_stock("missing").unwrap().is_none());

    // Unparsable record: fatal, unlike the list path.
    let mut bad_record = stock_record("bar-bad");
    bad_record["a:KDVli"] = json!("on lira");
    let transport =
        MockTransport::with_responses(vec![json!({"a:StokKontrolDetay": bad_record})]);
    let service = StockService::new(&transport);
    assert!(matches!(
        service.get_single_stock("bar-bad"),
        Err(PttError::Stock(_))
    ));

    // Found and parsable.
    let transport = MockTransport::with_responses(vec![
        json!({"a:StokKontrolDetay": stock_record("bar-1")}),
    ]);
    let service = StockService::new(&transport);
    let stock = service.get_single_stock("bar-1").unwrap().unwrap();
    assert_eq!(stock.barcode.as_deref(), Some("bar-1"));
    assert_eq!(transport.calls()[0].1["Barkod"], json!("bar-1"));
}

#[test]
fn stock_price_update_serializes_and_reports_success() {
    let transport = MockTransport::with_responses(vec![json!("ok")]);
    let service = StockService::new(&transport);

    let update = StockPriceUpdateRequest::builder("bar-1", 100.0, 10.0)
        .quantity(50)
        .category_id(101)
        .build()
        .unwrap();

    assert!(service.update_stock_price(&update).unwrap());

    let calls = transport.calls();
    assert_eq!(calls[0].0, "StokFiyatGuncelle");
    assert_eq!(calls[0].1["Barkod"], json!("bar-1"));
    assert_eq!(calls[0].1["Miktar"], json!(50));
}

#[test]
fn empty_update_response_means_failure() {
    let transport = MockTransport::with_responses(vec![Value::Null]);
    let service = StockService::new(&transport);
    let update = StockPriceUpdateRequest::builder("bar-1", 100.0, 10.0)
        .build()
        .unwrap();
    assert!(!service.update_stock_price(&update).unwrap());
}

#[test]
fn bulk_stock_update_enforces_cap_before_any_call() {
    let transport = MockTransport::new();
    let service = StockService::new(&transport);

    let update = StockPriceUpdateRequest::builder("bar-1", 100.0, 10.0)
        .build()
        .unwrap();
    let updates: Vec<_> = (0..101).map(|_| update.clone()).collect();

    assert!(matches!(
        service.update_stock_prices_bulk(&updates),
        Err(PttError::Validation(_))
    ));
    assert!(matches!(
        service.update_stock_prices_bulk(&[]),
        Err(PttError::Validation(_))
    ));
    assert_eq!(transport.call_count(), 0);
}
