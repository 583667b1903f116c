#![allow(dead_code)]

use pttavm::{Params, Transport, TransportError};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Mutex, Once};

static TRACING: Once = Once::new();

/// Route library logs to the test harness output, once per process.
pub fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive("pttavm=debug".parse().expect("valid directive")),
            )
            .with_test_writer()
            .init();
    });
}

/// Scripted transport: hands out queued responses in order and records every
/// call. An exhausted queue answers with an absent result.
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<Value, String>>>,
    calls: Mutex<Vec<(String, Params)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        MockTransport {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_responses(responses: Vec<Value>) -> Self {
        let transport = MockTransport::new();
        for response in responses {
            transport.push_response(response);
        }
        transport
    }

    pub fn push_response(&self, response: Value) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_failure(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(String, Params)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn call(&self, operation: &str, params: Params) -> Result<Value, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((operation.to_string(), params));
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(TransportError::Envelope(message)),
            None => Ok(Value::Null),
        }
    }
}

/// One well-formed stock record as the upstream service encodes it (every
/// scalar is a string).
pub fn stock_record(barcode: &str) -> Value {
    json!({
        "a:Barkod": barcode,
        "a:Aciklama": "Test urunu",
        "a:Agirlik": "1200",
        "a:Aktif": "true",
        "a:BoyX": "30", "a:BoyY": "20", "a:BoyZ": "10",
        "a:Desi": "2",
        "a:GarantiSuresi": "24",
        "a:Iskonto": "0",
        "a:KDVOran": "10",
        "a:KDVli": "110",
        "a:KDVsiz": "100",
        "a:KargoProfilId": "7",
        "a:Mevcut": "true",
        "a:Miktar": "5",
        "a:ShopId": "900",
        "a:SingleBox": "false",
        "a:UrunAdi": format!("Urun {barcode}"),
        "a:UrunId": "1001",
        "a:YeniKategoriId": "3051",
    })
}

/// A full `StokKontrolListesi` page holding `count` records. Barcodes are
/// numbered from `first_index` so pages stay distinguishable.
pub fn stock_page(count: usize, first_index: usize) -> Value {
    let records: Vec<Value> = (0..count)
        .map(|i| stock_record(&format!("bar-{}", first_index + i)))
        .collect();
    json!({"a:StokKontrolDetay": records})
}

pub fn empty_page() -> Value {
    Value::Null
}
