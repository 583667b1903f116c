use pttavm::service::ROOT_CATEGORY_ID;
use pttavm::{ClientConfig, PttClient, PttError};
use serde_json::{json, Value};

mod common;

use common::{stock_page, MockTransport};

#[test]
fn facade_wires_services_over_one_transport() {
    let transport = MockTransport::with_responses(vec![
        json!("1.0.4.0"),
        stock_page(3, 0),
    ]);
    let client = PttClient::with_transport(&transport);

    assert_eq!(client.get_version().unwrap(), "1.0.4.0");
    assert_eq!(client.get_stocks(0).unwrap().len(), 3);

    let calls = transport.calls();
    assert_eq!(calls[0].0, "GetVersion");
    assert_eq!(calls[1].0, "StokKontrolListesi");
}

#[test]
fn category_lookup_builds_tree() {
    let transport = MockTransport::with_responses(vec![json!({
        "a:success": "true",
        "a:category": {
            "a:id": "1",
            "a:name": "Root",
            "a:children": {
                "a:category": [
                    {"a:id": "10", "a:name": "Elektronik", "a:parent_id": "1"},
                    {"a:id": "11", "a:name": "Kitap", "a:parent_id": "1"},
                ],
            },
        },
    })]);
    let client = PttClient::with_transport(&transport);

    let category = client.get_category(ROOT_CATEGORY_ID).unwrap().unwrap();
    assert_eq!(category.id, "1");
    assert_eq!(category.children.len(), 2);
    assert_eq!(category.children[0].name, "Elektronik");

    assert_eq!(transport.calls()[0].1["id"], json!("1"));
}

#[test]
fn category_not_found_is_none_not_error() {
    let transport = MockTransport::with_responses(vec![Value::Null]);
    let client = PttClient::with_transport(&transport);
    assert!(client.get_category("99999").unwrap().is_none());
}

#[test]
fn category_transport_failure_is_an_error() {
    let transport = MockTransport::new();
    transport.push_failure("boom");
    let client = PttClient::with_transport(&transport);
    assert!(matches!(
        client.get_category("1"),
        Err(PttError::Category(_))
    ));
}

#[test]
fn version_defaults_to_unknown() {
    let transport = MockTransport::with_responses(vec![Value::Null, json!("")]);
    let client = PttClient::with_transport(&transport);
    assert_eq!(client.get_version().unwrap(), "unknown");
    assert_eq!(client.get_version().unwrap(), "unknown");
}

#[test]
fn client_construction_validates_config() {
    let result = PttClient::new(ClientConfig::new("", "pass"));
    assert!(matches!(result, Err(PttError::RequiredField(_))));
}
