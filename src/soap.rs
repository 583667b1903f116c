//! SOAP 1.1 plumbing: envelope construction with a WSSE UsernameToken header
//! and decoding of response documents into dynamic `serde_json::Value` trees.
//!
//! Decoding follows the conventions the rest of the crate relies on: an
//! element becomes an object entry keyed by its qualified tag name (prefix
//! included, e.g. `a:Barkod`), repeated siblings collapse into an array,
//! text-only elements become strings and empty or nil elements become null.

use crate::error::TransportError;
use crate::transport::Params;
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::{Map, Value};

pub(crate) fn build_envelope(
    username: &str,
    password: &str,
    operation: &str,
    params: &Params,
) -> String {
    let mut body = String::new();
    for (name, value) in params {
        write_param(&mut body, name, value, "tem");
    }

    format!(
        r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:tem="http://tempuri.org/" xmlns:ept="http://schemas.datacontract.org/2004/07/ePttAVMService"><soapenv:Header><wsse:Security soapenv:mustUnderstand="1" xmlns:wsse="http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd"><wsse:UsernameToken><wsse:Username>{username}</wsse:Username><wsse:Password Type="http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-username-token-profile-1.0#PasswordText">{password}</wsse:Password></wsse:UsernameToken></wsse:Security></soapenv:Header><soapenv:Body><tem:{operation}>{body}</tem:{operation}></soapenv:Body></soapenv:Envelope>"#,
        username = escape(username),
        password = escape(password),
        operation = operation,
        body = body,
    )
}

/// Serialize one request parameter. Scalars become text elements, objects
/// become nested complex types (data-contract namespace), arrays become
/// repeated elements of the same name. Nulls are omitted entirely.
fn write_param(out: &mut String, name: &str, value: &Value, prefix: &str) {
    match value {
        Value::Null => {}
        Value::Array(items) => {
            for item in items {
                write_param(out, name, item, prefix);
            }
        }
        Value::Object(map) => {
            out.push_str(&format!("<{prefix}:{name}>"));
            for (child_name, child) in map {
                write_param(out, child_name, child, "ept");
            }
            out.push_str(&format!("</{prefix}:{name}>"));
        }
        Value::String(s) => {
            out.push_str(&format!("<{prefix}:{name}>{}</{prefix}:{name}>", escape(s.as_str())));
        }
        Value::Number(n) => {
            out.push_str(&format!("<{prefix}:{name}>{n}</{prefix}:{name}>"));
        }
        Value::Bool(b) => {
            out.push_str(&format!("<{prefix}:{name}>{b}</{prefix}:{name}>"));
        }
    }
}

struct Frame {
    name: String,
    children: Map<String, Value>,
    text: String,
    nil: bool,
}

/// Decode a full XML document into the dynamic value shape described in the
/// module docs. The returned value is an object holding the root element.
pub(crate) fn decode_document(xml: &str) -> Result<Value, TransportError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = vec![Frame {
        name: String::new(),
        children: Map::new(),
        text: String::new(),
        nil: false,
    }];

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                let nil = is_nil(&start)?;
                stack.push(Frame {
                    name,
                    children: Map::new(),
                    text: String::new(),
                    nil,
                });
            }
            Ok(Event::Empty(empty)) => {
                let name = String::from_utf8_lossy(empty.name().as_ref()).into_owned();
                let parent = stack.last_mut().expect("document frame always present");
                insert_child(&mut parent.children, name, Value::Null);
            }
            Ok(Event::Text(text)) => {
                let decoded = text
                    .unescape()
                    .map_err(|e| TransportError::Envelope(e.to_string()))?;
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&decoded);
                }
            }
            Ok(Event::End(_)) => {
                let frame = stack.pop().ok_or_else(|| {
                    TransportError::Envelope("unbalanced closing tag".to_string())
                })?;
                let value = if frame.nil {
                    Value::Null
                } else if !frame.children.is_empty() {
                    Value::Object(frame.children)
                } else if !frame.text.is_empty() {
                    Value::String(frame.text)
                } else {
                    Value::Null
                };
                let parent = stack.last_mut().ok_or_else(|| {
                    TransportError::Envelope("closing tag outside document".to_string())
                })?;
                insert_child(&mut parent.children, frame.name, value);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(TransportError::Envelope(e.to_string())),
        }
    }

    if stack.len() != 1 {
        return Err(TransportError::Envelope("truncated document".to_string()));
    }
    Ok(Value::Object(stack.pop().expect("checked above").children))
}

fn is_nil(start: &quick_xml::events::BytesStart<'_>) -> Result<bool, TransportError> {
    for attr in start.attributes() {
        let attr = attr.map_err(|e| TransportError::Envelope(e.to_string()))?;
        let key = attr.key.as_ref();
        if key == b"i:nil" || key.ends_with(b":nil") || key == b"nil" {
            return Ok(attr.value.as_ref() == b"true");
        }
    }
    Ok(false)
}

/// Repeated sibling elements collapse into an array under their shared key.
fn insert_child(children: &mut Map<String, Value>, name: String, value: Value) {
    match children.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            children.insert(name, value);
        }
    }
}

/// Look up a child entry by its local name, tolerating any namespace prefix.
pub(crate) fn find_child<'a>(value: &'a Value, local: &str) -> Option<&'a Value> {
    let map = value.as_object()?;
    if let Some(found) = map.get(local) {
        return Some(found);
    }
    let suffix = format!(":{local}");
    map.iter()
        .find(|(key, _)| key.ends_with(&suffix))
        .map(|(_, found)| found)
}

/// Unwrap `{operation}Response/{operation}Result` from a decoded envelope.
/// A missing response or result key is an absent result, not an error; a
/// SOAP fault in the body is surfaced as an envelope error.
pub(crate) fn extract_result(document: &Value, operation: &str) -> Result<Value, TransportError> {
    let envelope = find_child(document, "Envelope")
        .ok_or_else(|| TransportError::Envelope("missing Envelope element".to_string()))?;
    let body = find_child(envelope, "Body")
        .ok_or_else(|| TransportError::Envelope("missing Body element".to_string()))?;

    if let Some(fault) = find_child(body, "Fault") {
        let reason = find_child(fault, "faultstring")
            .and_then(|v| v.as_str())
            .unwrap_or("unspecified SOAP fault");
        return Err(TransportError::Envelope(reason.to_string()));
    }

    let result = find_child(body, &format!("{operation}Response"))
        .and_then(|response| find_child(response, &format!("{operation}Result")));
    Ok(result.cloned().unwrap_or(Value::Null))
}
