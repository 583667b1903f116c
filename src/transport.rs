use crate::config::{ClientConfig, SOAP_ACTION_BASE};
use crate::error::TransportError;
use crate::soap;
use serde_json::Value;
use std::time::Duration;

/// Parameter mapping for one remote operation. Values may be scalars, nested
/// objects or arrays (variant lists and similar nested request shapes).
pub type Params = serde_json::Map<String, Value>;

/// Executes one named remote operation.
///
/// Implementations return the decoded result structure, with `Value::Null`
/// standing for an absent result. Services never retry a failed call.
pub trait Transport {
    fn call(&self, operation: &str, params: Params) -> Result<Value, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn call(&self, operation: &str, params: Params) -> Result<Value, TransportError> {
        (**self).call(operation, params)
    }
}

/// Default transport: blocking HTTP POST of a SOAP 1.1 envelope against the
/// PTT AVM service endpoint.
pub struct SoapTransport {
    client: reqwest::blocking::Client,
    config: ClientConfig,
}

impl SoapTransport {
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(SoapTransport { client, config })
    }
}

impl Transport for SoapTransport {
    fn call(&self, operation: &str, params: Params) -> Result<Value, TransportError> {
        let envelope = soap::build_envelope(
            &self.config.username,
            &self.config.password,
            operation,
            &params,
        );

        tracing::debug!("calling {} with {} parameter(s)", operation, params.len());

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", format!("{SOAP_ACTION_BASE}{operation}"))
            .body(envelope)
            .send()?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response.text()?;
        let document = soap::decode_document(&body)?;
        soap::extract_result(&document, operation)
    }
}
