use thiserror::Error;

/// Failures raised by the transport collaborator itself, before any domain
/// interpretation of the response.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API call failed with status code: {0}")]
    Status(u16),

    #[error("Failed to decode SOAP envelope: {0}")]
    Envelope(String),
}

#[derive(Error, Debug)]
pub enum PttError {
    /// A mandatory field is absent. Raised before any network call.
    #[error("Required field missing: {0}")]
    RequiredField(String),

    /// Malformed or out-of-bound caller input. Raised before any network call.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A record was found but could not be coerced into its model type.
    #[error("Failed to parse record: {0}")]
    Parse(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Category lookup failed: {0}")]
    Category(String),

    #[error("Stock operation failed: {0}")]
    Stock(String),

    #[error("Stock update failed: {0}")]
    StockUpdate(String),

    #[error("Barcode check failed: {0}")]
    Barcode(String),

    #[error("Product update failed: {0}")]
    ProductUpdate(String),

    #[error("Version probe failed: {0}")]
    Version(String),
}

impl PttError {
    /// True for the pre-network input errors (`RequiredField`, `Validation`).
    pub fn is_input_error(&self) -> bool {
        matches!(self, PttError::RequiredField(_) | PttError::Validation(_))
    }
}
