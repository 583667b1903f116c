use crate::error::PttError;
use crate::transport::{Params, Transport};
use serde_json::Value;

const VERSION_OPERATION: &str = "GetVersion";
const UNKNOWN_VERSION: &str = "unknown";

pub struct VersionService<T> {
    transport: T,
}

impl<T: Transport> VersionService<T> {
    pub fn new(transport: T) -> Self {
        VersionService { transport }
    }

    /// Probe the upstream API version. An empty or absent response yields
    /// the literal `"unknown"`.
    pub fn get_version(&self) -> Result<String, PttError> {
        let response = self
            .transport
            .call(VERSION_OPERATION, Params::new())
            .map_err(|e| PttError::Version(e.to_string()))?;

        Ok(match response {
            Value::String(version) if !version.is_empty() => version,
            _ => UNKNOWN_VERSION.to_string(),
        })
    }
}
