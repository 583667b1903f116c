use crate::error::PttError;

pub const DEFAULT_ENDPOINT: &str = "https://ws.pttavm.com:93/service.svc";
pub const SOAP_ACTION_BASE: &str = "http://tempuri.org/IService/";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the PTT AVM web service.
///
/// Credentials are static for the client's lifetime and are embedded in the
/// WSSE header of every outgoing call.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub username: String,
    pub password: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        ClientConfig {
            username: username.into(),
            password: password.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read credentials from `PTTAVM_USERNAME` / `PTTAVM_PASSWORD`, with an
    /// optional `PTTAVM_ENDPOINT` override.
    pub fn from_env() -> Result<Self, PttError> {
        let username = std::env::var("PTTAVM_USERNAME")
            .map_err(|_| PttError::RequiredField("PTTAVM_USERNAME".to_string()))?;
        let password = std::env::var("PTTAVM_PASSWORD")
            .map_err(|_| PttError::RequiredField("PTTAVM_PASSWORD".to_string()))?;

        let mut config = ClientConfig::new(username, password);
        if let Ok(endpoint) = std::env::var("PTTAVM_ENDPOINT") {
            config.endpoint = endpoint;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn validate(&self) -> Result<(), PttError> {
        if self.username.trim().is_empty() {
            return Err(PttError::RequiredField("username".to_string()));
        }
        if self.password.trim().is_empty() {
            return Err(PttError::RequiredField("password".to_string()));
        }
        if self.endpoint.trim().is_empty() {
            return Err(PttError::RequiredField("endpoint".to_string()));
        }
        Ok(())
    }
}
