//! Request descriptors and gateway responses

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;

/// One GET against the gateway, discarded after use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayRequest {
    /// Gateway authority (`host` or `host:port`)
    pub host: String,
    /// Collection path, e.g. `/gateway/m1/items`
    pub path: String,
    /// Resource id, already percent-encoded
    pub resource: String,
}

impl GatewayRequest {
    pub fn new(host: impl Into<String>, path: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
            resource: resource.into(),
        }
    }

    /// Path and resource as sent on the request line
    pub fn target(&self) -> String {
        format!("{}/{}", self.path, self.resource)
    }

    /// Full URL of the request
    pub fn url(&self) -> Result<Url> {
        Ok(Url::parse(&format!("http://{}{}", self.host, self.target()))?)
    }
}

impl fmt::Display for GatewayRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GET http://{}{}", self.host, self.target())
    }
}

/// Whatever the gateway answered; status is recorded, never checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    pub status_code: u16,
    /// Raw bytes as received, not decoded
    pub body: Vec<u8>,
    pub elapsed: Duration,
}

impl GatewayResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_composition() {
        let request = GatewayRequest::new("localhost:8099", "/gateway/m1/items", "m1-3");
        let url = request.url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:8099/gateway/m1/items/m1-3");
        assert_eq!(url.port(), Some(8099));
    }

    #[test]
    fn test_encoded_resource_is_kept() {
        let request = GatewayRequest::new("localhost", "/gateway/m2/items", "z%20t");
        let url = request.url().unwrap();
        assert_eq!(url.path(), "/gateway/m2/items/z%20t");
        assert_eq!(url.port_or_known_default(), Some(80));
    }

    #[test]
    fn test_display() {
        let request = GatewayRequest::new("localhost:8099", "/gateway/m1/items", "x%20y");
        assert_eq!(request.to_string(), "GET http://localhost:8099/gateway/m1/items/x%20y");
    }

    #[test]
    fn test_invalid_host_fails_to_build_url() {
        let request = GatewayRequest::new("bad host", "/gateway/m1/items", "m1-0");
        assert!(request.url().is_err());
    }
}
