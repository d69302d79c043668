//! ServiceUtil — reports the service instance's own address.

/// Knows the `host:port` this instance serves on, for provenance
/// reporting in composite responses.
#[derive(Debug, Clone)]
pub struct ServiceUtil {
    address: String,
}

impl ServiceUtil {
    /// Derive the address from the environment's hostname and the port
    /// the service listens on.
    pub fn new(port: u16) -> Self {
        let host = std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string());
        Self {
            address: format!("{}:{}", host, port),
        }
    }

    /// Use a fixed address, bypassing hostname lookup.
    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}
