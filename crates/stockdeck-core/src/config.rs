// ── Runtime connection configuration ──
//
// These types describe *how* to reach the inventory service. They carry
// connection tuning only and never touch disk -- the CLI constructs a
// `ServiceConfig` from its config file and hands it in.

use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict). Default -- the service speaks public HTTPS.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file (self-hosted deployments).
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs on dev instances).
    DangerAcceptInvalid,
}

/// Configuration for connecting to a single inventory service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Service base URL (e.g., `https://inventory.example.com`).
    pub url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: std::time::Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3000"
                .parse()
                .expect("default URL is valid"),
            tls: TlsVerification::default(),
            timeout: std::time::Duration::from_secs(30),
        }
    }
}
