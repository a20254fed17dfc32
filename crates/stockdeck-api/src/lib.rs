// stockdeck-api: Async Rust client for the Stockdeck inventory service.

pub mod auth;
pub mod client;
pub mod error;
pub mod movements;
pub mod stocks;
pub mod transport;
pub mod types;
pub mod users;

pub use client::ApiClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
