//! Outbound adapters for the `ImageHost` port.

mod http_host;

pub use http_host::HttpImageHost;
