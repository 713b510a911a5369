//! The wire layer: transport, capability trait, and per-variant
//! endpoint implementations.
//!
//! - [`transport`] - authenticated HTTP against the v2 API
//! - [`traits`] - the [`ScanApi`] capability trait
//! - [`file`] / [`url`] - endpoint sets per resource variant
//! - [`mock`] - scripted test double

pub mod file;
pub mod mock;
pub mod traits;
pub mod transport;
pub mod url;

// Re-exports
pub use file::FileApi;
pub use mock::MockApi;
pub use traits::{ArcScanApi, ScanApi};
pub use transport::{Transport, API_BASE};
pub use url::UrlApi;
