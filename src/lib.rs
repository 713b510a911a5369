//! # vtsweep
//!
//! Submit file hashes, files, and URLs to the VirusTotal v2 API, poll
//! for completed analysis, and render normalized results as text,
//! JSON, YAML, or XML.
//!
//! ## Overview
//!
//! The service is asynchronous, rate limited, and sometimes slow. This
//! crate packages the orchestration that turns a submission into a
//! completed report anyway:
//!
//! - Submit hashes, local files, and URLs through one capability
//!   interface
//! - Poll queued analyses to completion at a fixed interval
//! - Retry transport faults inside a bounded per-resource budget
//! - Stop the whole run the moment the service signals its rate limit
//! - Collapse the service's uneven reply shapes into one normalized
//!   result any encoder can render
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vtsweep::config::Config;
//! use vtsweep::runner::{Batch, Runner, RunnerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(&Config::default_path().unwrap())?;
//!     let runner = Runner::from_config(&config, RunnerConfig::default())?;
//!
//!     let batch = Batch {
//!         hashes: vec!["d41d8cd98f00b204e9800998ecf8427e".into()],
//!         ..Default::default()
//!     };
//!
//!     let mut stdout = std::io::stdout();
//!     runner.run(batch, &mut stdout).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **core**: types, errors, reply classification, result
//!   normalization, digests
//! - **api**: the transport and the per-variant endpoint
//!   implementations of [`api::ScanApi`]
//! - **runner**: retry policy, poll loop, pacing, batch orchestration
//! - **output**: the four encoders over the normalized record set
//! - **config** / **cli**: process configuration and argument parsing

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod output;
pub mod runner;

// Re-export commonly used types at the crate root
pub use crate::config::Config;
pub use crate::core::{
    AnalysisReport, Resource, ResponseStatus, ResultRecord, ScanResult, ScannerVerdict,
    SubmissionOutcome, VtError, VtResult,
};
pub use crate::output::Format;
pub use crate::runner::{Batch, RetryConfig, RunStats, Runner, RunnerConfig};

/// Prelude module for convenient imports.
///
/// ```rust
/// use vtsweep::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{ArcScanApi, FileApi, MockApi, ScanApi, Transport, UrlApi};
    pub use crate::config::Config;
    pub use crate::core::{
        AnalysisReport, Resource, ResponseStatus, ResultRecord, ScanResult, ScannerVerdict,
        SubmissionOutcome, VtError, VtResult,
    };
    pub use crate::output::Format;
    pub use crate::runner::{Batch, RetryConfig, RunStats, Runner, RunnerConfig};
}
