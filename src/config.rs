//! Configuration loading.
//!
//! Settings live in a YAML file at `~/.vtsweep` under a `virustotal:`
//! section. When the file is absent, the `VTSWEEP_API_KEY` and
//! `VTSWEEP_TIMEOUT` environment variables are consulted instead. The
//! `timeout` key is the inter-item pacing delay in seconds, not an HTTP
//! timeout; it exists to stay under the service's per-minute quota.

use crate::core::error::{VtError, VtResult};
use secrecy::SecretString;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default inter-item pacing delay, in seconds.
pub const DEFAULT_PAUSE_SECS: u64 = 25;

/// Name of the config file in the user's home directory.
const CONFIG_FILE_NAME: &str = ".vtsweep";

/// Environment variable fallbacks.
const ENV_API_KEY: &str = "VTSWEEP_API_KEY";
const ENV_TIMEOUT: &str = "VTSWEEP_TIMEOUT";

#[derive(Debug, Deserialize)]
struct ConfigFile {
    virustotal: ServiceSection,
}

#[derive(Debug, Deserialize)]
struct ServiceSection {
    #[serde(rename = "api-key")]
    api_key: Option<String>,
    timeout: Option<u64>,
    proxy: Option<String>,
    ssl_ca_cert: Option<PathBuf>,
    verify_ssl: Option<bool>,
}

/// Immutable process configuration, passed explicitly into the runner
/// and downward. There is no ambient or static configuration state.
#[derive(Debug, Clone)]
pub struct Config {
    /// The service API key.
    pub api_key: SecretString,

    /// Seconds to pause between consecutive items of a batch category.
    pub pause_secs: u64,

    /// Optional proxy URL for all outbound requests.
    pub proxy: Option<String>,

    /// Optional extra root CA certificate (PEM).
    pub ssl_ca_cert: Option<PathBuf>,

    /// Whether to verify TLS certificates. On unless explicitly disabled.
    pub verify_ssl: bool,
}

impl Config {
    /// The default config file location, `~/.vtsweep`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    /// Loads configuration from the given file, falling back to the
    /// environment when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`VtError::Configuration`] when neither source yields an
    /// API key, or when the file does not parse.
    pub fn load(path: &Path) -> VtResult<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Self::from_env().ok_or_else(|| {
                VtError::configuration(format!(
                    "{} does not exist and {ENV_API_KEY} is not set; \
                     run with --create-config to create a skeleton",
                    path.display()
                ))
            })
        }
    }

    fn from_file(path: &Path) -> VtResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let file: ConfigFile = serde_yml::from_str(&raw).map_err(|e| {
            VtError::configuration(format!("{} does not parse: {e}", path.display()))
        })?;

        let section = file.virustotal;
        let api_key = section
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                VtError::configuration(format!("{} has an empty api-key", path.display()))
            })?;

        Ok(Self {
            api_key: SecretString::from(api_key),
            pause_secs: section.timeout.unwrap_or(DEFAULT_PAUSE_SECS),
            proxy: section.proxy,
            ssl_ca_cert: section.ssl_ca_cert,
            verify_ssl: section.verify_ssl.unwrap_or(true),
        })
    }

    fn from_env() -> Option<Self> {
        let api_key = std::env::var(ENV_API_KEY).ok()?;
        let pause_secs = std::env::var(ENV_TIMEOUT)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PAUSE_SECS);

        Some(Self {
            api_key: SecretString::from(api_key),
            pause_secs,
            proxy: None,
            ssl_ca_cert: None,
            verify_ssl: true,
        })
    }

    /// Writes an empty skeleton config file for the user to fill in.
    ///
    /// Refuses to overwrite an existing file.
    pub fn write_skeleton(path: &Path) -> VtResult<()> {
        if path.exists() {
            return Err(VtError::configuration(format!(
                "{} already exists; delete it to re-create",
                path.display()
            )));
        }
        std::fs::write(
            path,
            "virustotal:\n  api-key:\n  timeout: 25\n\n",
        )?;
        Ok(())
    }
}
