use crate::core::probe::ProbeOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Probe configuration as stored in `config.toml`
///
/// Missing keys fall back to their defaults, so a partial file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL probed when none is given on the command line
    pub target_url: String,
    /// Whole-exchange timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header sent with probes
    pub user_agent: String,
    /// Follow 3xx responses to their final destination
    pub follow_redirects: bool,
    /// Redirect hop limit when following
    pub max_redirects: u32,
    /// Honor http_proxy / https_proxy from the environment
    pub use_proxy: bool,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Request options derived from this configuration
    pub fn to_probe_options(&self) -> ProbeOptions {
        ProbeOptions {
            timeout: self.timeout(),
            user_agent: self.user_agent.clone(),
            max_redirects: if self.follow_redirects {
                Some(self.max_redirects)
            } else {
                None
            },
            use_proxy: self.use_proxy,
        }
    }
}
