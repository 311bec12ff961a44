// Built-in configuration used when no config file exists

use super::types::Config;
use crate::core::probe::types::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};

/// Address of the local network host the dashboard pointed at
pub const DEFAULT_TARGET_URL: &str = "http://192.168.1.10:5000/";

impl Default for Config {
    fn default() -> Self {
        Config {
            target_url: DEFAULT_TARGET_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            follow_redirects: true,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            use_proxy: true,
        }
    }
}
