use super::types::Config;
use crate::core::probe::parse_target_url;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the config file location
pub const CONFIG_PATH_ENV_VAR: &str = "REACHPROBE_CONFIG";
/// Overrides `target_url`
pub const URL_ENV_VAR: &str = "REACHPROBE_URL";
/// Overrides `timeout_secs`; unparsable values are ignored
pub const TIMEOUT_ENV_VAR: &str = "REACHPROBE_TIMEOUT_SECS";

const MAX_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error("Config read error ({path}): {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Config write error ({path}): {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config already exists at {0}")]
    AlreadyExists(PathBuf),
    #[error("Invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

impl Config {
    /// Config file location: `$REACHPROBE_CONFIG` or `~/.reachprobe/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        Ok(home.join(".reachprobe").join("config.toml"))
    }

    /// Load from the default location with environment overrides applied
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load exactly what is in `path`, without environment overrides
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Write the default config to the default location
    pub fn init() -> Result<PathBuf, ConfigError> {
        let path = Self::default_path()?;
        Self::init_at(&path)?;
        Ok(path)
    }

    /// Write the default config to `path`, refusing to overwrite
    pub fn init_at(path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }
        let write_error = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        let content = toml::to_string_pretty(&Self::default())?;
        fs::write(path, content).map_err(write_error)?;
        Ok(())
    }

    /// Validate all fields, reporting every problem found
    pub fn check(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if let Err(e) = parse_target_url(&self.target_url) {
            problems.push(format!("target_url '{}': {}", self.target_url, e));
        }
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            problems.push(format!(
                "timeout_secs must be between 1 and {} (got {})",
                MAX_TIMEOUT_SECS, self.timeout_secs
            ));
        }
        if self.user_agent.trim().is_empty() {
            problems.push("user_agent must not be empty".to_string());
        }
        if self.follow_redirects && self.max_redirects == 0 {
            problems.push("max_redirects must be at least 1 when follow_redirects is on".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }

    /// Print the effective configuration as TOML
    pub fn print(&self) -> Result<(), ConfigError> {
        println!("{}", toml::to_string_pretty(self)?);
        Ok(())
    }

    /// Apply `REACHPROBE_URL` and `REACHPROBE_TIMEOUT_SECS`
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var(URL_ENV_VAR) {
            if !url.trim().is_empty() {
                self.target_url = url.trim().to_string();
            }
        }
        if let Some(timeout_secs) = env::var(TIMEOUT_ENV_VAR)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
        {
            self.timeout_secs = timeout_secs.min(MAX_TIMEOUT_SECS);
        }
    }

    /// Apply command-line overrides, which win over file and environment
    ///
    /// The timeout is clamped to `1..=MAX_TIMEOUT_SECS`.
    pub fn with_overrides(mut self, url: Option<String>, timeout_secs: Option<u64>) -> Self {
        if let Some(url) = url {
            self.target_url = url;
        }
        if let Some(timeout_secs) = timeout_secs {
            self.timeout_secs = timeout_secs.clamp(1, MAX_TIMEOUT_SECS);
        }
        self
    }
}
