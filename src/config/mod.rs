pub mod defaults;
pub mod loader;
pub mod types;

pub use loader::{ConfigError, CONFIG_PATH_ENV_VAR, TIMEOUT_ENV_VAR, URL_ENV_VAR};
pub use types::Config;
