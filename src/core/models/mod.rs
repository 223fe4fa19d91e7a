pub mod relay_config;

pub use relay_config::{ConfigError, RelayConfig, DEFAULT_MODEL, DEFAULT_UPSTREAM_BASE};
