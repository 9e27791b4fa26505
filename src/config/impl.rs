use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns an Arc pointer to the configuration, which is cheap to clone
/// and doesn't hold any locks. Falls back to in-memory defaults when
/// `init_config()` has not been called yet.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(StaticConfig::default()))
        .load_full()
}

/// Initialize the global configuration
///
/// Loads configuration from the given TOML path (or "config.toml" in the
/// current directory). If the file doesn't exist, uses in-memory defaults.
///
/// # Examples
/// ```no_run
/// use plotmap::config::init_config;
/// init_config(None);
/// ```
pub fn init_config(path: Option<&str>) {
    set_config(StaticConfig::load(path));
}

/// Replace the global configuration with an already-built value
///
/// Used by tests and by tooling that assembles a config programmatically.
pub fn set_config(config: StaticConfig) {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(StaticConfig::default()))
        .store(Arc::new(config));
}
