//! Settings management for CLI set/unset commands.
//!
//! Each configuration key has a [`SettingHandler`] that validates input and
//! applies it to an in-memory [`Config`]; [`run_set`] and [`run_unset`] load
//! the config file, dispatch to the handler and save the result.

pub mod error;
pub mod handlers;
pub mod registry;

pub use error::SettingError;
pub use registry::SettingRegistry;

use crate::core::config::data::Config;

/// Trait for handling a configuration setting.
pub trait SettingHandler: Send + Sync {
    /// Returns the configuration key this handler manages.
    fn key(&self) -> &'static str;

    /// Set the configuration value from the arguments after the key.
    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError>;

    /// Clear the configuration value.
    fn unset(&self, config: &mut Config) -> String;

    /// Format the current value for display in `khet-chat set` output.
    fn format(&self, config: &Config) -> String;
}

pub fn print_settings(registry: &SettingRegistry, config: &Config) {
    println!("Current configuration:");
    for key in registry.keys_display_order() {
        if let Some(handler) = registry.get(key) {
            println!("{}", handler.format(config));
        }
    }
    println!("  endpoint: {}", config.chat_endpoint());
}

pub fn run_set(key: &str, value: Option<Vec<String>>) -> Result<String, SettingError> {
    let registry = SettingRegistry::new();
    let handler = registry
        .get(key)
        .ok_or_else(|| SettingError::UnknownKey(key.to_string()))?;
    let mut config = Config::load().map_err(|e| SettingError::ConfigError(e.to_string()))?;

    let args = value.unwrap_or_default();
    if args.is_empty() {
        print_settings(&registry, &config);
        return Ok(String::new());
    }

    let message = handler.set(&args, &mut config)?;
    config
        .save()
        .map_err(|e| SettingError::ConfigError(e.to_string()))?;
    Ok(message)
}

pub fn run_unset(key: &str) -> Result<String, SettingError> {
    let registry = SettingRegistry::new();
    let handler = registry
        .get(key)
        .ok_or_else(|| SettingError::UnknownKey(key.to_string()))?;
    let mut config = Config::load().map_err(|e| SettingError::ConfigError(e.to_string()))?;

    let message = handler.unset(&mut config);
    config
        .save()
        .map_err(|e| SettingError::ConfigError(e.to_string()))?;
    Ok(message)
}
