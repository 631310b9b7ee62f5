//! Provider configuration
//!
//! Layers built-in defaults, a YAML file in the platform config directory
//! and environment overrides into one [`ProviderConfig`].

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::ProviderConfig;

/// Keys accepted by [`get_config_value`] and [`set_config_value`]
pub const KEYS: &[&str] = &["url", "apiKey", "extraHeaders", "timeoutSeconds"];

/// Get a configuration value by key
///
/// The api key is only returned redacted.
pub fn get_config_value(config: &ProviderConfig, key: &str) -> anyhow::Result<String> {
    match key {
        "url" => Ok(config.url.clone()),
        "apiKey" => Ok(config.redacted().api_key),
        "timeoutSeconds" => Ok(config.timeout_seconds.to_string()),
        "extraHeaders" => serde_yaml::to_string(&config.extra_headers)
            .map_err(|e| anyhow::anyhow!("Failed to serialize extraHeaders: {}", e)),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key
///
/// `extraHeaders` takes `Name=value` pairs separated by commas; an empty
/// value clears the map.
pub fn set_config_value(config: &mut ProviderConfig, key: &str, value: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    match key {
        "url" => {
            url::Url::parse(value).with_context(|| format!("url is not a valid URL: {}", value))?;
            config.url = value.to_string();
        }
        "apiKey" => {
            config.api_key = value.to_string();
        }
        "timeoutSeconds" => {
            config.timeout_seconds = value
                .parse()
                .context("timeoutSeconds must be a number")?;
        }
        "extraHeaders" => {
            config.extra_headers.clear();
            for pair in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                let (name, header_value) = pair
                    .split_once('=')
                    .with_context(|| format!("extraHeaders entry must be Name=value: {}", pair))?;
                config
                    .extra_headers
                    .insert(name.trim().to_string(), header_value.trim().to_string());
            }
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}
