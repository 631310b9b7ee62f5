//! Configuration loading and merging logic
//!
//! Handles loading configuration from multiple sources and merging them
//! according to precedence rules.

use super::{defaults, paths, schema::ProviderConfig};
use anyhow::{Context, Result};
use std::path::Path;

/// Environment variable overriding `url`
pub const ENV_URL: &str = "RADARR_URL";
/// Environment variable overriding `apiKey`
pub const ENV_API_KEY: &str = "RADARR_API_KEY";
/// Environment variable overriding `timeoutSeconds`
pub const ENV_TIMEOUT: &str = "RADARR_TIMEOUT";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Config file (`path`, or the root config)
    /// 3. Built-in defaults
    pub fn load(path: Option<&Path>) -> Result<ProviderConfig> {
        let mut config = Self::load_defaults();

        let root_path = paths::root_config_path();
        let path = path.unwrap_or(root_path.as_path());
        if path.exists() {
            let file_config = Self::load_file(path)?;
            config = Self::merge_config(config, file_config);
        }

        config = Self::apply_env_overrides(config, |key| std::env::var(key).ok());

        Ok(config)
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<ProviderConfig> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: ProviderConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the merged configuration
    ///
    /// Fails on unreadable or malformed YAML, an unparsable url and a
    /// missing api key.
    pub fn validate(path: Option<&Path>) -> Result<ProviderConfig> {
        let config = Self::load(path).context("Failed to load configuration")?;
        Self::check(&config)?;
        Ok(config)
    }

    /// Check a loaded configuration
    pub fn check(config: &ProviderConfig) -> Result<()> {
        let url = url::Url::parse(&config.url)
            .with_context(|| format!("url is not a valid URL: {}", config.url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow::anyhow!(
                "url must use http or https, got: {}",
                url.scheme()
            ));
        }
        if config.api_key.trim().is_empty() {
            return Err(anyhow::anyhow!(
                "apiKey is not set (set it in the config file or {})",
                ENV_API_KEY
            ));
        }
        if config.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("timeoutSeconds must be greater than 0"));
        }
        Ok(())
    }

    /// Load default configuration
    pub fn load_defaults() -> ProviderConfig {
        defaults::default_config()
    }

    /// Merge two configurations, with `other` taking precedence
    ///
    /// Extra headers are merged key by key.
    fn merge_config(base: ProviderConfig, other: ProviderConfig) -> ProviderConfig {
        let mut extra_headers = base.extra_headers;
        extra_headers.extend(other.extra_headers);
        ProviderConfig {
            url: other.url,
            api_key: other.api_key,
            extra_headers,
            timeout_seconds: other.timeout_seconds,
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(
        mut config: ProviderConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> ProviderConfig {
        if let Some(url) = env(ENV_URL) {
            config.url = url;
        }

        if let Some(api_key) = env(ENV_API_KEY) {
            config.api_key = api_key;
        }

        if let Some(timeout) = env(ENV_TIMEOUT) {
            match timeout.parse::<u64>() {
                Ok(val) => config.timeout_seconds = val,
                Err(_) => tracing::warn!("ignoring {}: not a number of seconds", ENV_TIMEOUT),
            }
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &ProviderConfig, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.url, "http://localhost:7878");
    }

    #[test]
    fn test_merge_config() {
        let mut base = ProviderConfig::default();
        base.extra_headers.insert("A".into(), "1".into());
        let mut other = ProviderConfig {
            url: "http://radarr:7878".to_string(),
            ..Default::default()
        };
        other.extra_headers.insert("B".into(), "2".into());

        let merged = ConfigLoader::merge_config(base, other);
        assert_eq!(merged.url, "http://radarr:7878");
        assert_eq!(merged.extra_headers.len(), 2);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_URL, "http://env:7878"),
            (ENV_API_KEY, "from-env"),
            (ENV_TIMEOUT, "five"),
        ]
        .into_iter()
        .collect();

        let config = ConfigLoader::apply_env_overrides(ProviderConfig::default(), |k| {
            env.get(k).map(|v| v.to_string())
        });

        assert_eq!(config.url, "http://env:7878");
        assert_eq!(config.api_key, "from-env");
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = ProviderConfig {
            api_key: "abc".to_string(),
            timeout_seconds: 10,
            ..Default::default()
        };
        ConfigLoader::save(&config, &path).unwrap();
        assert_eq!(ConfigLoader::load_file(&path).unwrap(), config);
    }

    #[test]
    fn test_check() {
        let mut config = ProviderConfig::default();
        assert!(ConfigLoader::check(&config).is_err());

        config.api_key = "abc".to_string();
        assert!(ConfigLoader::check(&config).is_ok());

        config.url = "localhost".to_string();
        assert!(ConfigLoader::check(&config).is_err());
    }
}
