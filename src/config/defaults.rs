//! Default configuration values

use super::schema::ProviderConfig;

/// Get the default configuration
pub fn default_config() -> ProviderConfig {
    ProviderConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = default_config();
        assert_eq!(config.url, "http://localhost:7878");
        assert!(config.extra_headers.is_empty());
    }
}
