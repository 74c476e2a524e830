#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_path_segment, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_COLLECTION: &str = "cargaisons";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// 後端連線設定。優先順序：命令列 > TOML 檔 > 預設值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSettings {
    pub base_url: String,
    pub collection: String,
    pub timeout_seconds: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl BackendSettings {
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        collection: Option<String>,
        timeout_seconds: Option<u64>,
    ) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if let Some(collection) = collection {
            self.collection = collection;
        }
        if let Some(timeout_seconds) = timeout_seconds {
            self.timeout_seconds = timeout_seconds;
        }
        self
    }
}

impl Validate for BackendSettings {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_path_segment("collection", &self.collection)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}

impl ConfigProvider for BackendSettings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection(&self) -> &str {
        &self.collection
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_to_local_json_server() {
        let settings = BackendSettings::default();
        assert_eq!(settings.base_url, "http://localhost:3000");
        assert_eq!(settings.collection, "cargaisons");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_overrides_only_replace_given_values() {
        let settings = BackendSettings::default().with_overrides(
            Some("https://api.example.com".to_string()),
            None,
            Some(5),
        );
        assert_eq!(settings.base_url, "https://api.example.com");
        assert_eq!(settings.collection, "cargaisons");
        assert_eq!(settings.timeout_seconds, 5);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let bad_url = BackendSettings::default().with_overrides(Some("localhost".to_string()), None, None);
        assert!(bad_url.validate().is_err());

        let zero_timeout = BackendSettings::default().with_overrides(None, None, Some(0));
        assert!(zero_timeout.validate().is_err());
    }
}
