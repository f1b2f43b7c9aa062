//! Data models and configuration
//!
//! Defines the validated analysis results returned to callers and the
//! environment-sourced configuration used to reach the Gemini API.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Food names recognised in a photo, in the order the model listed them.
pub type FoodNameList = Vec<String>;

/// One validated nutrition record.
///
/// `name` carries the food and its serving size (for example `"쌀밥 (210g)"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionItem {
    pub name: String,
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

pub type NutritionList = Vec<NutritionItem>;

/// Status and body of a remote model response, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-05-20";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` when `GEMINI_API_KEY` is unset or blank.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub request_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = match non_blank("GEMINI_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                crate::Error::Config(format!("GEMINI_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let max_upload_bytes = match non_blank("MAX_UPLOAD_BYTES") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                crate::Error::Config(format!("MAX_UPLOAD_BYTES is not a number: {}", raw))
            })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            gemini_api_key: non_blank("GEMINI_API_KEY").map(|v| v.trim().to_string()),
            gemini_model: non_blank("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: non_blank("GEMINI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
            max_upload_bytes,
        })
    }

    /// Returns the credential, or a configuration error when it is absent.
    pub fn api_key(&self) -> crate::Result<&str> {
        self.gemini_api_key
            .as_deref()
            .ok_or_else(|| crate::Error::Config("GEMINI_API_KEY is not set".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_is_empty() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.gemini_model, DEFAULT_MODEL);
        assert_eq!(config.gemini_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn test_blank_api_key_counts_as_absent() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "   ")])).unwrap();
        let err = config.api_key().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigError);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("GEMINI_BASE_URL", "http://localhost:9000/"),
            ("GEMINI_TIMEOUT_SECS", "5"),
            ("MAX_UPLOAD_BYTES", "1024"),
        ]))
        .unwrap();

        assert_eq!(config.api_key().unwrap(), "secret");
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.gemini_base_url, "http://localhost:9000");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.max_upload_bytes, 1024);
    }

    #[test]
    fn test_invalid_timeout_is_config_error() {
        let err = Config::from_lookup(lookup_from(&[("GEMINI_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigError);
    }

    #[test]
    fn test_nutrition_item_serialization() {
        let item = NutritionItem {
            name: "쌀밥 (210g)".to_string(),
            calories: 310.0,
            carbs: 68.0,
            protein: 6.0,
            fat: 1.0,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["name"], "쌀밥 (210g)");
        assert_eq!(json["calories"], 310.0);
        assert_eq!(json["fat"], 1.0);
    }
}
