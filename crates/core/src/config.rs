use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::store::{default_stores, CanonicalStore};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Keyword tables, thresholds and the merchant dictionary used by the
/// field extractors. Read-only once an extractor is built from it.
///
/// Every field falls back to the built-in default when absent from TOML, so an
/// override file only needs the tables it changes:
///
/// ```toml
/// store_match_threshold = 0.6
///
/// [[stores]]
/// name = "VINMART"
/// variants = ["VINMART", "VIN MART"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub stores: Vec<CanonicalStore>,
    /// A dictionary match must score strictly above this ratio.
    pub store_match_threshold: f32,
    /// Store-type words that precede a merchant name ("siêu thị ...").
    pub store_keywords: Vec<String>,
    /// Words marking the line that carries the grand total.
    pub total_keywords: Vec<String>,
    /// Lines containing these are never mined for a last-resort total.
    pub address_keywords: Vec<String>,
    /// Words that introduce an address when no ADDRESS region was recognized.
    pub address_anchor_keywords: Vec<String>,
    pub min_amount: i64,
    pub max_amount: i64,
    /// ADDRESS fragments must be longer than this (trimmed, in characters).
    pub min_address_fragment_len: usize,
    /// Detections scored below this are dropped before recognition.
    pub min_detection_confidence: f32,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            stores: default_stores(),
            store_match_threshold: 0.55,
            store_keywords: strings(&[
                "cửa hàng",
                "siêu thị",
                "sieu thi",
                "cua hang",
                "mart",
                "shop",
                "store",
            ]),
            total_keywords: strings(&[
                "tổng",
                "tong",
                "total",
                "thanh toán",
                "thanh toan",
                "cộng",
                "phải trả",
            ]),
            address_keywords: strings(&["đường", "phố", "địa chỉ", "số", "đc", "phường", "quận"]),
            address_anchor_keywords: strings(&[
                "địa chỉ",
                "dia chi",
                "đc",
                "đ/c",
                "address",
            ]),
            min_amount: 1_000,
            max_amount: 100_000_000,
            min_address_fragment_len: 3,
            min_detection_confidence: 0.0,
        }
    }
}

impl ExtractionConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        let config: ExtractionConfig = toml::from_str(toml_content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// The store dictionary replaced, everything else default.
    pub fn with_stores(stores: Vec<CanonicalStore>) -> Self {
        Self { stores, ..Self::default() }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.store_match_threshold) {
            return Err(ConfigError::Invalid(format!(
                "store_match_threshold must lie in [0, 1], got {}",
                self.store_match_threshold
            )));
        }
        if self.min_amount <= 0 || self.min_amount > self.max_amount {
            return Err(ConfigError::Invalid(format!(
                "amount bounds [{}, {}] are not a positive range",
                self.min_amount, self.max_amount
            )));
        }
        if let Some(store) = self.stores.iter().find(|s| s.variants.is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "store '{}' has no variants",
                store.name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_bounds() {
        let c = ExtractionConfig::default();
        assert_eq!(c.min_amount, 1_000);
        assert_eq!(c.max_amount, 100_000_000);
        assert_eq!(c.store_match_threshold, 0.55);
        assert!(c.address_keywords.iter().any(|k| k == "số"));
        assert!(!c.stores.is_empty());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let c = ExtractionConfig::from_toml(
            r#"
            store_match_threshold = 0.7

            [[stores]]
            name = "VINMART"
            variants = ["VINMART", "VIN MART"]
            "#,
        )
        .unwrap();
        assert_eq!(c.store_match_threshold, 0.7);
        assert_eq!(c.stores.len(), 1);
        assert_eq!(c.stores[0].variants, vec!["VINMART", "VIN MART"]);
        assert_eq!(c.total_keywords, ExtractionConfig::default().total_keywords);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(ExtractionConfig::from_toml("").unwrap(), ExtractionConfig::default());
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = ExtractionConfig::from_toml("store_match_threshold = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_inverted_amount_bounds() {
        let err = ExtractionConfig::from_toml("min_amount = 500\nmax_amount = 100").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_store_without_variants() {
        let err = ExtractionConfig::from_toml("[[stores]]\nname = \"X\"\nvariants = []").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extraction.toml");
        std::fs::write(&path, "min_amount = 2000").unwrap();
        let c = ExtractionConfig::load(&path).unwrap();
        assert_eq!(c.min_amount, 2000);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = ExtractionConfig::load(Path::new("/nonexistent/extraction.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
