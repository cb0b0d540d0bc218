//! Analysis configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tuning for [`Kasiski`](crate::Kasiski) examination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KasiskiConfig {
    /// Smallest candidate period
    pub min_period: usize,
    /// Largest candidate period, inclusive
    pub max_period: usize,
    /// Length of the repeated substrings searched for
    pub trigram: usize,
}

impl Default for KasiskiConfig {
    fn default() -> Self {
        Self {
            min_period: 2,
            max_period: 20,
            trigram: 3,
        }
    }
}

impl KasiskiConfig {
    /// Upper bound for `max_period`; one score is kept per candidate period.
    pub const MAX_PERIOD: usize = 1000;

    pub fn validate(&self) -> Result<()> {
        if self.min_period < 2 {
            return Err(Error::InvalidConfig(format!(
                "min_period must be >= 2, got {}",
                self.min_period
            )));
        }
        if self.max_period < self.min_period {
            return Err(Error::InvalidConfig(format!(
                "max_period {} is below min_period {}",
                self.max_period, self.min_period
            )));
        }
        if self.max_period > Self::MAX_PERIOD {
            return Err(Error::InvalidConfig(format!(
                "max_period must be <= {}, got {}",
                Self::MAX_PERIOD,
                self.max_period
            )));
        }
        if self.trigram < 2 {
            return Err(Error::InvalidConfig("repeat length must be >= 2".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = KasiskiConfig::default();
        assert_eq!(config.min_period, 2);
        assert_eq!(config.max_period, 20);
        assert_eq!(config.trigram, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: KasiskiConfig = serde_json::from_str(r#"{"max_period": 12}"#).unwrap();
        assert_eq!(config.max_period, 12);
        assert_eq!(config.min_period, 2);
    }

    #[test]
    fn test_rejects_inverted_range() {
        let config = KasiskiConfig {
            min_period: 8,
            max_period: 4,
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().kind(), crate::ErrorKind::Request);
        let config = KasiskiConfig {
            min_period: 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_period_range() {
        let config: KasiskiConfig =
            serde_json::from_str(r#"{"max_period": 18446744073709551615}"#).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_period must be <= 1000"));
        assert!(crate::Kasiski::analyze_with("ABCDEFABC", &config).is_err());

        let config = KasiskiConfig {
            max_period: KasiskiConfig::MAX_PERIOD,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
