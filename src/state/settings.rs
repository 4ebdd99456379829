use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::processing::boxplot::DEFAULT_WHISKER;
use crate::processing::histogram::BinRule;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("cannot read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Validation(String),
}

/// Presentation knobs for an analysis. Every field has a default, so a
/// settings file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Decimal places in text reports.
    pub precision: usize,
    /// Whisker reach of the boxplot, in IQRs.
    pub whisker: f64,
    pub bins: BinRule,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            precision: 2,
            whisker: DEFAULT_WHISKER,
            bins: BinRule::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        tracing::info!("Settings loaded from {:?}", path);
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.whisker.is_finite() || self.whisker < 0.0 {
            return Err(SettingsError::Validation(format!(
                "whisker must be a non-negative number, got {}",
                self.whisker
            )));
        }
        if self.bins == BinRule::Fixed(0) {
            return Err(SettingsError::Validation(
                "fixed bin count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "precision": 4 }"#).unwrap();
        assert_eq!(settings.precision, 4);
        assert_eq!(settings.whisker, 1.5);
        assert_eq!(settings.bins, BinRule::Auto);
    }

    #[test]
    fn bin_rules_deserialize() {
        let settings = Settings::from_json(r#"{ "bins": { "fixed": 10 } }"#).unwrap();
        assert_eq!(settings.bins, BinRule::Fixed(10));
        let settings = Settings::from_json(r#"{ "bins": "sturges" }"#).unwrap();
        assert_eq!(settings.bins, BinRule::Sturges);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{ "whisker": -1.0 }"#),
            Err(SettingsError::Validation(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "bins": { "fixed": 0 } }"#),
            Err(SettingsError::Validation(_))
        ));
        assert!(matches!(Settings::from_json("{"), Err(SettingsError::Parse(_))));
    }
}
