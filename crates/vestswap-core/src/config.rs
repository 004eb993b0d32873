//! # Protocol Configuration
//!
//! Deployment parameters for the reference engines. Off-chain builds can load
//! and save them as TOML.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_STEP_DURATION, MAX_FEE_PERCENTAGE};
use crate::errors::{CoreError, CoreResult};

/// Parameters applied when escrows and markets are created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Length of one vesting step in seconds
    pub step_duration_secs: i64,

    /// Ceiling for any fee percentage a market owner may set
    pub max_fee_percentage: u8,

    /// Fee percentage new markets start with
    pub default_fee_percentage: u8,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            step_duration_secs: DEFAULT_STEP_DURATION,
            max_fee_percentage: MAX_FEE_PERCENTAGE,
            default_fee_percentage: 0,
        }
    }
}

impl ProtocolConfig {
    pub fn with_step_duration(mut self, secs: i64) -> Self {
        self.step_duration_secs = secs;
        self
    }

    pub fn with_max_fee_percentage(mut self, pct: u8) -> Self {
        self.max_fee_percentage = pct;
        self
    }

    pub fn with_default_fee_percentage(mut self, pct: u8) -> Self {
        self.default_fee_percentage = pct;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.step_duration_secs <= 0 {
            return Err(CoreError::invalid_config(format!(
                "step_duration_secs must be greater than 0, got {}",
                self.step_duration_secs
            )));
        }

        if self.max_fee_percentage > MAX_FEE_PERCENTAGE {
            return Err(CoreError::invalid_config(format!(
                "max_fee_percentage must be at most {}, got {}",
                MAX_FEE_PERCENTAGE, self.max_fee_percentage
            )));
        }

        if self.default_fee_percentage > self.max_fee_percentage {
            return Err(CoreError::invalid_config(format!(
                "default_fee_percentage {} exceeds max_fee_percentage {}",
                self.default_fee_percentage, self.max_fee_percentage
            )));
        }

        Ok(())
    }
}

#[cfg(feature = "client")]
impl ProtocolConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        let config: ProtocolConfig = toml::from_str(content)
            .map_err(|e| CoreError::invalid_config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::invalid_config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> CoreResult<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| CoreError::invalid_config(format!("failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            CoreError::invalid_config(format!("failed to write {}: {}", path.display(), e))
        })
    }
}
