//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PAZAR_B2B_COMMISSION_RATE` - Business commission rate in `[0, 1]` (default: 0.30)
//! - `PAZAR_B2C_COMMISSION_RATE` - Consumer commission rate in `[0, 1]` (default: 0.50)
//! - `PAZAR_DEFAULT_REGIONAL_MULTIPLIER` - Multiplier used when a region has
//!   none, in `[0.5, 2.0]` (default: 1.0)

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::pricing::{
    CommissionOverrides, CommissionRates, get_default_regional_multiplier,
    is_valid_commission_rate, is_valid_regional_multiplier,
};

const B2B_RATE_VAR: &str = "PAZAR_B2B_COMMISSION_RATE";
const B2C_RATE_VAR: &str = "PAZAR_B2C_COMMISSION_RATE";
const MULTIPLIER_VAR: &str = "PAZAR_DEFAULT_REGIONAL_MULTIPLIER";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Commission overrides; `None` fields fall back to the defaults
    pub commission: CommissionOverrides,
    /// Regional multiplier applied when a region does not set one
    pub default_regional_multiplier: Decimal,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            commission: CommissionOverrides::default(),
            default_regional_multiplier: get_default_regional_multiplier(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but is not a decimal or is
    /// outside its allowed range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let b2b_rate = get_optional_decimal(&lookup, B2B_RATE_VAR)?;
        let b2c_rate = get_optional_decimal(&lookup, B2C_RATE_VAR)?;
        for (key, rate) in [(B2B_RATE_VAR, b2b_rate), (B2C_RATE_VAR, b2c_rate)] {
            if let Some(rate) = rate
                && !is_valid_commission_rate(rate)
            {
                return Err(ConfigError::InvalidEnvVar(
                    key.to_string(),
                    format!("commission rate {rate} is outside [0, 1]"),
                ));
            }
        }

        let default_regional_multiplier = match get_optional_decimal(&lookup, MULTIPLIER_VAR)? {
            Some(multiplier) if !is_valid_regional_multiplier(multiplier) => {
                return Err(ConfigError::InvalidEnvVar(
                    MULTIPLIER_VAR.to_string(),
                    format!("regional multiplier {multiplier} is outside [0.5, 2.0]"),
                ));
            }
            Some(multiplier) => multiplier,
            None => get_default_regional_multiplier(),
        };

        Ok(Self {
            commission: CommissionOverrides { b2b_rate, b2c_rate },
            default_regional_multiplier,
        })
    }

    /// Effective commission rates after overrides.
    #[must_use]
    pub fn commission_rates(&self) -> CommissionRates {
        CommissionRates::with_overrides(Some(&self.commission))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional decimal variable; blank counts as unset.
fn get_optional_decimal(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<Decimal>, ConfigError> {
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .map(|value| {
            Decimal::from_str(value.trim())
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}
