//! Engine configuration: scale, structural limits and prices.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cost::PriceTable;
use crate::errors::ConfigError;
use crate::structure::CantileverLimits;
use crate::units::Scale;

/// Immutable settings an [`Engine`](crate::Engine) is built from.
///
/// Fields missing from a JSON document keep their defaults.
///
/// # Examples
/// ```
/// use patiox::EngineConfig;
///
/// let config = EngineConfig::from_json_str(r#"{ "prices": { "engineering_fee": 650.0 } }"#)
///     .expect("valid configuration");
/// assert_eq!(config.prices.engineering_fee, 650.0);
/// assert_eq!(config.prices.post_4x4, 150.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Plan-to-feet scale.
    pub scale: Scale,
    /// Post sizing table.
    pub cantilever_limits: CantileverLimits,
    /// Unit prices and fees.
    pub prices: PriceTable,
    /// Pick radius for [`Engine::post_at`](crate::Engine::post_at), in plan units.
    pub hit_tolerance: f64,
}

impl EngineConfig {
    /// Default pick radius in plan units.
    pub const DEFAULT_HIT_TOLERANCE: f64 = 15.0;

    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the validation
    /// variants described on [`EngineConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`EngineConfig::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check the invariants the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveScale`] for an unusable scale,
    /// [`ConfigError::EmptyLimitTable`], [`ConfigError::InvalidLimit`] or
    /// [`ConfigError::UnorderedLimits`] for a bad cantilever table,
    /// [`ConfigError::NegativePrice`] for negative or non-finite prices and
    /// [`ConfigError::InvalidHitTolerance`] for an unusable pick radius.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let factor = self.scale.feet_per_unit;
        if !(factor.is_finite() && factor > 0.0) {
            return Err(ConfigError::NonPositiveScale(factor));
        }

        let limits = self.cantilever_limits.entries();
        if limits.is_empty() {
            return Err(ConfigError::EmptyLimitTable);
        }
        if let Some(limit) = limits
            .iter()
            .find(|limit| !usable_amount(limit.max_span_ft))
        {
            return Err(ConfigError::InvalidLimit(limit.max_span_ft));
        }
        for pair in limits.windows(2) {
            if pair[1].max_span_ft < pair[0].max_span_ft {
                return Err(ConfigError::UnorderedLimits {
                    previous: pair[0].max_span_ft,
                    current: pair[1].max_span_ft,
                });
            }
        }

        if let Some((name, value)) = self
            .prices
            .entries()
            .into_iter()
            .find(|(_, value)| !usable_amount(*value))
        {
            return Err(ConfigError::NegativePrice { name, value });
        }

        if !usable_amount(self.hit_tolerance) {
            return Err(ConfigError::InvalidHitTolerance(self.hit_tolerance));
        }
        Ok(())
    }
}

/// Finite and not negative.
fn usable_amount(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scale: Scale::default(),
            cantilever_limits: CantileverLimits::default(),
            prices: PriceTable::default(),
            hit_tolerance: Self::DEFAULT_HIT_TOLERANCE,
        }
    }
}
