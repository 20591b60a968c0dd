//! Configuration structures for the bidding engine.

use crate::error::Result;
use crate::types::{Amount, Seconds};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for an auction house deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuctionConfig {
    /// Anti-snipe clock extension.
    pub anti_snipe: AntiSnipeConfig,
    /// House-level settings.
    pub house: HouseConfig,
}

impl Default for AuctionConfig {
    fn default() -> Self {
        Self {
            anti_snipe: AntiSnipeConfig::default(),
            house: HouseConfig::default(),
        }
    }
}

impl AuctionConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Validate configuration values. Checked once, at load time.
    pub fn validate(&self) -> Result<()> {
        if self.anti_snipe.extension_secs == 0 {
            return Err(crate::Error::config("anti-snipe extension must be positive"));
        }
        if self.house.min_increment == 0 {
            return Err(crate::Error::config("minimum increment must be positive"));
        }
        if !(0.0..=100.0).contains(&self.house.commission_rate_pct) {
            return Err(crate::Error::config("commission rate must be in [0, 100]"));
        }
        Ok(())
    }
}

/// Anti-snipe configuration: a bid landing inside the threshold window
/// pushes the close out to at least `extension_secs` from now.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AntiSnipeConfig {
    /// Window before close in which a bid triggers an extension (seconds).
    pub threshold_secs: Seconds,
    /// Minimum remaining time after an extension (seconds).
    pub extension_secs: Seconds,
}

impl Default for AntiSnipeConfig {
    fn default() -> Self {
        Self {
            threshold_secs: 30,
            extension_secs: 30,
        }
    }
}

/// House-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseConfig {
    /// Display name of the house.
    pub site_title: String,
    /// Buyer commission as a percentage of the hammer price.
    pub commission_rate_pct: f64,
    /// Default bid increment for lots that do not set one.
    pub min_increment: Amount,
    /// Contact address for the house administrator.
    pub admin_email: String,
}

impl Default for HouseConfig {
    fn default() -> Self {
        Self {
            site_title: "Artemis Auctions".to_string(),
            commission_rate_pct: 15.0,
            min_increment: 500,
            admin_email: "admin@artemisauctions.com".to_string(),
        }
    }
}
