use std::path::Path;

use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReconConfig {
    #[serde(default)]
    pub tolerance: ToleranceConfig,
    #[serde(default)]
    pub mrz: MrzConfig,
}

// ---------------------------------------------------------------------------
// Tolerance
// ---------------------------------------------------------------------------

/// Absolute slack used by the tax consistency checks.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToleranceConfig {
    /// Added on both sides of the rate-based checks, on top of the
    /// relative epsilon derived from the tax total.
    #[serde(default = "default_rate_slack")]
    pub rate_slack: f64,
    /// Maximum distance between `taxes + total_excl` and `total_incl`.
    #[serde(default = "default_sum_slack")]
    pub sum_slack: f64,
}

fn default_rate_slack() -> f64 {
    0.02
}

fn default_sum_slack() -> f64 {
    0.01
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            rate_slack: default_rate_slack(),
            sum_slack: default_sum_slack(),
        }
    }
}

// ---------------------------------------------------------------------------
// MRZ
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MrzConfig {
    /// When false, identity documents skip the MRZ checks entirely and
    /// their checklist reports every MRZ check as failed.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for MrzConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReconError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml(&input)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        let slacks = [
            ("rate_slack", self.tolerance.rate_slack),
            ("sum_slack", self.tolerance.sum_slack),
        ];
        for (name, slack) in slacks {
            if !slack.is_finite() || slack < 0.0 {
                return Err(ReconError::ConfigValidation(format!(
                    "tolerance.{name} must be a non-negative number, got {slack}"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
