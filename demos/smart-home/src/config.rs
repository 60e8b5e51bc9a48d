//! TOML configuration for the demo binary.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use wsn_core::SimConfig;
use wsn_sim::TickAction;

/// Everything the demo reads from its config file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimConfig,
    pub demo:       DemoConfig,
}

/// Run-shape settings that are not part of the simulation model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Ticks to run in batch mode.
    pub steps:            u64,
    /// Every Nth tick rotates cluster heads instead of draining.  0 disables.
    pub rotate_every:     u64,
    /// Every Nth tick computes an energy forecast.  0 disables.
    pub predict_every:    u64,
    pub mqtt_samples:     usize,
    pub traffic_samples:  usize,
    pub output_directory: PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            steps:            60,
            rotate_every:     20,
            predict_every:    30,
            mqtt_samples:     3,
            traffic_samples:  5,
            output_directory: PathBuf::from("output"),
        }
    }
}

impl DemoConfig {
    /// Action for the tick that ends at 1-based index `n`.  Rotation wins
    /// when both schedules coincide.
    pub fn action_for(&self, n: u64) -> TickAction {
        if self.rotate_every > 0 && n % self.rotate_every == 0 {
            TickAction::RotateClusterHeads
        } else if self.predict_every > 0 && n % self.predict_every == 0 {
            TickAction::PredictEnergy
        } else {
            TickAction::Regular
        }
    }
}

impl AppConfig {
    /// Parse `text` and validate the simulation section.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(text)?;
        config.simulation.validate()?;
        Ok(config)
    }

    /// Read the file at `path`, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
