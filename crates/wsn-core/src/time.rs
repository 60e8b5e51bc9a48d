//! Simulation step counter and runtime configuration.
//!
//! # Design
//!
//! Simulated time is a bare `Step` counter.  The mapping to wall time is
//! only the driver cadence (`tick_interval_ms`), which matters to the
//! periodic driver and nothing else: the model itself never reads a clock
//! to decide what happens on a step.

use std::fmt;

use crate::{WsnError, WsnResult};

// ── Step ──────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.  Reset to zero on full reset.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step(pub u64);

impl Step {
    pub const ZERO: Step = Step(0);

    /// The step after `self`.
    #[inline]
    pub fn next(self) -> Step {
        Step(self.0 + 1)
    }

    /// `true` when this step falls on an `interval` boundary.  An interval
    /// of zero never matches.
    #[inline]
    pub fn is_multiple_of(self, interval: u64) -> bool {
        interval > 0 && self.0 % interval == 0
    }
}

impl std::ops::Add<u64> for Step {
    type Output = Step;
    #[inline]
    fn add(self, rhs: u64) -> Step {
        Step(self.0 + rhs)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a TOML file by the application crate and passed to
/// the simulation builder.  Every field has a default, so a config file only
/// needs to name what it overrides.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Node count used at start-up and by a full reset.
    pub default_node_count: usize,

    /// Size of the sensor fleet created at start-up and on reset.
    pub sensor_count: usize,

    /// Wall-clock milliseconds between periodic ticks while running.
    pub tick_interval_ms: u64,

    /// Refresh sensors on every step that is a multiple of this.
    pub sensor_refresh_interval: u64,

    /// Emit an observer snapshot every N steps.  0 disables snapshots.
    pub output_interval_steps: u64,

    /// Master RNG seed.  `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            default_node_count:      20,
            sensor_count:            18,
            tick_interval_ms:        2_000,
            sensor_refresh_interval: 5,
            output_interval_steps:   1,
            seed:                    None,
        }
    }
}

impl SimConfig {
    /// Reject settings the driver cannot run with.
    pub fn validate(&self) -> WsnResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(WsnError::Config("tick_interval_ms must be positive".into()));
        }
        if self.sensor_refresh_interval == 0 {
            return Err(WsnError::Config(
                "sensor_refresh_interval must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Driver cadence as a `Duration`.
    #[inline]
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }
}
