//! Fluent builder for constructing a [`Simulation`].

use std::sync::Arc;

use chrono::Utc;
use log::info;
use wsn_core::{SimConfig, SimRng, Step};
use wsn_network::{NetworkState, initialize};
use wsn_sensor::{Sensor, initialize_sensors};

use crate::{SimResult, Simulation};

/// Offset for the sensor RNG stream derived from the root seed.
const SENSOR_STREAM: u64 = 0x5E45;

/// Fluent builder for [`Simulation`].
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                                         |
/// |-------------------------|-------------------------------------------------|
/// | `.initial_network(n)`   | `initialize(config.default_node_count, rng)`    |
/// | `.initial_sensors(v)`   | `initialize_sensors(config.sensor_count, ...)`  |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig { seed: Some(7), ..Default::default() })
///     .build()?;
/// sim.tick(TickAction::Regular);
/// ```
pub struct SimBuilder {
    config:  SimConfig,
    network: Option<NetworkState>,
    sensors: Option<Vec<Sensor>>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, network: None, sensors: None }
    }

    /// Start from a hand-built network instead of a random one.
    pub fn initial_network(mut self, network: NetworkState) -> Self {
        self.network = Some(network);
        self
    }

    /// Start from a hand-built sensor fleet instead of a random one.
    pub fn initial_sensors(mut self, sensors: Vec<Sensor>) -> Self {
        self.sensors = Some(sensors);
        self
    }

    /// Validate the config, seed the RNG streams, and fill in any missing
    /// state.  The result is stopped at step 0.
    pub fn build(self) -> SimResult<Simulation> {
        self.config.validate()?;

        let mut rng = SimRng::from_seed_or_entropy(self.config.seed);
        let mut sensor_rng = rng.child(SENSOR_STREAM);

        let network = match self.network {
            Some(n) => n,
            None => initialize(self.config.default_node_count, &mut rng),
        };
        let sensors = match self.sensors {
            Some(s) => s,
            None => initialize_sensors(self.config.sensor_count, &mut sensor_rng, Utc::now()),
        };

        info!(
            "simulation built: {} nodes, {} sensors, tick every {} ms",
            network.len(),
            sensors.len(),
            self.config.tick_interval_ms
        );

        Ok(Simulation {
            config:   self.config,
            rng,
            sensor_rng,
            network:  Arc::new(network),
            sensors:  Arc::new(sensors),
            forecast: None,
            step:     Step::ZERO,
            running:  false,
            epoch:    0,
        })
    }
}
