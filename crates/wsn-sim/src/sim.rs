//! The `Simulation` context and its command handlers.

use std::sync::Arc;

use chrono::Utc;
use log::{debug, info};
use wsn_core::{SimConfig, SimRng, Step};
use wsn_network::{
    EnergyForecast, NetworkState, RotationReport, TickReport, initialize, rotate_cluster_heads,
};
use wsn_sensor::{Sensor, initialize_sensors, refresh_sensors};

use crate::{Command, Outcome, SimObserver, Snapshot, TickAction};

/// Proof that a periodic tick was armed under the current run.
///
/// Issued by [`Simulation::tick_token`] and redeemed by
/// [`Simulation::scheduled_tick`].  Stopping, resetting or re-initializing
/// advances the run epoch, which invalidates every outstanding token.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TickToken(u64);

/// Summary of one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    /// Step counter after this tick.
    pub step:                  Step,
    pub action:                TickAction,
    /// Present for `Regular` ticks.
    pub tick:                  Option<TickReport>,
    /// Present for `RotateClusterHeads` ticks.
    pub rotation:              Option<RotationReport>,
    /// Sensors refreshed as a side effect of this tick.
    pub sensors_refreshed:     usize,
    pub active_nodes:          usize,
    pub active_heads:          usize,
    pub messages_transmitted:  u64,
    pub total_energy_consumed: f64,
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// The simulation context.
///
/// Holds all mutable simulation state and is the only thing allowed to
/// change it.  Create via [`SimBuilder`][crate::SimBuilder].
pub struct Simulation {
    pub(crate) config:     SimConfig,
    pub(crate) rng:        SimRng,
    /// Separate stream so node-count changes do not shift sensor values.
    pub(crate) sensor_rng: SimRng,
    pub(crate) network:    Arc<NetworkState>,
    pub(crate) sensors:    Arc<Vec<Sensor>>,
    pub(crate) forecast:   Option<Arc<EnergyForecast>>,
    pub(crate) step:       Step,
    pub(crate) running:    bool,
    pub(crate) epoch:      u64,
}

impl Simulation {
    // ── Query surface ─────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn network(&self) -> &NetworkState {
        &self.network
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn forecast(&self) -> Option<&EnergyForecast> {
        self.forecast.as_deref()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            step:     self.step,
            running:  self.running,
            network:  Arc::clone(&self.network),
            sensors:  Arc::clone(&self.sensors),
            forecast: self.forecast.clone(),
        }
    }

    // ── Command dispatch ──────────────────────────────────────────────────

    /// Execute `command` and notify `observer`.
    pub fn execute<O: SimObserver>(&mut self, command: Command, observer: &mut O) -> Outcome {
        match command {
            Command::Initialize(n) => {
                self.initialize(n);
                observer.on_initialized(&self.snapshot());
                self.initialized_outcome()
            }
            Command::Reset => {
                let was_running = self.running;
                self.reset();
                if was_running {
                    observer.on_running_changed(self.step, false);
                }
                observer.on_initialized(&self.snapshot());
                self.initialized_outcome()
            }
            Command::SetNodeCount(n) => {
                self.set_node_count(n);
                observer.on_initialized(&self.snapshot());
                self.initialized_outcome()
            }
            Command::Tick(action) => {
                let report = self.tick(action);
                self.notify_step(&report, observer);
                Outcome::Stepped(report)
            }
            Command::ToggleRunning => {
                let running = self.toggle_running();
                observer.on_running_changed(self.step, running);
                Outcome::RunningChanged(running)
            }
            Command::RefreshSensors => Outcome::SensorsRefreshed(self.refresh_sensors()),
        }
    }

    /// Run `n` regular ticks back to back, ignoring the running flag.
    ///
    /// Useful for tests and batch runs.
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> Vec<StepReport> {
        (0..n)
            .map(|_| {
                let report = self.tick(TickAction::Regular);
                self.notify_step(&report, observer);
                report
            })
            .collect()
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Fresh network of `node_count` nodes plus a fresh sensor fleet; step
    /// counter back to zero.
    pub fn initialize(&mut self, node_count: usize) {
        self.network = Arc::new(initialize(node_count, &mut self.rng));
        self.sensors = Arc::new(initialize_sensors(
            self.config.sensor_count,
            &mut self.sensor_rng,
            Utc::now(),
        ));
        self.forecast = None;
        self.step = Step::ZERO;
        self.epoch += 1;
    }

    /// Stop ticking and re-initialize with the configured default size.
    pub fn reset(&mut self) {
        info!("resetting simulation at {}", self.step);
        self.running = false;
        self.initialize(self.config.default_node_count);
    }

    /// Replace the network with `node_count` fresh nodes.
    pub fn set_node_count(&mut self, node_count: usize) {
        info!("node count set to {node_count}");
        self.network = Arc::new(initialize(node_count, &mut self.rng));
        self.forecast = None;
        self.epoch += 1;
    }

    /// Flip the running flag and return the new value.  Either direction
    /// invalidates outstanding tick tokens.
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        self.epoch += 1;
        info!(
            "simulation {} at {}",
            if self.running { "started" } else { "stopped" },
            self.step
        );
        self.running
    }

    /// Perturb all active sensors.  Returns how many were refreshed.
    pub fn refresh_sensors(&mut self) -> usize {
        let mut next: Vec<Sensor> = self.sensors.as_ref().clone();
        let refreshed = refresh_sensors(&mut next, &mut self.sensor_rng, Utc::now());
        self.sensors = Arc::new(next);
        refreshed
    }

    /// Advance one step.
    ///
    /// Sensors are refreshed when the step counter, before incrementing, is
    /// a multiple of `sensor_refresh_interval`.
    pub fn tick(&mut self, action: TickAction) -> StepReport {
        let mut tick = None;
        let mut rotation = None;

        match action {
            TickAction::Regular => {
                let mut next = NetworkState::clone(&self.network);
                tick = Some(wsn_network::tick(&mut next, &mut self.rng));
                self.network = Arc::new(next);
            }
            TickAction::RotateClusterHeads => {
                let mut next = NetworkState::clone(&self.network);
                rotation = Some(rotate_cluster_heads(&mut next));
                self.network = Arc::new(next);
            }
            TickAction::PredictEnergy => {
                self.forecast = Some(Arc::new(EnergyForecast::from_state(&self.network)));
            }
        }

        let sensors_refreshed = if self.step.is_multiple_of(self.config.sensor_refresh_interval) {
            self.refresh_sensors()
        } else {
            0
        };
        self.step = self.step.next();

        let report = StepReport {
            step: self.step,
            action,
            tick,
            rotation,
            sensors_refreshed,
            active_nodes: self.network.active_count(),
            active_heads: self.network.active_head_count(),
            messages_transmitted: self.network.messages_transmitted,
            total_energy_consumed: self.network.total_energy_consumed,
        };
        debug!(
            "{} {}: {} active, {} heads, {} msgs, {:.2} energy",
            report.step,
            action,
            report.active_nodes,
            report.active_heads,
            report.messages_transmitted,
            report.total_energy_consumed
        );
        report
    }

    // ── Periodic ticking ──────────────────────────────────────────────────

    /// Token for arming the next periodic tick, or `None` when stopped.
    pub fn tick_token(&self) -> Option<TickToken> {
        self.running.then_some(TickToken(self.epoch))
    }

    /// Apply a periodic regular tick armed with `token`.
    ///
    /// Returns `None` without touching any state if the simulation was
    /// stopped, reset or re-initialized after the token was issued.
    pub fn scheduled_tick<O: SimObserver>(
        &mut self,
        token:    TickToken,
        observer: &mut O,
    ) -> Option<StepReport> {
        if !self.running || token.0 != self.epoch {
            debug!("discarding stale tick token");
            return None;
        }
        let report = self.tick(TickAction::Regular);
        self.notify_step(&report, observer);
        Some(report)
    }

    // ── Direct access ─────────────────────────────────────────────────────

    /// Mutate the network in place, outside the tick rules.  Intended for
    /// scenario set-up and tests; snapshots already handed out keep the old
    /// state.
    pub fn edit_network<F: FnOnce(&mut NetworkState)>(&mut self, f: F) {
        f(Arc::make_mut(&mut self.network));
    }

    /// Mutate the sensor fleet in place; see [`edit_network`](Self::edit_network).
    pub fn edit_sensors<F: FnOnce(&mut Vec<Sensor>)>(&mut self, f: F) {
        f(Arc::make_mut(&mut self.sensors));
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn notify_step<O: SimObserver>(&self, report: &StepReport, observer: &mut O) {
        observer.on_step_end(report);
        if self.step.is_multiple_of(self.config.output_interval_steps) {
            observer.on_snapshot(&self.snapshot());
        }
    }

    fn initialized_outcome(&self) -> Outcome {
        Outcome::Initialized {
            nodes:   self.network.len(),
            sensors: self.sensors.len(),
        }
    }
}
