//! The command channel vocabulary.

use std::fmt;
use std::str::FromStr;

use wsn_core::WsnError;
use wsn_network::{RotationReport, TickReport};

use crate::StepReport;

/// What a tick does besides advancing the step counter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TickAction {
    /// Battery drain, depletion, succession, traffic accounting.
    #[default]
    Regular,
    /// Proactive rotation of low-battery heads; no drain.
    RotateClusterHeads,
    /// Compute an energy forecast for rendering; the model is untouched.
    PredictEnergy,
}

impl TickAction {
    pub fn as_str(self) -> &'static str {
        match self {
            TickAction::Regular            => "regular",
            TickAction::RotateClusterHeads => "rotate-cluster-heads",
            TickAction::PredictEnergy      => "predict-energy",
        }
    }
}

impl fmt::Display for TickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TickAction {
    type Err = WsnError;

    /// Accepts the kebab-case label, the camelCase action name, or a short
    /// alias (`rotate`, `predict`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "regular" => Ok(TickAction::Regular),
            "rotate" | "rotate-cluster-heads" | "rotateClusterHeads" => {
                Ok(TickAction::RotateClusterHeads)
            }
            "predict" | "predict-energy" | "predictEnergy" => Ok(TickAction::PredictEnergy),
            other => Err(WsnError::Parse(format!("unknown tick action '{other}'"))),
        }
    }
}

/// A request to mutate the simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replace network and sensors with fresh ones of the given node count.
    Initialize(usize),
    Tick(TickAction),
    /// Re-initialize with the default node count and stop running.
    Reset,
    /// Replace the network only; sensors and step counter are kept.
    SetNodeCount(usize),
    ToggleRunning,
    RefreshSensors,
}

/// What executing a [`Command`] produced.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Initialized { nodes: usize, sensors: usize },
    Stepped(StepReport),
    RunningChanged(bool),
    SensorsRefreshed(usize),
}

impl Outcome {
    pub fn tick_report(&self) -> Option<&TickReport> {
        match self {
            Outcome::Stepped(r) => r.tick.as_ref(),
            _ => None,
        }
    }

    pub fn rotation_report(&self) -> Option<&RotationReport> {
        match self {
            Outcome::Stepped(r) => r.rotation.as_ref(),
            _ => None,
        }
    }
}
