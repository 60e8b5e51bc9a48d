//! Synthetic network traffic log for the traffic analyzer view.

use std::fmt;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::json;
use wsn_core::SimRng;
use wsn_network::Node;

/// Messages are spread over this many milliseconds before `now`.
pub const TRAFFIC_WINDOW_MS: i64 = 600_000;
/// Probability that a message's type is drawn from all three kinds rather
/// than from sensor data and control only.
const ERROR_POOL_PROBABILITY: f64 = 0.1;
/// Probability that a node sends to a cluster head rather than the base
/// station.
const NODE_TO_HEAD_PROBABILITY: f64 = 0.7;

const EXTRA_SOURCES: [&str; 3] = ["Cluster Head 1", "Cluster Head 2", "Gateway"];
const BASE_STATION: &str = "Base Station";
const READING_TYPES: [&str; 5] = ["temperature", "humidity", "motion", "light", "gas"];
const COMMANDS: [&str; 5] = ["sleep", "wake", "report", "configure", "restart"];
const ERRORS: [&str; 5] = ["timeout", "low_battery", "connection_lost", "checksum_failed", "sensor_failure"];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficKind {
    SensorData,
    Control,
    Error,
}

impl TrafficKind {
    const ALL: [TrafficKind; 3] = [TrafficKind::SensorData, TrafficKind::Control, TrafficKind::Error];

    pub fn as_str(self) -> &'static str {
        match self {
            TrafficKind::SensorData => "sensor_data",
            TrafficKind::Control    => "control",
            TrafficKind::Error      => "error",
        }
    }
}

impl fmt::Display for TrafficKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrafficMessage {
    #[serde(serialize_with = "rfc3339_millis")]
    pub timestamp:   DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind:        TrafficKind,
    pub source:      String,
    pub destination: String,
    /// JSON-encoded body.
    pub message:     String,
}

/// Generate `count` random messages, newest first.
///
/// Sources are `Node <id>` for every node in `nodes` plus two cluster-head
/// labels and the gateway.  About one message in thirty is an error.
pub fn generate_traffic(
    nodes: &[Node],
    count: usize,
    rng:   &mut SimRng,
    now:   DateTime<Utc>,
) -> Vec<TrafficMessage> {
    let sources: Vec<String> = nodes
        .iter()
        .map(|n| format!("Node {}", n.id.0))
        .chain(EXTRA_SOURCES.iter().map(|s| (*s).to_owned()))
        .collect();

    let mut messages: Vec<TrafficMessage> = (0..count)
        .map(|_| {
            let pool = if rng.gen_bool(ERROR_POOL_PROBABILITY) { 3 } else { 2 };
            let kind = TrafficKind::ALL[rng.gen_range(0..pool)];
            let source_index = rng.gen_range(0..sources.len());
            let source = sources[source_index].clone();
            let destination = destination_for(source_index, nodes.len(), &sources, rng);
            let age = Duration::milliseconds(rng.gen_range(0..TRAFFIC_WINDOW_MS));

            TrafficMessage {
                timestamp: now - age,
                kind,
                source,
                destination,
                message: body(kind, rng),
            }
        })
        .collect();

    messages.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    messages
}

fn destination_for(source_index: usize, node_count: usize, sources: &[String], rng: &mut SimRng) -> String {
    if source_index < node_count {
        if rng.gen_bool(NODE_TO_HEAD_PROBABILITY) {
            format!("Cluster Head {}", rng.gen_range(1..=2))
        } else {
            BASE_STATION.to_owned()
        }
    } else if source_index < sources.len() - 1 {
        BASE_STATION.to_owned()
    } else {
        // The gateway talks to anything but itself.
        sources[rng.gen_range(0..sources.len() - 1)].clone()
    }
}

fn body(kind: TrafficKind, rng: &mut SimRng) -> String {
    let value = match kind {
        TrafficKind::SensorData => {
            let reading = READING_TYPES[rng.gen_range(0..READING_TYPES.len())];
            let value = match reading {
                "temperature" => json!(round_to(rng.gen_range(20.0..30.0), 1)),
                "humidity"    => json!(round_to(rng.gen_range(30.0..80.0), 1)),
                "gas"         => json!(rng.gen_range(100.0_f64..400.0).round()),
                "motion"      => json!(if rng.gen_bool(0.3) { "detected" } else { "none" }),
                _             => json!(rng.gen_range(0.0_f64..1000.0).round()),
            };
            json!({
                "type": reading,
                "value": value,
                "battery": rng.gen_range(70.0_f64..100.0).round(),
            })
        }
        TrafficKind::Control => json!({
            "command": COMMANDS[rng.gen_range(0..COMMANDS.len())],
            "params": { "interval": rng.gen_range(0.0_f64..60.0).round() },
        }),
        TrafficKind::Error => json!({
            "error": ERRORS[rng.gen_range(0..ERRORS.len())],
            "code": rng.gen_range(0.0_f64..100.0).round(),
        }),
    };
    value.to_string()
}

fn round_to(x: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (x * scale).round() / scale
}

fn rfc3339_millis<S: serde::Serializer>(t: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&t.to_rfc3339_opts(SecondsFormat::Millis, true))
}
