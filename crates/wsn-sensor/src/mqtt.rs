//! Synthetic MQTT publications for the sensor log view.
//!
//! Nothing is published anywhere; this only renders what a broker would
//! have seen from the current fleet.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;
use wsn_core::SimRng;

use crate::{Sensor, SensorKind};

/// Root of every sensor topic.
pub const TOPIC_ROOT: &str = "home/sensors";

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MqttMessage {
    pub timestamp: DateTime<Utc>,
    pub topic:     String,
    /// JSON document.
    pub payload:   String,
}

/// Generate `count` messages for sensors of `kind`.
///
/// Each message comes from a random active sensor of that kind.  With no
/// such sensor every message is an error notice on the `unknown` topic.
pub fn mqtt_messages(
    sensors: &[Sensor],
    kind:    SensorKind,
    count:   usize,
    rng:     &mut SimRng,
    now:     DateTime<Utc>,
) -> Vec<MqttMessage> {
    let relevant: Vec<&Sensor> = sensors
        .iter()
        .filter(|s| s.kind == kind && s.active)
        .collect();

    (0..count)
        .map(|_| match rng.choose_index(relevant.len()) {
            None => MqttMessage {
                timestamp: now,
                topic:     format!("{TOPIC_ROOT}/{kind}/unknown"),
                payload:   json!({ "error": format!("No active {kind} sensors") }).to_string(),
            },
            Some(k) => {
                let sensor = relevant[k];
                let payload = json!({
                    "value":     sensor.value.to_json(),
                    "battery":   sensor.battery,
                    "nodeId":    sensor.node_id.0,
                    "timestamp": now.to_rfc3339_opts(SecondsFormat::Millis, true),
                });
                MqttMessage {
                    timestamp: now,
                    topic:     format!("{TOPIC_ROOT}/{kind}/{}", sensor.id.0),
                    payload:   payload.to_string(),
                }
            }
        })
        .collect()
}
