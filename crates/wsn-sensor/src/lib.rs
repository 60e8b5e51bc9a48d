//! `wsn-sensor`: the smart-home sensor fleet.
//!
//! Sensors are logically hosted on nodes (`node_id`) but simulated on their
//! own: their battery decays through [`refresh_sensors`], not through the
//! network tick, and nothing here reads or writes `wsn-network` state.

pub mod fleet;
pub mod mqtt;
pub mod refresh;
pub mod sensor;

#[cfg(test)]
mod tests;

pub use fleet::{LOCATIONS, initialize_sensors};
pub use mqtt::{MqttMessage, mqtt_messages};
pub use refresh::refresh_sensors;
pub use sensor::{Sensor, SensorKind, SensorValue};
