//! Initial sensor deployment.

use chrono::{DateTime, Utc};
use log::info;
use wsn_core::{NodeId, SensorId, SimRng};

use crate::{Sensor, SensorKind, SensorValue};

/// Room labels, three sensors per room in deployment order.
pub const LOCATIONS: [&str; 6] = ["Living Room", "Kitchen", "Bedroom", "Bathroom", "Garage", "Garden"];

const SENSORS_PER_LOCATION: usize = 3;
const ACTIVE_PROBABILITY: f64 = 0.9;
const INITIAL_BATTERY_PERCENT: std::ops::Range<u32> = 50..100;

/// Deploy `count` sensors.
///
/// Kinds cycle through [`SensorKind::ALL`]; sensor `i` (0-based) is hosted
/// on node `i + 1` and placed in room `i / 3`, with anything past the last
/// room kept in the last room.
pub fn initialize_sensors(count: usize, rng: &mut SimRng, now: DateTime<Utc>) -> Vec<Sensor> {
    let sensors: Vec<Sensor> = (0..count)
        .map(|i| {
            let kind = SensorKind::ALL[i % SensorKind::ALL.len()];
            let location = LOCATIONS[(i / SENSORS_PER_LOCATION).min(LOCATIONS.len() - 1)];
            Sensor {
                id:          SensorId::from_offset(i),
                node_id:     NodeId::from_offset(i),
                kind,
                value:       initial_value(kind, rng),
                location:    location.to_owned(),
                active:      rng.gen_bool(ACTIVE_PROBABILITY),
                battery:     f64::from(rng.gen_range(INITIAL_BATTERY_PERCENT)),
                last_update: now,
            }
        })
        .collect();

    info!(
        "deployed {} sensors ({} active)",
        sensors.len(),
        sensors.iter().filter(|s| s.active).count()
    );
    sensors
}

fn initial_value(kind: SensorKind, rng: &mut SimRng) -> SensorValue {
    match kind {
        SensorKind::Temperature => SensorValue::Numeric(rng.gen_range(20.0..30.0)),
        SensorKind::Humidity    => SensorValue::Numeric(rng.gen_range(30.0..80.0)),
        SensorKind::Gas         => SensorValue::Numeric(rng.gen_range(100.0..400.0)),
        SensorKind::Motion      => SensorValue::Binary(rng.gen_bool(0.3)),
        SensorKind::Light       => SensorValue::Numeric(rng.gen_range(0.0..1000.0)),
        SensorKind::Door        => SensorValue::Binary(rng.gen_bool(0.2)),
    }
}
