//! Periodic sensor perturbation.

use chrono::{DateTime, Utc};
use log::debug;
use wsn_core::SimRng;

use crate::{Sensor, SensorKind, SensorValue};

/// Probability a motion sensor reads "detected" on a refresh.
pub const MOTION_PROBABILITY: f64 = 0.3;
/// Probability a door sensor flips state on a refresh.
pub const DOOR_FLIP_PROBABILITY: f64 = 0.1;
/// Battery decay per refresh is drawn from `[0, MAX_BATTERY_DECAY)`.
pub const MAX_BATTERY_DECAY: f64 = 0.5;

/// Jitter half-width and clamp bounds for a numeric kind.
fn numeric_bounds(kind: SensorKind) -> Option<(f64, f64, f64)> {
    match kind {
        SensorKind::Temperature => Some((1.0, 10.0, 35.0)),
        SensorKind::Humidity    => Some((2.5, 10.0, 95.0)),
        SensorKind::Gas         => Some((25.0, 50.0, 800.0)),
        SensorKind::Light       => Some((50.0, 0.0, 1000.0)),
        SensorKind::Motion | SensorKind::Door => None,
    }
}

/// Perturb every active sensor in place.  Returns how many were refreshed.
///
/// Each sensor is independent: no cross-sensor coupling and no dependence
/// on node state.  Inactive sensors are left untouched, including their
/// timestamp.
pub fn refresh_sensors(sensors: &mut [Sensor], rng: &mut SimRng, now: DateTime<Utc>) -> usize {
    let mut refreshed = 0;
    for sensor in sensors.iter_mut().filter(|s| s.active) {
        sensor.value = next_value(sensor.kind, sensor.value, rng);
        sensor.last_update = now;
        sensor.battery = (sensor.battery - rng.gen_range(0.0..MAX_BATTERY_DECAY)).max(0.0);
        refreshed += 1;
    }
    debug!("refreshed {refreshed} sensors");
    refreshed
}

fn next_value(kind: SensorKind, current: SensorValue, rng: &mut SimRng) -> SensorValue {
    if let Some((half_width, lo, hi)) = numeric_bounds(kind) {
        let base = current.as_f64().unwrap_or((lo + hi) / 2.0);
        return SensorValue::Numeric((base + rng.jitter(half_width)).clamp(lo, hi));
    }
    match kind {
        SensorKind::Motion => SensorValue::Binary(rng.gen_bool(MOTION_PROBABILITY)),
        _ => {
            let open = current.as_bool().unwrap_or(false);
            if rng.gen_bool(DOOR_FLIP_PROBABILITY) {
                SensorValue::Binary(!open)
            } else {
                SensorValue::Binary(open)
            }
        }
    }
}
