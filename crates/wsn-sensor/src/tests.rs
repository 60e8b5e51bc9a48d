//! Unit tests for wsn-sensor.

use chrono::{DateTime, Duration, Utc};
use wsn_core::{NodeId, SensorId, SimRng};

use crate::{Sensor, SensorKind, SensorValue};

fn epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn sensor(id: u32, kind: SensorKind, value: SensorValue) -> Sensor {
    Sensor {
        id:          SensorId(id),
        node_id:     NodeId(id),
        kind,
        value,
        location:    "Kitchen".to_owned(),
        active:      true,
        battery:     80.0,
        last_update: epoch(),
    }
}

// ── Kinds and values ──────────────────────────────────────────────────────────

#[cfg(test)]
mod kind_tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        for kind in SensorKind::ALL {
            assert_eq!(kind.as_str().parse::<SensorKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.as_str());
        }
        assert_eq!(" Door ".parse::<SensorKind>().unwrap(), SensorKind::Door);
        assert!("smoke".parse::<SensorKind>().is_err());
    }

    #[test]
    fn binary_kinds() {
        assert!(SensorKind::Motion.is_binary());
        assert!(SensorKind::Door.is_binary());
        assert!(!SensorKind::Gas.is_binary());
        assert_eq!(SensorKind::Gas.unit(), Some("ppm"));
        assert_eq!(SensorKind::Door.unit(), None);
    }

    #[test]
    fn value_accessors() {
        assert_eq!(SensorValue::Numeric(3.5).as_f64(), Some(3.5));
        assert_eq!(SensorValue::Numeric(3.5).as_bool(), None);
        assert_eq!(SensorValue::Binary(true).as_bool(), Some(true));
        assert_eq!(SensorValue::Binary(true).to_json(), serde_json::json!(true));
    }
}

// ── Fleet ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod fleet_tests {
    use super::*;
    use crate::{LOCATIONS, initialize_sensors};

    #[test]
    fn eighteen_sensors_three_per_room() {
        let mut rng = SimRng::new(1);
        let sensors = initialize_sensors(18, &mut rng, epoch());
        assert_eq!(sensors.len(), 18);

        for (i, s) in sensors.iter().enumerate() {
            assert_eq!(s.id, SensorId(i as u32 + 1));
            assert_eq!(s.node_id, NodeId(i as u32 + 1));
            assert_eq!(s.kind, SensorKind::ALL[i % 6]);
            assert_eq!(s.location, LOCATIONS[i / 3]);
            assert!((50.0..100.0).contains(&s.battery));
            assert_eq!(s.kind.is_binary(), s.value.as_bool().is_some());
            assert_eq!(s.last_update, epoch());
        }
    }

    #[test]
    fn initial_values_in_range() {
        for seed in 0..20 {
            let mut rng = SimRng::new(seed);
            for s in initialize_sensors(18, &mut rng, epoch()) {
                let Some(v) = s.value.as_f64() else { continue };
                let ok = match s.kind {
                    SensorKind::Temperature => (20.0..30.0).contains(&v),
                    SensorKind::Humidity    => (30.0..80.0).contains(&v),
                    SensorKind::Gas         => (100.0..400.0).contains(&v),
                    SensorKind::Light       => (0.0..1000.0).contains(&v),
                    _ => false,
                };
                assert!(ok, "{} = {v}", s.kind);
            }
        }
    }

    #[test]
    fn overflow_stays_in_last_room() {
        let mut rng = SimRng::new(1);
        let sensors = initialize_sensors(25, &mut rng, epoch());
        assert_eq!(sensors[24].location, "Garden");
    }

    #[test]
    fn zero_sensors() {
        let mut rng = SimRng::new(1);
        assert!(initialize_sensors(0, &mut rng, epoch()).is_empty());
    }
}

// ── Refresh ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod refresh_tests {
    use super::*;
    use crate::refresh_sensors;

    #[test]
    fn numeric_values_stay_clamped() {
        let mut sensors = vec![
            sensor(1, SensorKind::Temperature, SensorValue::Numeric(34.9)),
            sensor(2, SensorKind::Humidity, SensorValue::Numeric(10.5)),
            sensor(3, SensorKind::Gas, SensorValue::Numeric(790.0)),
            sensor(4, SensorKind::Light, SensorValue::Numeric(5.0)),
        ];
        let mut rng = SimRng::new(8);
        for _ in 0..2_000 {
            let before = sensors.clone();
            refresh_sensors(&mut sensors, &mut rng, epoch());
            for (b, a) in before.iter().zip(&sensors) {
                let (old, new) = (b.value.as_f64().unwrap(), a.value.as_f64().unwrap());
                let (half, lo, hi) = match a.kind {
                    SensorKind::Temperature => (1.0, 10.0, 35.0),
                    SensorKind::Humidity    => (2.5, 10.0, 95.0),
                    SensorKind::Gas         => (25.0, 50.0, 800.0),
                    _                       => (50.0, 0.0, 1000.0),
                };
                assert!((lo..=hi).contains(&new), "{} = {new}", a.kind);
                assert!((new - old).abs() <= half + 1e-9);
            }
        }
    }

    #[test]
    fn battery_decays_and_floors() {
        let mut sensors = vec![sensor(1, SensorKind::Gas, SensorValue::Numeric(200.0))];
        sensors[0].battery = 1.0;
        let mut rng = SimRng::new(2);
        let mut last = sensors[0].battery;
        for _ in 0..100 {
            refresh_sensors(&mut sensors, &mut rng, epoch());
            assert!(sensors[0].battery <= last);
            assert!(sensors[0].battery >= 0.0);
            assert!(last - sensors[0].battery < 0.5);
            last = sensors[0].battery;
        }
        assert_eq!(sensors[0].battery, 0.0);
    }

    #[test]
    fn inactive_sensors_untouched() {
        let mut sensors = vec![sensor(1, SensorKind::Door, SensorValue::Binary(false))];
        sensors[0].active = false;
        let before = sensors.clone();
        let later = epoch() + Duration::seconds(60);
        let n = refresh_sensors(&mut sensors, &mut SimRng::new(3), later);
        assert_eq!(n, 0);
        assert_eq!(sensors, before);
    }

    #[test]
    fn timestamp_updated() {
        let mut sensors = vec![sensor(1, SensorKind::Motion, SensorValue::Binary(false))];
        let later = epoch() + Duration::seconds(60);
        assert_eq!(refresh_sensors(&mut sensors, &mut SimRng::new(3), later), 1);
        assert_eq!(sensors[0].last_update, later);
    }

    #[test]
    fn door_flips_about_ten_percent() {
        let mut sensors = vec![sensor(1, SensorKind::Door, SensorValue::Binary(false))];
        let mut rng = SimRng::new(2024);
        let trials = 20_000;
        let mut flips = 0;
        for _ in 0..trials {
            let before = sensors[0].value;
            refresh_sensors(&mut sensors, &mut rng, epoch());
            if sensors[0].value != before {
                flips += 1;
            }
        }
        let rate = flips as f64 / trials as f64;
        assert!((0.08..0.12).contains(&rate), "flip rate {rate}");
    }

    #[test]
    fn motion_detected_about_thirty_percent() {
        let mut sensors = vec![sensor(1, SensorKind::Motion, SensorValue::Binary(false))];
        let mut rng = SimRng::new(99);
        let trials = 20_000;
        let mut detected = 0;
        for _ in 0..trials {
            refresh_sensors(&mut sensors, &mut rng, epoch());
            if sensors[0].value == SensorValue::Binary(true) {
                detected += 1;
            }
        }
        let rate = detected as f64 / trials as f64;
        assert!((0.27..0.33).contains(&rate), "motion rate {rate}");
    }
}

// ── MQTT ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod mqtt_tests {
    use super::*;
    use crate::mqtt_messages;

    #[test]
    fn messages_from_active_sensors_of_kind() {
        let mut inactive = sensor(3, SensorKind::Temperature, SensorValue::Numeric(30.0));
        inactive.active = false;
        let sensors = vec![
            sensor(1, SensorKind::Temperature, SensorValue::Numeric(21.5)),
            sensor(2, SensorKind::Humidity, SensorValue::Numeric(40.0)),
            inactive,
        ];
        let msgs = mqtt_messages(&sensors, SensorKind::Temperature, 10, &mut SimRng::new(1), epoch());
        assert_eq!(msgs.len(), 10);
        for m in &msgs {
            assert_eq!(m.topic, "home/sensors/temperature/1");
            let payload: serde_json::Value = serde_json::from_str(&m.payload).unwrap();
            assert_eq!(payload["value"], serde_json::json!(21.5));
            assert_eq!(payload["nodeId"], serde_json::json!(1));
            assert_eq!(payload["battery"], serde_json::json!(80.0));
            assert!(payload["timestamp"].as_str().unwrap().starts_with("2023-11-14T"));
        }
    }

    #[test]
    fn no_sensor_yields_error_notice() {
        let sensors = vec![sensor(1, SensorKind::Gas, SensorValue::Numeric(200.0))];
        let msgs = mqtt_messages(&sensors, SensorKind::Door, 2, &mut SimRng::new(1), epoch());
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].topic, "home/sensors/door/unknown");
        let payload: serde_json::Value = serde_json::from_str(&msgs[0].payload).unwrap();
        assert_eq!(payload["error"], "No active door sensors");
    }
}
