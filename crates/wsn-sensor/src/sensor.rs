//! Sensor record and its typed reading.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use wsn_core::{NodeId, SensorId, WsnError};

/// The fixed set of sensor types deployed in the house.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SensorKind {
    Temperature,
    Humidity,
    Gas,
    Motion,
    Light,
    Door,
}

impl SensorKind {
    /// Deployment order; the fleet cycles through kinds in this order.
    pub const ALL: [SensorKind; 6] = [
        SensorKind::Temperature,
        SensorKind::Humidity,
        SensorKind::Gas,
        SensorKind::Motion,
        SensorKind::Light,
        SensorKind::Door,
    ];

    /// Lowercase label, also used as the MQTT topic segment.
    pub fn as_str(self) -> &'static str {
        match self {
            SensorKind::Temperature => "temperature",
            SensorKind::Humidity    => "humidity",
            SensorKind::Gas         => "gas",
            SensorKind::Motion      => "motion",
            SensorKind::Light       => "light",
            SensorKind::Door        => "door",
        }
    }

    /// `true` for kinds whose reading is on/off rather than a measurement.
    #[inline]
    pub fn is_binary(self) -> bool {
        matches!(self, SensorKind::Motion | SensorKind::Door)
    }

    /// Display unit for numeric kinds.
    pub fn unit(self) -> Option<&'static str> {
        match self {
            SensorKind::Temperature => Some("°C"),
            SensorKind::Humidity    => Some("%"),
            SensorKind::Gas         => Some("ppm"),
            SensorKind::Light       => Some("lux"),
            SensorKind::Motion | SensorKind::Door => None,
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorKind {
    type Err = WsnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SensorKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| WsnError::Parse(format!("unknown sensor kind '{s}'")))
    }
}

/// A sensor reading: a measurement or an on/off state depending on kind.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum SensorValue {
    Numeric(f64),
    Binary(bool),
}

impl SensorValue {
    pub fn as_f64(self) -> Option<f64> {
        match self {
            SensorValue::Numeric(v) => Some(v),
            SensorValue::Binary(_)  => None,
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            SensorValue::Binary(b)  => Some(b),
            SensorValue::Numeric(_) => None,
        }
    }

    /// JSON form used in MQTT payloads.
    pub fn to_json(self) -> serde_json::Value {
        match self {
            SensorValue::Numeric(v) => serde_json::json!(v),
            SensorValue::Binary(b)  => serde_json::json!(b),
        }
    }
}

impl fmt::Display for SensorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorValue::Numeric(v) => write!(f, "{v:.1}"),
            SensorValue::Binary(b)  => write!(f, "{b}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sensor {
    pub id:          SensorId,
    /// Hosting node.  Not required to exist in the current network.
    pub node_id:     NodeId,
    pub kind:        SensorKind,
    pub value:       SensorValue,
    pub location:    String,
    pub active:      bool,
    /// Percentage in `[0, 100]`.
    pub battery:     f64,
    pub last_update: DateTime<Utc>,
}
