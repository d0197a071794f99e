// ── Sensor modules ──

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;
use strum::EnumString;

/// One module as listed by the gateway (read-only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSummary {
    pub id: u32,
    pub name: String,
    /// When the gateway last heard from the module.
    pub received_at: Option<NaiveDateTime>,
    pub address: Option<String>,
    pub battery_percent: Option<u8>,
}

/// Sensor type tag as sent by the firmware.
#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
pub enum SensorKind {
    /// Thermistor (temperature).
    #[strum(serialize = "NTC")]
    Ntc,
    /// Luminosity.
    #[strum(serialize = "SUN")]
    Sun,
    /// Four-channel colour sensor.
    #[strum(serialize = "COR")]
    Colour,
    #[strum(default)]
    Other(String),
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ntc => f.write_str("NTC"),
            Self::Sun => f.write_str("SUN"),
            Self::Colour => f.write_str("COR"),
            Self::Other(tag) => f.write_str(tag),
        }
    }
}

impl Serialize for SensorKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SensorValue {
    Scalar(f64),
    Channels([f64; 4]),
    Missing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReading {
    pub id: u32,
    pub kind: SensorKind,
    pub value: SensorValue,
}

/// `GET /modules/{id}/date`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleDetail {
    #[serde(flatten)]
    pub summary: ModuleSummary,
    /// The module's own clock, when it reports one.
    pub module_clock: Option<NaiveDateTime>,
    pub sensors: Vec<SensorReading>,
}
