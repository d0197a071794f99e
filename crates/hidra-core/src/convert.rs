// ── API-to-domain type conversions ──
//
// Bridges raw `hidra_api` response types into `hidra_core::model` types.
// The gateway's split date/time strings become a single clock, RSSI
// becomes an optional signal, sensor payloads become typed readings.

use hidra_api::models::{
    ConfigResponse, ModuleDetailResponse, ModuleEntry, SensorPayload, ServerConfigResponse,
    WifiStatusResponse,
};

use crate::clock;
use crate::error::CoreError;
use crate::model::{
    GatewaySettings, ModuleDetail, ModuleSummary, SensorKind, SensorReading, SensorValue,
    ServerSettings, WifiStatus,
};

// ── Config ─────────────────────────────────────────────────────────

impl TryFrom<ConfigResponse> for GatewaySettings {
    type Error = CoreError;

    fn try_from(raw: ConfigResponse) -> Result<Self, Self::Error> {
        let clock = clock::recompose(None, Some(&raw.date), Some(&raw.time)).ok_or_else(|| {
            CoreError::MalformedResponse {
                message: format!("unparseable gateway clock: {} {}", raw.date, raw.time),
            }
        })?;

        Ok(Self {
            clock: Some(clock),
            address: raw.address,
        })
    }
}

// ── Wi-Fi / server ─────────────────────────────────────────────────

impl From<WifiStatusResponse> for WifiStatus {
    fn from(raw: WifiStatusResponse) -> Self {
        Self {
            ssid: raw.ssid,
            signal: raw.rssi,
            ip: raw.ip,
            enabled: raw.status,
        }
    }
}

impl From<ServerConfigResponse> for ServerSettings {
    fn from(raw: ServerConfigResponse) -> Self {
        Self {
            ssid: raw.ssid,
            pass: raw.pass,
            ip: raw.ip,
            enabled: raw.status,
        }
    }
}

// ── Modules ────────────────────────────────────────────────────────

impl From<ModuleEntry> for ModuleSummary {
    fn from(raw: ModuleEntry) -> Self {
        Self {
            id: raw.id,
            received_at: clock::parse_module_stamp(&raw.receive_date, &raw.receive_time),
            name: raw.name,
            address: raw.address,
            battery_percent: raw.bat.map(|b| b.min(100)),
        }
    }
}

impl From<SensorPayload> for SensorReading {
    fn from(raw: SensorPayload) -> Self {
        let kind: SensorKind = raw
            .kind
            .parse()
            .unwrap_or_else(|_| SensorKind::Other(raw.kind.clone()));

        let value = match (&kind, raw.value) {
            (SensorKind::Colour, _) => match (raw.value_1, raw.value_2, raw.value_3, raw.value_4) {
                (Some(a), Some(b), Some(c), Some(d)) => SensorValue::Channels([a, b, c, d]),
                _ => SensorValue::Missing,
            },
            (_, Some(v)) => SensorValue::Scalar(v),
            (_, None) => SensorValue::Missing,
        };

        Self {
            id: raw.id,
            kind,
            value,
        }
    }
}

impl From<ModuleDetailResponse> for ModuleDetail {
    fn from(raw: ModuleDetailResponse) -> Self {
        let module_clock = match (raw.module_date.as_deref(), raw.module_time.as_deref()) {
            (Some(date), Some(time)) => clock::parse_module_stamp(date, time),
            _ => None,
        };

        Self {
            summary: raw.module.into(),
            module_clock,
            sensors: raw.sensors.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn config_clock_is_parsed_from_gateway_format() {
        let settings = GatewaySettings::try_from(ConfigResponse {
            date: "23/06/2025".into(),
            time: "14:19:00".into(),
            address: "0xaa".into(),
        })
        .unwrap();
        assert_eq!(settings.date(), "2025-06-23");
        assert_eq!(settings.time(), "14:19:00");
    }

    #[test]
    fn unparseable_config_clock_is_malformed() {
        let result = GatewaySettings::try_from(ConfigResponse {
            date: "ontem".into(),
            time: "14:19:00".into(),
            address: String::new(),
        });
        assert!(matches!(result, Err(CoreError::MalformedResponse { .. })));
    }

    #[test]
    fn module_entry_projection() {
        let raw: ModuleEntry = serde_json::from_value(json!({
            "id": 2, "name": "hidra nascente",
            "recieve-date": "2025-23-06", "recieve-time": "09:37:00",
            "bat": 64
        }))
        .unwrap();

        let summary = ModuleSummary::from(raw);
        assert_eq!(summary.battery_percent, Some(64));
        assert_eq!(
            summary.received_at.map(|t| t.to_string()),
            Some("2025-06-23 09:37:00".into())
        );
    }

    #[test]
    fn sensor_kinds() {
        let colour = SensorReading::from(
            serde_json::from_value::<SensorPayload>(json!({
                "id": 2, "type": "COR",
                "value-1": 10.0, "value-2": 20.0, "value-3": 30.0, "value-4": 40.0
            }))
            .unwrap(),
        );
        assert_eq!(colour.kind, SensorKind::Colour);
        assert_eq!(colour.value, SensorValue::Channels([10.0, 20.0, 30.0, 40.0]));

        let other = SensorReading::from(
            serde_json::from_value::<SensorPayload>(json!({"id": 3, "type": "PH", "value": 7.2}))
                .unwrap(),
        );
        assert_eq!(other.kind, SensorKind::Other("PH".into()));
        assert_eq!(other.value, SensorValue::Scalar(7.2));
    }
}
