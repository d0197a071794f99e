// Gateway wire types
//
// One schema per endpoint. The firmware and the development mock disagree
// on a few details (RSSI as `-30` vs `"-30db"`, saved-network `pass` vs
// `password`, `status` present or not), so the lenient bits are isolated
// in the `de` helpers at the bottom of this file.

use serde::{Deserialize, Serialize};

// ── Config / clock ───────────────────────────────────────────────────

/// `GET /config`
///
/// `date` is `DD/MM/YYYY`, `time` is `HH:MM:SS` (gateway local time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub address: String,
}

/// `POST /config/time`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigTimeRequest {
    pub date: String,
    pub time: String,
    pub address: String,
}

// ── Generic acknowledgement ──────────────────────────────────────────

/// Reply to every mutating endpoint: `{status, id?, input?}`.
///
/// `status` is a free-form string on some firmware builds and a number on
/// others, so it stays loosely typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub status: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<serde_json::Value>,
}

/// `POST /wifi/toggle` and `POST /server/toggle`: `{status: 0|1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRequest {
    pub status: u8,
}

impl StatusRequest {
    pub fn from_enabled(enabled: bool) -> Self {
        Self {
            status: u8::from(enabled),
        }
    }
}

// ── Wi-Fi ────────────────────────────────────────────────────────────

/// `GET /wifi/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WifiStatusResponse {
    #[serde(default)]
    pub ssid: String,
    #[serde(default, deserialize_with = "de::opt_signal")]
    pub rssi: Option<f64>,
    #[serde(default)]
    pub ip: String,
    #[serde(default, deserialize_with = "de::flag")]
    pub status: bool,
}

/// `GET /wifi/networks`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WifiNetworksResponse {
    #[serde(default)]
    pub saved: Vec<SavedNetwork>,
    #[serde(default)]
    pub near: Vec<NearNetwork>,
}

/// A network stored on the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedNetwork {
    #[serde(default)]
    pub id: u32,
    pub ssid: String,
    #[serde(default, alias = "password")]
    pub pass: Option<String>,
}

/// A network currently visible to the gateway radio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearNetwork {
    #[serde(default)]
    pub id: u32,
    pub ssid: String,
    #[serde(deserialize_with = "de::signal")]
    pub rssi: f64,
}

/// `POST /wifi/connect`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectRequest {
    pub ssid: String,
    pub pass: String,
}

// ── Server (access point) ────────────────────────────────────────────

/// `GET /server/config`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfigResponse {
    #[serde(default)]
    pub ssid: String,
    #[serde(default)]
    pub pass: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default, deserialize_with = "de::flag")]
    pub status: bool,
}

/// `POST /server/config`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfigRequest {
    pub ssid: String,
    pub pass: String,
}

// ── Modules ──────────────────────────────────────────────────────────

/// `GET /modules`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModulesResponse {
    pub modules: Vec<ModuleEntry>,
}

/// One sensor module as listed by the gateway.
///
/// The `recieve-*` spelling is the firmware's. `recieve-date` is
/// `YYYY-DD-MM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub id: u32,
    pub name: String,
    #[serde(rename = "recieve-date", default)]
    pub receive_date: String,
    #[serde(rename = "recieve-time", default)]
    pub receive_time: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub bat: Option<u8>,
}

/// `GET /modules/{id}/date`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDetailResponse {
    #[serde(flatten)]
    pub module: ModuleEntry,
    #[serde(rename = "module-date", default)]
    pub module_date: Option<String>,
    #[serde(rename = "module-time", default)]
    pub module_time: Option<String>,
    #[serde(default)]
    pub sensors: Vec<SensorPayload>,
}

/// One sensor reading inside a module detail.
///
/// Colour sensors (`COR`) carry four channels; everything else a single
/// `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorPayload {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(rename = "value-1", default, skip_serializing_if = "Option::is_none")]
    pub value_1: Option<f64>,
    #[serde(rename = "value-2", default, skip_serializing_if = "Option::is_none")]
    pub value_2: Option<f64>,
    #[serde(rename = "value-3", default, skip_serializing_if = "Option::is_none")]
    pub value_3: Option<f64>,
    #[serde(rename = "value-4", default, skip_serializing_if = "Option::is_none")]
    pub value_4: Option<f64>,
}

// ── Dashboard ────────────────────────────────────────────────────────

/// `GET /api/dashboard/`: the aggregate water-quality view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub firebase_connected: bool,
    #[serde(default)]
    pub data_source: Option<String>,
    #[serde(default)]
    pub sensor_data: SensorData,
    #[serde(default)]
    pub iqa: Option<IqaPayload>,
    #[serde(default)]
    pub flood_risk: Option<FloodRiskPayload>,
    #[serde(default)]
    pub device_status: Option<serde_json::Value>,
}

/// Latest reading of each dashboard parameter. Missing values stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorData {
    #[serde(default)]
    pub temperatura: Option<f64>,
    #[serde(default)]
    pub ph: Option<f64>,
    #[serde(default)]
    pub oxigenio: Option<f64>,
    #[serde(default)]
    pub dbo: Option<f64>,
    #[serde(default)]
    pub coliformes: Option<f64>,
    #[serde(default)]
    pub nitrogenio: Option<f64>,
    #[serde(default)]
    pub fosforo: Option<f64>,
    #[serde(default)]
    pub turbidez: Option<f64>,
    #[serde(default)]
    pub solidos: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IqaPayload {
    pub valor: f64,
    pub classificacao: String,
    #[serde(default)]
    pub css_class: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloodRiskPayload {
    pub level: String,
    #[serde(default)]
    pub css_class: String,
}

// ── Lenient field decoders ───────────────────────────────────────────

mod de {
    use serde::de::{self, Deserializer};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrText {
        Num(f64),
        Bool(bool),
        Text(String),
    }

    fn parse_signal<E: de::Error>(raw: NumOrText) -> Result<f64, E> {
        match raw {
            NumOrText::Num(n) => Ok(n),
            NumOrText::Bool(_) => Err(E::custom("expected a signal strength, got a boolean")),
            NumOrText::Text(s) => {
                let trimmed = s.trim().to_ascii_lowercase();
                let numeric = trimmed
                    .trim_end_matches("dbm")
                    .trim_end_matches("db")
                    .trim();
                numeric
                    .parse::<f64>()
                    .map_err(|_| E::custom(format!("invalid signal strength {s:?}")))
            }
        }
    }

    /// RSSI as a number or a string like `"-30db"`.
    pub(super) fn signal<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        parse_signal(NumOrText::deserialize(d)?)
    }

    /// Optional RSSI; an empty string counts as absent.
    pub(super) fn opt_signal<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        match Option::<NumOrText>::deserialize(d)? {
            None => Ok(None),
            Some(NumOrText::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(raw) => parse_signal(raw).map(Some),
        }
    }

    /// On/off status as `0|1`, `true|false`, or `"0"|"1"`.
    pub(super) fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        match Option::<NumOrText>::deserialize(d)? {
            None => Ok(false),
            Some(NumOrText::Bool(b)) => Ok(b),
            Some(NumOrText::Num(n)) => Ok(n != 0.0),
            Some(NumOrText::Text(s)) => match s.trim() {
                "1" | "true" | "on" => Ok(true),
                "0" | "false" | "off" | "" => Ok(false),
                other => Err(de::Error::custom(format!("invalid status flag {other:?}"))),
            },
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
    fn wifi_status_accepts_db_suffixed_rssi_and_missing_status() {
        let status: WifiStatusResponse = serde_json::from_value(json!({
            "ssid": "wifi-teste",
            "rssi": "-30db",
            "ip": "192.168.4.1"
        }))
        .unwrap();
        assert_eq!(status.rssi, Some(-30.0));
        assert!(!status.status);
    }

    #[test]
    fn near_network_accepts_numeric_string() {
        let near: NearNetwork =
            serde_json::from_value(json!({"id": 0, "ssid": "rede A", "rssi": "-80"})).unwrap();
        assert_eq!(near.rssi, -80.0);
    }

    #[test]
    fn near_network_rejects_garbage_rssi() {
        let err = serde_json::from_value::<NearNetwork>(json!({"ssid": "x", "rssi": "strong"}));
        assert!(err.is_err());
    }

    #[test]
    fn saved_network_accepts_firmware_password_field() {
        let saved: SavedNetwork =
            serde_json::from_value(json!({"id": 1, "ssid": "casa", "password": "segredo"}))
                .unwrap();
        assert_eq!(saved.pass.as_deref(), Some("segredo"));
    }

    #[test]
    fn server_status_flag_variants() {
        for (raw, expected) in [(json!(1), true), (json!("0"), false), (json!(true), true)] {
            let cfg: ServerConfigResponse = serde_json::from_value(json!({
                "ssid": "hidra", "pass": "hidra1234", "ip": "192.168.4.1", "status": raw
            }))
            .unwrap();
            assert_eq!(cfg.status, expected);
        }
    }

    #[test]
    fn module_detail_flattens_summary_fields() {
        let detail: ModuleDetailResponse = serde_json::from_value(json!({
            "id": 2,
            "name": "verde vivo",
            "recieve-date": "2025-23-06",
            "recieve-time": "14:19:00",
            "module-date": "2025-23-06",
            "module-time": "14:18:55",
            "bat": 77,
            "sensors": [
                {"id": 0, "type": "NTC", "value": 812.61},
                {"id": 1, "type": "COR", "value-1": 101, "value-2": 202, "value-3": 303, "value-4": 404}
            ]
        }))
        .unwrap();
        assert_eq!(detail.module.name, "verde vivo");
        assert_eq!(detail.module.bat, Some(77));
        assert_eq!(detail.sensors.len(), 2);
        assert_eq!(detail.sensors[1].value_4, Some(404.0));
    }

    #[test]
    fn status_request_encodes_zero_or_one() {
        assert_eq!(
            serde_json::to_value(StatusRequest::from_enabled(true)).unwrap(),
            json!({"status": 1})
        );
        assert_eq!(
            serde_json::to_value(StatusRequest::from_enabled(false)).unwrap(),
            json!({"status": 0})
        );
    }
}
