// ── Access point (server) settings ──

use serde::Serialize;

/// `GET /server/config`: the gateway's own access point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServerSettings {
    pub ssid: String,
    #[serde(skip_serializing)]
    pub pass: String,
    pub ip: String,
    pub enabled: bool,
}

/// Fields a `save` may change. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerPatch {
    pub ssid: Option<String>,
    pub pass: Option<String>,
}

impl ServerPatch {
    pub fn is_empty(&self) -> bool {
        self.ssid.is_none() && self.pass.is_none()
    }

    pub fn apply(&self, settings: &mut ServerSettings) {
        if let Some(ssid) = &self.ssid {
            settings.ssid.clone_from(ssid);
        }
        if let Some(pass) = &self.pass {
            settings.pass.clone_from(pass);
        }
    }
}
