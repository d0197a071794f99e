// ── Wi-Fi domain types ──

use serde::Serialize;

/// `GET /wifi/status`: the gateway's station link.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WifiStatus {
    pub ssid: String,
    /// Signal strength in dBm, when the firmware reports it.
    pub signal: Option<f64>,
    pub ip: String,
    pub enabled: bool,
}

/// One row of the network picker: a visible network, a saved one, or both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkEntry {
    /// Position in the merged SSID union.
    pub id: u32,
    pub ssid: String,
    /// dBm; `f64::NEG_INFINITY` for saved networks not currently visible.
    pub signal: f64,
    pub is_saved: bool,
    #[serde(skip_serializing)]
    pub stored_password: Option<String>,
    /// Gateway-side id of the saved entry (what `DELETE /wifi/{id}` takes).
    pub saved_id: Option<u32>,
}

impl NetworkEntry {
    pub fn is_visible(&self) -> bool {
        self.signal.is_finite()
    }
}

/// The network the gateway is connected to, kept out of the picker list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectedNetwork {
    pub ssid: String,
    pub signal: Option<f64>,
    pub ip: String,
    pub status: bool,
}

impl From<&WifiStatus> for ConnectedNetwork {
    fn from(status: &WifiStatus) -> Self {
        Self {
            ssid: status.ssid.clone(),
            signal: status.signal,
            ip: status.ip.clone(),
            status: status.enabled,
        }
    }
}

/// State of the network dialog.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WifiNetworks {
    pub entries: Vec<NetworkEntry>,
    pub connected: Option<ConnectedNetwork>,
}

impl WifiNetworks {
    /// Drop the connected network from the picker list.
    pub fn strip_connected(&mut self) {
        if let Some(connected) = &self.connected {
            self.entries.retain(|n| n.ssid != connected.ssid);
        }
    }

    pub fn network(&self, id: u32) -> Option<&NetworkEntry> {
        self.entries.iter().find(|n| n.id == id)
    }
}
