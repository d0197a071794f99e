// Gateway Wi-Fi (station mode) endpoints
//
// Status and on/off of the uplink, the scan/saved network lists, connecting
// to a network and forgetting a saved one.

use tracing::debug;

use crate::client::GatewayClient;
use crate::error::Error;
use crate::models::{Ack, ConnectRequest, StatusRequest, WifiNetworksResponse, WifiStatusResponse};

impl GatewayClient {
    /// `GET /wifi/status`
    pub async fn get_wifi_status(&self) -> Result<WifiStatusResponse, Error> {
        let url = self.url("wifi/status")?;
        debug!("fetching wifi status");
        self.get(url).await
    }

    /// Switch the uplink on or off.
    ///
    /// `POST /wifi/toggle` with `{"status": 0|1}`
    pub async fn set_wifi_enabled(&self, enabled: bool) -> Result<Ack, Error> {
        let url = self.url("wifi/toggle")?;
        debug!(enabled, "toggling wifi");
        self.post(url, &StatusRequest::from_enabled(enabled)).await
    }

    /// Visible and saved networks, as two independent lists.
    ///
    /// `GET /wifi/networks`
    pub async fn list_wifi_networks(&self) -> Result<WifiNetworksResponse, Error> {
        let url = self.url("wifi/networks")?;
        debug!("fetching wifi networks");
        self.get(url).await
    }

    /// `POST /wifi/connect`
    pub async fn connect_wifi(&self, ssid: &str, pass: &str) -> Result<Ack, Error> {
        let url = self.url("wifi/connect")?;
        debug!(ssid, "connecting to wifi network");
        let body = ConnectRequest {
            ssid: ssid.to_owned(),
            pass: pass.to_owned(),
        };
        self.post(url, &body).await
    }

    /// Forget a saved network.
    ///
    /// `DELETE /wifi/{id}`
    pub async fn delete_wifi_network(&self, id: u32) -> Result<Ack, Error> {
        let url = self.url(&format!("wifi/{id}"))?;
        debug!(id, "deleting saved wifi network");
        self.delete(url, None).await
    }
}
