// Gateway access-point ("server") endpoints

use tracing::debug;

use crate::client::GatewayClient;
use crate::error::Error;
use crate::models::{Ack, ServerConfigRequest, ServerConfigResponse, StatusRequest};

impl GatewayClient {
    /// `GET /server/config`
    pub async fn get_server_config(&self) -> Result<ServerConfigResponse, Error> {
        let url = self.url("server/config")?;
        debug!("fetching server config");
        self.get(url).await
    }

    /// Change the access-point SSID and passphrase.
    ///
    /// `POST /server/config`
    pub async fn set_server_config(&self, request: &ServerConfigRequest) -> Result<Ack, Error> {
        let url = self.url("server/config")?;
        debug!(ssid = %request.ssid, "updating server config");
        self.post(url, request).await
    }

    /// `POST /server/toggle` with `{"status": 0|1}`
    pub async fn set_server_enabled(&self, enabled: bool) -> Result<Ack, Error> {
        let url = self.url("server/toggle")?;
        debug!(enabled, "toggling server");
        self.post(url, &StatusRequest::from_enabled(enabled)).await
    }
}
