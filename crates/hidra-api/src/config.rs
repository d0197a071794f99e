// Gateway clock/config endpoints
//
// The gateway keeps its own wall clock and a radio address; both are read
// and written as one record.

use tracing::debug;

use crate::client::GatewayClient;
use crate::error::Error;
use crate::models::{Ack, ConfigResponse, ConfigTimeRequest};

impl GatewayClient {
    /// Read the gateway clock and address.
    ///
    /// `GET /config`
    pub async fn get_config(&self) -> Result<ConfigResponse, Error> {
        let url = self.url("config")?;
        debug!("fetching gateway config");
        self.get(url).await
    }

    /// Set the gateway clock and address.
    ///
    /// `POST /config/time`
    pub async fn set_config_time(&self, request: &ConfigTimeRequest) -> Result<Ack, Error> {
        let url = self.url("config/time")?;
        debug!(date = %request.date, time = %request.time, "updating gateway clock");
        self.post(url, request).await
    }
}
