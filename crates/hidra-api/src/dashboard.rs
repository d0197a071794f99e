// Aggregate dashboard endpoint

use tracing::debug;

use crate::client::GatewayClient;
use crate::error::Error;
use crate::models::DashboardResponse;

impl GatewayClient {
    /// Latest water-quality readings plus the computed IQA and flood risk.
    ///
    /// `GET /api/dashboard/`
    ///
    /// A `success: false` body is still returned as `Ok`; the caller decides
    /// how to surface `error`.
    pub async fn get_dashboard(&self) -> Result<DashboardResponse, Error> {
        let url = self.url("api/dashboard/")?;
        debug!("fetching dashboard aggregate");
        self.get(url).await
    }
}
