// Gateway sensor-module endpoints

use tracing::debug;

use crate::client::GatewayClient;
use crate::error::Error;
use crate::models::{Ack, ModuleDetailResponse, ModulesResponse};

impl GatewayClient {
    /// `GET /modules`
    pub async fn list_modules(&self) -> Result<ModulesResponse, Error> {
        let url = self.url("modules")?;
        debug!("fetching modules");
        self.get(url).await
    }

    /// Module detail with its latest sensor readings.
    ///
    /// `GET /modules/{id}/date`
    pub async fn get_module(&self, id: u32) -> Result<ModuleDetailResponse, Error> {
        let url = self.url(&format!("modules/{id}/date"))?;
        debug!(id, "fetching module detail");
        self.get(url).await
    }

    /// Register a new module. The config body is passed through as-is.
    ///
    /// `POST /modules/new`
    pub async fn create_module(&self, config: &serde_json::Value) -> Result<Ack, Error> {
        let url = self.url("modules/new")?;
        debug!("registering module");
        self.post(url, config).await
    }

    /// `POST /modules/{id}/config`
    pub async fn update_module(&self, id: u32, config: &serde_json::Value) -> Result<Ack, Error> {
        let url = self.url(&format!("modules/{id}/config"))?;
        debug!(id, "updating module config");
        self.post(url, config).await
    }

    /// `DELETE /modules/{id}`
    pub async fn delete_module(
        &self,
        id: u32,
        body: Option<&serde_json::Value>,
    ) -> Result<Ack, Error> {
        let url = self.url(&format!("modules/{id}"))?;
        debug!(id, "deleting module");
        self.delete(url, body).await
    }
}
