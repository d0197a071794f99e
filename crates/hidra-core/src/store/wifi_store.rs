// ── Wi-Fi station status store ──

use std::sync::Arc;

use hidra_api::GatewayClient;

use super::{FetchOutcome, fetch_into};
use crate::model::WifiStatus;
use crate::notify::{Notifier, detail_of};
use crate::resource::{ResourceCell, ResourceState};
use crate::stream::ResourceStream;

const LOAD_FAILED: &str = "Erro ao carregar Configurações do Wifi.";
const ENABLED: &str = "Wifi ativado com sucesso!";
const DISABLED: &str = "Wifi desativado com sucesso!";
const TOGGLE_FAILED: &str = "Erro ao alterar configurações de Wifi.";

pub struct WifiStore {
    client: Arc<GatewayClient>,
    notifier: Arc<Notifier>,
    cell: ResourceCell<WifiStatus>,
}

impl WifiStore {
    pub fn new(client: Arc<GatewayClient>, notifier: Arc<Notifier>) -> Self {
        Self {
            client,
            notifier,
            cell: ResourceCell::new(),
        }
    }

    pub fn state(&self) -> ResourceState<WifiStatus> {
        self.cell.snapshot()
    }

    pub fn subscribe(&self) -> ResourceStream<WifiStatus> {
        self.cell.subscribe()
    }

    pub async fn fetch(&self) -> FetchOutcome {
        fetch_into(
            &self.cell,
            &self.notifier,
            LOAD_FAILED,
            self.client.get_wifi_status(),
            |raw| Ok(raw.into()),
        )
        .await
    }

    /// Ask the gateway to flip the station radio, then reload.
    ///
    /// The resulting state is whatever the reload reports.
    pub async fn toggle(&self) -> bool {
        let target = !self.cell.current().enabled;
        let _toggling = self.cell.begin_mutation();

        match self.client.set_wifi_enabled(target).await {
            Ok(ack) => {
                self.fetch().await;
                let message = if target { ENABLED } else { DISABLED };
                self.notifier.success(message, &detail_of(&ack.status));
                true
            }
            Err(e) => {
                self.cell.set_error(TOGGLE_FAILED);
                self.notifier.error(TOGGLE_FAILED, &e.to_string());
                false
            }
        }
    }

    pub async fn primary_action(&self) -> bool {
        self.toggle().await
    }
}
