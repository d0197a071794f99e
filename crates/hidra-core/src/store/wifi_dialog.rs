// ── Wi-Fi network picker store ──
//
// Backs the network dialog: visible and saved networks merged into one
// list, with the currently connected network held apart.

use std::sync::Arc;

use hidra_api::GatewayClient;

use super::{FetchOutcome, fetch_merge_into};
use crate::model::{ConnectedNetwork, NetworkEntry, WifiNetworks, WifiStatus};
use crate::notify::{Notifier, detail_of};
use crate::reconcile::merge_networks;
use crate::resource::{ResourceCell, ResourceState};
use crate::stream::ResourceStream;

const LOAD_FAILED: &str = "Erro ao carregar redes Wifi.";
const CONNECT_OK: &str = "Conexão realizada com sucesso!";
const CONNECT_FAILED: &str = "Erro ao tentar se conectar a rede.";
const FORGET_OK: &str = "Rede removida com sucesso!";
const FORGET_FAILED: &str = "Erro ao remover a rede.";

pub struct WifiDialogStore {
    client: Arc<GatewayClient>,
    notifier: Arc<Notifier>,
    cell: ResourceCell<WifiNetworks>,
}

impl WifiDialogStore {
    pub fn new(client: Arc<GatewayClient>, notifier: Arc<Notifier>) -> Self {
        Self {
            client,
            notifier,
            cell: ResourceCell::new(),
        }
    }

    pub fn state(&self) -> ResourceState<WifiNetworks> {
        self.cell.snapshot()
    }

    pub fn subscribe(&self) -> ResourceStream<WifiNetworks> {
        self.cell.subscribe()
    }

    /// Reload both lists and rebuild the merged view.
    pub async fn fetch(&self) -> FetchOutcome {
        fetch_merge_into(
            &self.cell,
            &self.notifier,
            LOAD_FAILED,
            self.client.list_wifi_networks(),
            |raw| Ok(merge_networks(&raw.near, &raw.saved)),
            |networks, entries| {
                networks.entries = entries;
                networks.strip_connected();
            },
        )
        .await
    }

    /// Record the network the gateway is on and hide it from the list.
    pub fn set_connected(&self, status: &WifiStatus) {
        self.cell.update_current(|n| {
            n.connected = Some(ConnectedNetwork::from(status));
            n.strip_connected();
        });
    }

    pub fn network(&self, id: u32) -> Option<NetworkEntry> {
        self.cell.snapshot().current.network(id).cloned()
    }

    /// Find a listed network by SSID.
    pub fn network_by_ssid(&self, ssid: &str) -> Option<NetworkEntry> {
        self.cell
            .snapshot()
            .current
            .entries
            .into_iter()
            .find(|n| n.ssid == ssid)
    }

    /// Join `ssid`, then reload the lists.
    pub async fn try_connect(&self, ssid: &str, password: &str) -> bool {
        let _connecting = self.cell.begin_mutation();

        match self.client.connect_wifi(ssid, password).await {
            Ok(ack) => {
                self.mark_connected(ssid);
                self.fetch().await;
                self.notifier.success(CONNECT_OK, &detail_of(&ack.status));
                true
            }
            Err(e) => {
                self.cell.set_error(CONNECT_FAILED);
                self.notifier.error(CONNECT_FAILED, &e.to_string());
                false
            }
        }
    }

    /// Make `ssid` the connected network ahead of the next status read.
    fn mark_connected(&self, ssid: &str) {
        self.cell.update_current(|n| {
            let signal = n
                .entries
                .iter()
                .find(|e| e.ssid == ssid)
                .map(|e| e.signal)
                .filter(|s| s.is_finite());
            n.connected = Some(ConnectedNetwork {
                ssid: ssid.to_owned(),
                signal,
                ip: String::new(),
                status: true,
            });
            n.strip_connected();
        });
    }

    /// Delete a saved network by its gateway-side id, then reload.
    pub async fn forget(&self, saved_id: u32) -> bool {
        let _forgetting = self.cell.begin_mutation();

        match self.client.delete_wifi_network(saved_id).await {
            Ok(ack) => {
                self.fetch().await;
                self.notifier.success(FORGET_OK, &detail_of(&ack.status));
                true
            }
            Err(e) => {
                self.cell.set_error(FORGET_FAILED);
                self.notifier.error(FORGET_FAILED, &e.to_string());
                false
            }
        }
    }
}
