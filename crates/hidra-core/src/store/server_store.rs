// ── Access point (server) store ──

use std::sync::Arc;

use hidra_api::GatewayClient;
use hidra_api::models::ServerConfigRequest;

use super::{FetchOutcome, fetch_into};
use crate::model::{ServerPatch, ServerSettings};
use crate::notify::{Notifier, detail_of};
use crate::resource::{ResourceCell, ResourceState};
use crate::stream::ResourceStream;

const LOAD_FAILED: &str = "Erro ao carregar Configurações do Servidor.";
const SAVE_OK: &str = "Configurações de servidor salvas com sucesso!";
const SAVE_FAILED: &str = "Erro ao salvar configurações de servidor.";
const ENABLED: &str = "Servidor ativado com sucesso!";
const DISABLED: &str = "Servidor desativado com sucesso!";
const TOGGLE_FAILED: &str = "Erro ao alterar configurações de servidor.";

pub struct ServerStore {
    client: Arc<GatewayClient>,
    notifier: Arc<Notifier>,
    cell: ResourceCell<ServerSettings>,
}

impl ServerStore {
    pub fn new(client: Arc<GatewayClient>, notifier: Arc<Notifier>) -> Self {
        Self {
            client,
            notifier,
            cell: ResourceCell::new(),
        }
    }

    pub fn state(&self) -> ResourceState<ServerSettings> {
        self.cell.snapshot()
    }

    pub fn subscribe(&self) -> ResourceStream<ServerSettings> {
        self.cell.subscribe()
    }

    pub async fn fetch(&self) -> FetchOutcome {
        fetch_into(
            &self.cell,
            &self.notifier,
            LOAD_FAILED,
            self.client.get_server_config(),
            |raw| Ok(raw.into()),
        )
        .await
    }

    /// Apply `patch`, push SSID and password, then reload. Always leaves
    /// edit mode; rolls back the visible value on failure.
    pub async fn save(&self, patch: &ServerPatch) -> bool {
        let rollback = self.cell.snapshot().confirmed().clone();
        self.cell.update_current(|s| patch.apply(s));
        let draft = self.cell.current();
        self.cell.commit_edit();

        let _saving = self.cell.begin_mutation();
        let request = ServerConfigRequest {
            ssid: draft.ssid,
            pass: draft.pass,
        };

        match self.client.set_server_config(&request).await {
            Ok(ack) => {
                self.fetch().await;
                self.notifier.success(SAVE_OK, &detail_of(&ack.status));
                true
            }
            Err(e) => {
                self.cell.replace_current(rollback);
                self.cell.set_error(SAVE_FAILED);
                self.notifier.error(SAVE_FAILED, &e.to_string());
                false
            }
        }
    }

    /// Ask the gateway to flip its access point, then reload.
    pub async fn toggle(&self) -> bool {
        let target = !self.cell.current().enabled;
        let _toggling = self.cell.begin_mutation();

        match self.client.set_server_enabled(target).await {
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

    // ── Editing ──────────────────────────────────────────────────────

    pub fn hold(&self) -> bool {
        self.cell.hold()
    }

    pub fn restore(&self) -> bool {
        self.cell.restore()
    }

    pub fn set_ssid(&self, ssid: &str) {
        self.cell.update_current(|s| ssid.clone_into(&mut s.ssid));
    }

    pub fn set_password(&self, pass: &str) {
        self.cell.update_current(|s| pass.clone_into(&mut s.pass));
    }

    /// Save when editing, toggle the access point otherwise.
    pub async fn primary_action(&self) -> bool {
        if self.cell.is_editing() {
            self.save(&ServerPatch::default()).await
        } else {
            self.toggle().await
        }
    }

    /// Toggle edit mode.
    pub fn secondary_action(&self) -> bool {
        if self.cell.is_editing() {
            self.cell.restore()
        } else {
            self.cell.hold()
        }
    }
}
