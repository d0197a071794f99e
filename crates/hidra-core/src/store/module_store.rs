// ── Sensor module store ──
//
// The module list is read-only from the store's point of view; creation,
// reconfiguration and deletion go straight to the gateway and are followed
// by a reload.

use std::sync::Arc;

use serde_json::Value;

use hidra_api::GatewayClient;

use super::{FetchOutcome, fetch_into};
use crate::error::CoreError;
use crate::model::{ModuleDetail, ModuleSummary};
use crate::notify::{Notifier, detail_of};
use crate::resource::{ResourceCell, ResourceState};
use crate::stream::ResourceStream;

const LOAD_FAILED: &str = "Erro ao carregar módulos.";
const DETAIL_FAILED: &str = "Erro ao carregar dados do módulo.";
const CREATE_OK: &str = "Módulo adicionado com sucesso!";
const CREATE_FAILED: &str = "Erro ao adicionar módulo.";
const UPDATE_OK: &str = "Módulo atualizado com sucesso!";
const UPDATE_FAILED: &str = "Erro ao atualizar módulo.";
const DELETE_OK: &str = "Módulo removido com sucesso!";
const DELETE_FAILED: &str = "Erro ao remover módulo.";

pub struct ModuleStore {
    client: Arc<GatewayClient>,
    notifier: Arc<Notifier>,
    cell: ResourceCell<Vec<ModuleSummary>>,
}

impl ModuleStore {
    pub fn new(client: Arc<GatewayClient>, notifier: Arc<Notifier>) -> Self {
        Self {
            client,
            notifier,
            cell: ResourceCell::new(),
        }
    }

    pub fn state(&self) -> ResourceState<Vec<ModuleSummary>> {
        self.cell.snapshot()
    }

    pub fn subscribe(&self) -> ResourceStream<Vec<ModuleSummary>> {
        self.cell.subscribe()
    }

    pub async fn fetch(&self) -> FetchOutcome {
        fetch_into(
            &self.cell,
            &self.notifier,
            LOAD_FAILED,
            self.client.list_modules(),
            |raw| Ok(raw.modules.into_iter().map(ModuleSummary::from).collect()),
        )
        .await
    }

    pub fn module(&self, id: u32) -> Option<ModuleSummary> {
        self.cell.current().into_iter().find(|m| m.id == id)
    }

    /// Select a module for display. Raises an info notification naming it.
    pub fn open(&self, id: u32) -> Option<ModuleSummary> {
        let module = self.module(id)?;
        self.notifier.info(&format!("Abrindo módulo: {}", module.name));
        Some(module)
    }

    /// Load one module's readings. Does not touch the list state.
    pub async fn detail(&self, id: u32) -> Option<ModuleDetail> {
        match self.client.get_module(id).await {
            Ok(raw) => Some(raw.into()),
            Err(e) => {
                let e = CoreError::from(e);
                self.notifier.error(DETAIL_FAILED, &e.to_string());
                None
            }
        }
    }

    /// Register a new module with a free-form configuration object.
    pub async fn create(&self, config: &Value) -> bool {
        let result = {
            let _creating = self.cell.begin_mutation();
            self.client.create_module(config).await
        };
        self.finish(result, CREATE_OK, CREATE_FAILED).await
    }

    /// Reconfigure module `id`.
    pub async fn update(&self, id: u32, config: &Value) -> bool {
        let result = {
            let _updating = self.cell.begin_mutation();
            self.client.update_module(id, config).await
        };
        self.finish(result, UPDATE_OK, UPDATE_FAILED).await
    }

    /// Remove module `id`.
    pub async fn delete(&self, id: u32) -> bool {
        let result = {
            let _deleting = self.cell.begin_mutation();
            self.client.delete_module(id, None).await
        };
        self.finish(result, DELETE_OK, DELETE_FAILED).await
    }

    async fn finish(
        &self,
        result: Result<hidra_api::models::Ack, hidra_api::Error>,
        ok: &str,
        failed: &str,
    ) -> bool {
        match result {
            Ok(ack) => {
                self.fetch().await;
                self.notifier.success(ok, &detail_of(&ack.status));
                true
            }
            Err(e) => {
                self.cell.set_error(failed);
                self.notifier.error(failed, &e.to_string());
                false
            }
        }
    }
}
