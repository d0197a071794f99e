// ── Gateway application context ──
//
// Builds one HTTP client and one notifier and injects them into every
// store. Owns the background tasks (scheduled refresh and dashboard
// polling) and tears them down on shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use hidra_api::{GatewayClient, TransportConfig};

use crate::config::GatewayConfig;
use crate::dashboard::DashboardPoller;
use crate::error::CoreError;
use crate::notify::Notifier;
use crate::scheduler::Scheduler;
use crate::store::{
    ConfigStore, FetchOutcome, ModuleStore, ServerStore, WifiDialogStore, WifiStore,
};

// ── Gateway ──────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<GatewayInner>`.
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<GatewayInner>,
}

struct GatewayInner {
    config: GatewayConfig,
    client: Arc<GatewayClient>,
    notifier: Arc<Notifier>,
    settings: Arc<ConfigStore>,
    wifi: Arc<WifiStore>,
    networks: Arc<WifiDialogStore>,
    server: Arc<ServerStore>,
    modules: Arc<ModuleStore>,
    dashboard: Arc<DashboardPoller>,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

/// Per-store outcome of [`Gateway::refresh_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshReport {
    pub settings: FetchOutcome,
    pub wifi: FetchOutcome,
    pub networks: FetchOutcome,
    pub server: FetchOutcome,
    pub modules: FetchOutcome,
}

impl RefreshReport {
    pub fn all_ok(&self) -> bool {
        [
            self.settings,
            self.wifi,
            self.networks,
            self.server,
            self.modules,
        ]
        .iter()
        .all(|o| o.is_ok())
    }
}

impl Gateway {
    /// Build the HTTP client and every store. Does not touch the network
    /// and spawns nothing until [`start()`](Self::start).
    pub fn new(config: GatewayConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let client = GatewayClient::new(config.url.clone(), &transport)?;
        Ok(Self::with_client(config, client))
    }

    /// Build around an existing client.
    pub fn with_client(config: GatewayConfig, client: GatewayClient) -> Self {
        let client = Arc::new(client);
        let notifier = Arc::new(Notifier::new(
            config.notification_capacity,
            config.notification_ttl,
        ));

        Self {
            inner: Arc::new(GatewayInner {
                settings: Arc::new(ConfigStore::new(
                    Arc::clone(&client),
                    Arc::clone(&notifier),
                )),
                wifi: Arc::new(WifiStore::new(Arc::clone(&client), Arc::clone(&notifier))),
                networks: Arc::new(WifiDialogStore::new(
                    Arc::clone(&client),
                    Arc::clone(&notifier),
                )),
                server: Arc::new(ServerStore::new(Arc::clone(&client), Arc::clone(&notifier))),
                modules: Arc::new(ModuleStore::new(Arc::clone(&client), Arc::clone(&notifier))),
                dashboard: Arc::new(DashboardPoller::new(Arc::clone(&client))),
                config,
                client,
                notifier,
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    // ── Accessors ────────────────────────────────────────────────

    pub fn config(&self) -> &GatewayConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &Arc<GatewayClient> {
        &self.inner.client
    }

    pub fn notifier(&self) -> &Arc<Notifier> {
        &self.inner.notifier
    }

    pub fn settings(&self) -> &Arc<ConfigStore> {
        &self.inner.settings
    }

    pub fn wifi(&self) -> &Arc<WifiStore> {
        &self.inner.wifi
    }

    pub fn networks(&self) -> &Arc<WifiDialogStore> {
        &self.inner.networks
    }

    pub fn server(&self) -> &Arc<ServerStore> {
        &self.inner.server
    }

    pub fn modules(&self) -> &Arc<ModuleStore> {
        &self.inner.modules
    }

    pub fn dashboard(&self) -> &Arc<DashboardPoller> {
        &self.inner.dashboard
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Fetch every store concurrently.
    pub async fn refresh_all(&self) -> RefreshReport {
        let (settings, wifi, networks, server, modules) = tokio::join!(
            self.inner.settings.fetch(),
            self.inner.wifi.fetch(),
            self.inner.networks.fetch(),
            self.inner.server.fetch(),
            self.inner.modules.fetch(),
        );

        // Keep the connected network out of the picker.
        if wifi.is_ok() {
            self.inner.networks.set_connected(&self.inner.wifi.state().current);
        }

        RefreshReport {
            settings,
            wifi,
            networks,
            server,
            modules,
        }
    }

    /// Spawn the background tasks: scheduled store refresh (when
    /// `refresh_interval_secs > 0`) and dashboard polling (when
    /// `dashboard_interval_secs > 0`).
    pub async fn start(&self) {
        let config = &self.inner.config;
        let mut handles = self.inner.task_handles.lock().await;

        if config.refresh_interval_secs > 0 {
            let scheduler = Scheduler::new(
                Duration::from_secs(config.refresh_interval_secs),
                self.inner.cancel.clone(),
            );
            let gateway = self.clone();
            handles.push(scheduler.spawn_subscriber("stores", move || {
                let gateway = gateway.clone();
                async move {
                    let report = gateway.refresh_all().await;
                    debug!(?report, "scheduled refresh finished");
                }
            }));
            handles.push(scheduler.spawn());
        }

        if config.dashboard_interval_secs > 0 {
            let scheduler = Scheduler::with_initial_delay(
                Duration::from_secs(config.dashboard_interval_secs),
                Duration::from_secs(config.dashboard_initial_delay_secs),
                self.inner.cancel.clone(),
            );
            let poller = Arc::clone(&self.inner.dashboard);
            handles.push(scheduler.spawn_subscriber("dashboard", move || {
                let poller = Arc::clone(&poller);
                async move {
                    poller.poll_once().await;
                }
            }));
            handles.push(scheduler.spawn());
        }

        info!(tasks = handles.len(), "gateway background tasks started");
    }

    /// Cancel and join every background task, including the clock ticker.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        self.inner.settings.stop_clock().await;
        debug!("gateway shut down");
    }
}
