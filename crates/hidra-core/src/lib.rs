// hidra-core: State synchronization layer between hidra-api and consumers.

pub mod clock;
pub mod config;
pub mod convert;
pub mod dashboard;
pub mod error;
pub mod gateway;
pub mod model;
pub mod notify;
pub mod reconcile;
pub mod resource;
pub mod scheduler;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::GatewayConfig;
pub use dashboard::DashboardPoller;
pub use error::CoreError;
pub use gateway::{Gateway, RefreshReport};
pub use notify::{Notification, Notifier, Severity};
pub use reconcile::merge_networks;
pub use resource::{ResourceCell, ResourceState};
pub use scheduler::{Scheduler, Tick};
pub use store::{
    ConfigStore, FetchOutcome, ModuleStore, ServerStore, WifiDialogStore, WifiStore,
};
pub use stream::ResourceStream;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    AlertLevel, ConnectedNetwork, DashboardView, GatewaySettings, ModuleDetail, ModuleSummary,
    NetworkEntry, Parameter, SensorKind, SensorReading, SensorValue, ServerPatch, ServerSettings,
    SettingsPatch, WifiNetworks, WifiStatus,
};
