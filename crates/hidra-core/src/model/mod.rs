// ── Gateway domain model ──
//
// Canonical shapes of the resources the stores mirror. Wire quirks
// (split date strings, RSSI suffixes, firmware spellings) are resolved in
// `convert` before anything lands here.

pub mod config;
pub mod dashboard;
pub mod module;
pub mod server;
pub mod wifi;

// ── Re-exports ──────────────────────────────────────────────────────

pub use config::{GatewaySettings, SettingsPatch};
pub use dashboard::{AlertLevel, DashboardView, FloodRisk, IqaReading, Parameter, SensorCard};
pub use module::{ModuleDetail, ModuleSummary, SensorKind, SensorReading, SensorValue};
pub use server::{ServerPatch, ServerSettings};
pub use wifi::{ConnectedNetwork, NetworkEntry, WifiNetworks, WifiStatus};
