// ── Runtime gateway configuration ──
//
// Describes *how* to talk to a gateway and how often to poll it. Never
// touches disk: the CLI (via hidra-config) builds a `GatewayConfig` and
// hands it in.

use std::time::Duration;

use url::Url;

/// Default address of the gateway on its own access point.
pub const DEFAULT_GATEWAY_URL: &str = "http://192.168.4.1";

/// Configuration for one gateway connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Gateway base URL (e.g., `http://192.168.4.1`).
    pub url: Url,
    /// Request timeout.
    pub timeout: Duration,
    /// How often the coordinated scheduler refreshes every store (seconds). 0 = never.
    pub refresh_interval_secs: u64,
    /// Dashboard poll period (seconds). 0 disables the poller.
    pub dashboard_interval_secs: u64,
    /// Delay before the first dashboard poll (seconds).
    pub dashboard_initial_delay_secs: u64,
    /// Maximum number of notifications kept in the queue.
    pub notification_capacity: usize,
    /// How long a notification stays visible.
    pub notification_ttl: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_GATEWAY_URL).expect("default gateway URL is valid"),
            timeout: Duration::from_secs(10),
            refresh_interval_secs: 0,
            dashboard_interval_secs: 300,
            dashboard_initial_delay_secs: 10,
            notification_capacity: 32,
            notification_ttl: Duration::from_millis(5000),
        }
    }
}
