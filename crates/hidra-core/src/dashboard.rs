// ── Dashboard poller ──
//
// Polls the aggregate water-quality endpoint and patches a `DashboardView`.
// A failed poll is logged and recorded on the view; the previous readings
// stay on screen and no notification is raised.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, warn};

use hidra_api::GatewayClient;

use crate::error::CoreError;
use crate::model::DashboardView;

pub struct DashboardPoller {
    client: Arc<GatewayClient>,
    view: watch::Sender<DashboardView>,
}

impl DashboardPoller {
    pub fn new(client: Arc<GatewayClient>) -> Self {
        let (view, _) = watch::channel(DashboardView::default());
        Self { client, view }
    }

    pub fn view(&self) -> DashboardView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardView> {
        self.view.subscribe()
    }

    /// Fetch once and patch the view. Returns whether the poll succeeded.
    pub async fn poll_once(&self) -> bool {
        let failure = match self.client.get_dashboard().await {
            Ok(payload) if payload.success => {
                let now = Utc::now();
                self.view.send_modify(|v| v.apply(&payload, now));
                debug!(source = ?payload.data_source, "dashboard updated");
                return true;
            }
            Ok(payload) => payload
                .error
                .unwrap_or_else(|| "dashboard reported failure".into()),
            Err(e) => CoreError::from(e).to_string(),
        };

        warn!(error = %failure, "dashboard poll failed");
        self.view.send_modify(|v| v.last_error = Some(failure));
        false
    }
}
