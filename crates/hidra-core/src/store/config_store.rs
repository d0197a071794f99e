// ── Gateway clock / address store ──
//
// Mirrors `GET /config`. Between fetches the clock is advanced locally by
// a 1 s ticker, which is respawned on every successful fetch so there is
// never more than one.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use hidra_api::GatewayClient;
use hidra_api::models::ConfigTimeRequest;

use super::{FetchOutcome, NOT_IMPLEMENTED, fetch_into};
use crate::clock;
use crate::model::{GatewaySettings, SettingsPatch};
use crate::notify::{Notifier, detail_of};
use crate::resource::{ResourceCell, ResourceState};
use crate::stream::ResourceStream;

const LOAD_FAILED: &str = "Erro ao carregar configurações.";
const SAVE_OK: &str = "Configurações salvas com sucesso!";
const SAVE_FAILED: &str = "Erro ao salvar configurações.";

/// Clock advance period.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

pub struct ConfigStore {
    client: Arc<GatewayClient>,
    notifier: Arc<Notifier>,
    cell: Arc<ResourceCell<GatewaySettings>>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl ConfigStore {
    pub fn new(client: Arc<GatewayClient>, notifier: Arc<Notifier>) -> Self {
        Self {
            client,
            notifier,
            cell: Arc::new(ResourceCell::new()),
            ticker: Mutex::new(None),
        }
    }

    pub fn state(&self) -> ResourceState<GatewaySettings> {
        self.cell.snapshot()
    }

    pub fn subscribe(&self) -> ResourceStream<GatewaySettings> {
        self.cell.subscribe()
    }

    // ── Sync ─────────────────────────────────────────────────────────

    /// Load the gateway clock and restart the local ticker from it.
    pub async fn fetch(&self) -> FetchOutcome {
        let outcome = fetch_into(
            &self.cell,
            &self.notifier,
            LOAD_FAILED,
            self.client.get_config(),
            GatewaySettings::try_from,
        )
        .await;

        if outcome == FetchOutcome::Applied {
            self.restart_clock().await;
        }
        outcome
    }

    /// Apply `patch`, push the result to the gateway and reload.
    ///
    /// Always leaves edit mode. On failure the visible value goes back to
    /// what the gateway last confirmed.
    pub async fn save(&self, patch: &SettingsPatch) -> bool {
        let rollback = self.cell.snapshot().confirmed().clone();
        self.cell.update_current(|s| patch.apply(s));
        let draft = self.cell.current();
        self.cell.commit_edit();

        let _saving = self.cell.begin_mutation();

        let Some(moment) = draft.clock else {
            self.cell.replace_current(rollback);
            self.cell.set_error(SAVE_FAILED);
            self.notifier
                .error(SAVE_FAILED, "gateway clock has not been loaded");
            return false;
        };

        let request = ConfigTimeRequest {
            date: clock::gateway_date(moment),
            time: clock::time_string(Some(moment)),
            address: draft.address,
        };

        match self.client.set_config_time(&request).await {
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

    // ── Editing ──────────────────────────────────────────────────────

    pub fn hold(&self) -> bool {
        self.cell.hold()
    }

    pub fn restore(&self) -> bool {
        self.cell.restore()
    }

    /// Edit only the date half of the visible clock.
    pub fn set_date(&self, date: &str) -> bool {
        let mut changed = false;
        self.cell.update_current(|s| changed = s.set_date(date));
        changed
    }

    /// Edit only the time half of the visible clock.
    pub fn set_time(&self, time: &str) -> bool {
        let mut changed = false;
        self.cell.update_current(|s| changed = s.set_time(time));
        changed
    }

    /// Save when editing; otherwise there is nothing to do.
    pub async fn primary_action(&self) -> bool {
        if self.cell.is_editing() {
            self.save(&SettingsPatch::default()).await
        } else {
            self.notifier.info(NOT_IMPLEMENTED);
            false
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

    // ── Clock ────────────────────────────────────────────────────────

    /// Advance the confirmed clock by `elapsed`. While editing this moves
    /// the backup, leaving the user's draft alone.
    pub fn tick(&self, elapsed: Duration) {
        advance_clock(&self.cell, elapsed);
    }

    pub async fn is_clock_running(&self) -> bool {
        self.ticker
            .lock()
            .await
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    pub async fn stop_clock(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.abort();
        }
    }

    async fn restart_clock(&self) {
        let mut ticker = self.ticker.lock().await;
        if let Some(old) = ticker.take() {
            old.abort();
        }
        *ticker = Some(tokio::spawn(clock_task(Arc::clone(&self.cell))));
    }
}

impl Drop for ConfigStore {
    fn drop(&mut self) {
        if let Some(handle) = self.ticker.get_mut().take() {
            handle.abort();
        }
    }
}

fn advance_clock(cell: &ResourceCell<GatewaySettings>, elapsed: Duration) {
    cell.update_confirmed(|s| {
        if let Some(moment) = s.clock {
            s.clock = Some(clock::advance(moment, elapsed));
        }
    });
}

async fn clock_task(cell: Arc<ResourceCell<GatewaySettings>>) {
    let mut interval = tokio::time::interval(TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await; // consume the immediate first tick

    let mut last = Instant::now();
    loop {
        interval.tick().await;
        let now = Instant::now();
        advance_clock(&cell, now.duration_since(last));
        last = now;
    }
}
