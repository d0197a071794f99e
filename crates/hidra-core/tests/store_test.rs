#![allow(clippy::unwrap_used)]
// Store behaviour against a wiremock gateway.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hidra_api::{GatewayClient, TransportConfig};
use hidra_core::{
    ConfigStore, FetchOutcome, ModuleStore, Notifier, ServerPatch, ServerStore, Severity,
    SettingsPatch, WifiDialogStore, WifiStatus, WifiStore,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Arc<GatewayClient>, Arc<Notifier>) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = GatewayClient::new(base_url, &TransportConfig::default()).unwrap();
    (server, Arc::new(client), Arc::new(Notifier::default()))
}

async fn mount_config(server: &MockServer, date: &str, time: &str) {
    Mock::given(method("GET"))
        .and(path("/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "date": date, "time": time, "address": "0xaa"
        })))
        .mount(server)
        .await;
}

fn ssids(store: &WifiDialogStore) -> Vec<String> {
    store
        .state()
        .current
        .entries
        .iter()
        .map(|n| n.ssid.clone())
        .collect()
}

fn status_on(ssid: &str) -> WifiStatus {
    WifiStatus {
        ssid: ssid.into(),
        signal: Some(-50.0),
        ip: "192.168.1.2".into(),
        enabled: true,
    }
}

async fn mount_networks(server: &MockServer, body: serde_json::Value, delay: Duration) {
    Mock::given(method("GET"))
        .and(path("/wifi/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body).set_delay(delay))
        .mount(server)
        .await;
}

fn last_notification(notifier: &Notifier) -> (String, Severity) {
    let n = notifier.active().pop().unwrap();
    (n.text, n.severity)
}

// ── Config store ────────────────────────────────────────────────────

#[tokio::test]
async fn config_fetch_loads_clock_and_starts_ticker() {
    let (server, client, notifier) = setup().await;
    mount_config(&server, "23/06/2025", "14:19:00").await;

    let store = ConfigStore::new(client, notifier);
    assert_eq!(store.fetch().await, FetchOutcome::Applied);

    let state = store.state();
    assert_eq!(state.current.date(), "2025-06-23");
    assert_eq!(state.current.address, "0xaa");
    assert!(!state.loading);
    assert!(state.last_synced.is_some());
    assert!(store.is_clock_running().await);
}

#[tokio::test]
async fn config_fetch_non_200_sets_error() {
    let (server, client, notifier) = setup().await;
    Mock::given(method("GET"))
        .and(path("/config"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = ConfigStore::new(client, Arc::clone(&notifier));
    assert_eq!(store.fetch().await, FetchOutcome::Failed);

    let state = store.state();
    assert_eq!(state.error.as_deref(), Some("Erro ao carregar configurações."));
    assert!(!state.loading);
    assert_eq!(
        last_notification(&notifier),
        ("Erro ao carregar configurações.".into(), Severity::Error)
    );
    assert!(!store.is_clock_running().await);
}

#[tokio::test]
async fn tick_while_editing_moves_backup_only() {
    let (server, client, notifier) = setup().await;
    mount_config(&server, "23/06/2025", "14:19:00").await;

    let store = ConfigStore::new(client, notifier);
    store.fetch().await;
    store.stop_clock().await;

    assert!(store.hold());
    let before = store.state();
    store.tick(Duration::from_secs(1));
    let after = store.state();

    assert_eq!(after.current, before.current);
    assert_eq!(after.backup.unwrap().time(), "14:19:01");
}

#[tokio::test]
async fn hold_edit_restore_round_trip() {
    let (server, client, notifier) = setup().await;
    mount_config(&server, "23/06/2025", "14:19:00").await;

    let store = ConfigStore::new(client, notifier);
    store.fetch().await;
    store.stop_clock().await;
    let before = store.state().current;

    assert!(store.hold());
    assert!(store.set_time("08:00:00"));
    assert_eq!(store.state().current.time(), "08:00:00");
    assert!(store.restore());

    assert_eq!(store.state().current, before);
    assert!(!store.state().edit_mode);
}

#[tokio::test]
async fn config_save_posts_gateway_date_format() {
    let (server, client, notifier) = setup().await;
    mount_config(&server, "01/02/2025", "08:00:00").await;
    Mock::given(method("POST"))
        .and(path("/config/time"))
        .and(body_json(json!({
            "date": "01/02/2025", "time": "08:00:00", "address": "0xaa"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "time updated"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = ConfigStore::new(client, Arc::clone(&notifier));
    store.fetch().await;
    store.stop_clock().await;
    store.hold();

    let saved = store
        .save(&SettingsPatch {
            date: Some("2025-02-01".into()),
            time: Some("08:00:00".into()),
            address: None,
        })
        .await;

    assert!(saved);
    assert!(!store.state().edit_mode);
    assert_eq!(
        last_notification(&notifier),
        ("Configurações salvas com sucesso!".into(), Severity::Success)
    );
}

#[tokio::test]
async fn config_save_failure_rolls_back() {
    let (server, client, notifier) = setup().await;
    mount_config(&server, "23/06/2025", "14:19:00").await;
    Mock::given(method("POST"))
        .and(path("/config/time"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = ConfigStore::new(client, Arc::clone(&notifier));
    store.fetch().await;
    store.stop_clock().await;
    let confirmed = store.state().current;

    store.hold();
    store.set_date("01/01/2030");
    let saved = store.save(&SettingsPatch::default()).await;

    let state = store.state();
    assert!(!saved);
    assert_eq!(state.current, confirmed);
    assert!(!state.edit_mode);
    assert_eq!(state.backup, None);
    assert_eq!(state.error.as_deref(), Some("Erro ao salvar configurações."));
}

#[tokio::test]
async fn config_primary_action_outside_edit_is_info() {
    let (_server, client, notifier) = setup().await;
    let store = ConfigStore::new(client, Arc::clone(&notifier));

    assert!(!store.primary_action().await);
    assert_eq!(
        last_notification(&notifier),
        ("Funcionalidade ainda não implementada.".into(), Severity::Info)
    );
}

// ── Wi-Fi status ────────────────────────────────────────────────────

async fn mount_wifi_status(server: &MockServer, status: u8, times: u64) {
    Mock::given(method("GET"))
        .and(path("/wifi/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ssid": "rede 1", "rssi": "-30db", "ip": "192.168.1.2", "status": status
        })))
        .up_to_n_times(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn wifi_toggle_on_sends_one_and_reloads() {
    let (server, client, notifier) = setup().await;
    mount_wifi_status(&server, 0, 1).await;
    mount_wifi_status(&server, 1, 1).await;
    Mock::given(method("POST"))
        .and(path("/wifi/toggle"))
        .and(body_json(json!({"status": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let store = WifiStore::new(client, Arc::clone(&notifier));
    store.fetch().await;
    assert!(!store.state().current.enabled);
    assert_eq!(store.state().current.signal, Some(-30.0));

    assert!(store.toggle().await);
    assert!(store.state().current.enabled);
    assert_eq!(
        last_notification(&notifier),
        ("Wifi ativado com sucesso!".into(), Severity::Success)
    );
}

#[tokio::test]
async fn wifi_toggle_off_sends_zero() {
    let (server, client, notifier) = setup().await;
    mount_wifi_status(&server, 1, 1).await;
    mount_wifi_status(&server, 0, 1).await;
    Mock::given(method("POST"))
        .and(path("/wifi/toggle"))
        .and(body_json(json!({"status": 0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": 0})))
        .expect(1)
        .mount(&server)
        .await;

    let store = WifiStore::new(client, Arc::clone(&notifier));
    store.fetch().await;
    assert!(store.toggle().await);
    assert!(!store.state().current.enabled);
    assert_eq!(
        last_notification(&notifier).0,
        "Wifi desativado com sucesso!"
    );
}

#[tokio::test]
async fn wifi_final_state_comes_from_refetch() {
    let (server, client, notifier) = setup().await;
    // The gateway accepts the toggle but keeps the radio off.
    mount_wifi_status(&server, 0, 2).await;
    Mock::given(method("POST"))
        .and(path("/wifi/toggle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": 1})))
        .mount(&server)
        .await;

    let store = WifiStore::new(client, notifier);
    store.fetch().await;
    store.toggle().await;

    assert!(!store.state().current.enabled);
}

#[tokio::test]
async fn wifi_toggle_failure_sets_error() {
    let (server, client, notifier) = setup().await;
    mount_wifi_status(&server, 0, 1).await;
    Mock::given(method("POST"))
        .and(path("/wifi/toggle"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = WifiStore::new(client, Arc::clone(&notifier));
    store.fetch().await;

    assert!(!store.toggle().await);
    let state = store.state();
    assert_eq!(
        state.error.as_deref(),
        Some("Erro ao alterar configurações de Wifi.")
    );
    assert!(!state.loading);
}

// ── Wi-Fi networks ──────────────────────────────────────────────────

#[tokio::test]
async fn networks_merge_and_hide_connected() {
    let (server, client, notifier) = setup().await;
    Mock::given(method("GET"))
        .and(path("/wifi/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "saved": [
                {"id": 0, "ssid": "B", "pass": "x"},
                {"id": 1, "ssid": "C", "password": "y"}
            ],
            "near": [
                {"id": 0, "ssid": "A", "rssi": -50},
                {"id": 0, "ssid": "B", "rssi": "-80"}
            ]
        })))
        .mount(&server)
        .await;

    let store = WifiDialogStore::new(client, notifier);
    store.fetch().await;

    let ssids: Vec<_> = store
        .state()
        .current
        .entries
        .iter()
        .map(|n| n.ssid.clone())
        .collect();
    assert_eq!(ssids, vec!["A", "B", "C"]);
    assert_eq!(
        store.network_by_ssid("C").unwrap().stored_password.as_deref(),
        Some("y")
    );

    store.set_connected(&hidra_core::WifiStatus {
        ssid: "A".into(),
        signal: Some(-50.0),
        ip: "192.168.1.2".into(),
        enabled: true,
    });
    store.fetch().await;

    let state = store.state().current;
    assert!(state.entries.iter().all(|n| n.ssid != "A"));
    assert_eq!(state.connected.map(|c| c.ssid), Some("A".into()));
}

#[tokio::test]
async fn connect_failure_notifies() {
    let (server, client, notifier) = setup().await;
    Mock::given(method("POST"))
        .and(path("/wifi/connect"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = WifiDialogStore::new(client, Arc::clone(&notifier));
    assert!(!store.try_connect("rede A", "senha").await);
    assert_eq!(
        last_notification(&notifier),
        ("Erro ao tentar se conectar a rede.".into(), Severity::Error)
    );
}

#[tokio::test]
async fn connect_success_reloads_list() {
    let (server, client, notifier) = setup().await;
    Mock::given(method("POST"))
        .and(path("/wifi/connect"))
        .and(body_json(json!({"ssid": "rede A", "pass": "senha"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "wifi connected", "input": {"ssid": "rede A"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wifi/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"saved": [], "near": []})))
        .expect(1)
        .mount(&server)
        .await;

    let store = WifiDialogStore::new(client, Arc::clone(&notifier));
    assert!(store.try_connect("rede A", "senha").await);
    assert_eq!(
        last_notification(&notifier).0,
        "Conexão realizada com sucesso!"
    );
}

#[tokio::test]
async fn connect_makes_joined_network_the_connected_one() {
    let (server, client, notifier) = setup().await;
    mount_networks(
        &server,
        json!({
            "saved": [],
            "near": [{"id": 0, "ssid": "A", "rssi": -40}, {"id": 1, "ssid": "B", "rssi": -60}]
        }),
        Duration::ZERO,
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/wifi/connect"))
        .and(body_json(json!({"ssid": "B", "pass": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "wifi connected"})))
        .mount(&server)
        .await;

    let store = WifiDialogStore::new(client, notifier);
    store.fetch().await;
    store.set_connected(&status_on("A"));
    assert_eq!(ssids(&store), vec!["B"]);

    assert!(store.try_connect("B", "pw").await);

    let state = store.state().current;
    let connected = state.connected.unwrap();
    assert_eq!(connected.ssid, "B");
    assert_eq!(connected.signal, Some(-60.0));
    assert_eq!(ssids(&store), vec!["A"]);
}

#[tokio::test]
async fn connected_network_set_mid_fetch_stays_hidden() {
    let (server, client, notifier) = setup().await;
    mount_networks(
        &server,
        json!({
            "saved": [],
            "near": [{"id": 0, "ssid": "A", "rssi": -40}, {"id": 1, "ssid": "B", "rssi": -60}]
        }),
        Duration::from_millis(300),
    )
    .await;

    let store = WifiDialogStore::new(client, notifier);
    let (outcome, ()) = tokio::join!(store.fetch(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        store.set_connected(&status_on("A"));
    });

    assert_eq!(outcome, FetchOutcome::Applied);
    assert_eq!(
        store.state().current.connected.map(|c| c.ssid),
        Some("A".into())
    );
    assert_eq!(ssids(&store), vec!["B"]);
}

#[tokio::test]
async fn forget_deletes_saved_network_and_reloads() {
    let (server, client, notifier) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/wifi/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "deleted"})))
        .expect(1)
        .mount(&server)
        .await;
    mount_networks(
        &server,
        json!({"saved": [], "near": [{"id": 0, "ssid": "A", "rssi": -40}]}),
        Duration::ZERO,
    )
    .await;

    let store = WifiDialogStore::new(client, Arc::clone(&notifier));
    assert!(store.forget(4).await);

    assert_eq!(ssids(&store), vec!["A"]);
    assert!(!store.state().loading);
    assert_eq!(
        last_notification(&notifier),
        ("Rede removida com sucesso!".into(), Severity::Success)
    );
}

#[tokio::test]
async fn forget_failure_sets_error() {
    let (server, client, notifier) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/wifi/4"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = WifiDialogStore::new(client, Arc::clone(&notifier));
    assert!(!store.forget(4).await);
    assert_eq!(store.state().error.as_deref(), Some("Erro ao remover a rede."));
    assert_eq!(last_notification(&notifier).1, Severity::Error);
}

// ── Server ──────────────────────────────────────────────────────────

#[tokio::test]
async fn server_primary_action_saves_when_editing() {
    let (server, client, notifier) = setup().await;
    Mock::given(method("GET"))
        .and(path("/server/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ssid": "hidra", "pass": "12345678", "ip": "192.168.4.1", "status": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/server/config"))
        .and(body_json(json!({"ssid": "hidra-2", "pass": "12345678"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = ServerStore::new(client, Arc::clone(&notifier));
    store.fetch().await;
    store.secondary_action();
    store.set_ssid("hidra-2");

    assert!(store.primary_action().await);
    assert!(!store.state().edit_mode);
    assert_eq!(
        last_notification(&notifier).0,
        "Configurações de servidor salvas com sucesso!"
    );
}

#[tokio::test]
async fn server_save_failure_rolls_back() {
    let (server, client, notifier) = setup().await;
    Mock::given(method("GET"))
        .and(path("/server/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ssid": "hidra", "pass": "12345678", "ip": "192.168.4.1", "status": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/server/config"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = ServerStore::new(client, notifier);
    store.fetch().await;

    let saved = store
        .save(&ServerPatch {
            ssid: Some("outra".into()),
            pass: None,
        })
        .await;

    assert!(!saved);
    assert_eq!(store.state().current.ssid, "hidra");
    assert_eq!(
        store.state().error.as_deref(),
        Some("Erro ao salvar configurações de servidor.")
    );
}

#[tokio::test]
async fn server_primary_action_toggles_when_viewing() {
    let (server, client, notifier) = setup().await;
    Mock::given(method("GET"))
        .and(path("/server/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ssid": "hidra", "pass": "", "ip": "192.168.4.1", "status": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/server/toggle"))
        .and(body_json(json!({"status": 0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": 0})))
        .expect(1)
        .mount(&server)
        .await;

    let store = ServerStore::new(client, Arc::clone(&notifier));
    store.fetch().await;

    assert!(store.primary_action().await);
    assert_eq!(
        last_notification(&notifier).0,
        "Servidor desativado com sucesso!"
    );
}

// ── Modules ─────────────────────────────────────────────────────────

#[tokio::test]
async fn modules_fetch_and_open() {
    let (server, client, notifier) = setup().await;
    Mock::given(method("GET"))
        .and(path("/modules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "modules": [
                {"id": 0, "name": "rio azul 2", "recieve-date": "2025-23-06",
                 "recieve-time": "14:19:00", "bat": 88}
            ]
        })))
        .mount(&server)
        .await;

    let store = ModuleStore::new(client, Arc::clone(&notifier));
    assert!(store.fetch().await.is_ok());

    let module = store.open(0).unwrap();
    assert_eq!(module.name, "rio azul 2");
    assert_eq!(
        last_notification(&notifier),
        ("Abrindo módulo: rio azul 2".into(), Severity::Info)
    );
    assert!(store.open(9).is_none());
}

#[tokio::test]
async fn module_delete_reloads_list() {
    let (server, client, notifier) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/modules/0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "module deleted", "input": null
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/modules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"modules": []})))
        .expect(1)
        .mount(&server)
        .await;

    let store = ModuleStore::new(client, Arc::clone(&notifier));
    assert!(store.delete(0).await);
    assert!(store.state().current.is_empty());
    assert_eq!(last_notification(&notifier).0, "Módulo removido com sucesso!");
}

#[tokio::test]
async fn module_detail_failure_returns_none() {
    let (server, client, notifier) = setup().await;
    Mock::given(method("GET"))
        .and(path("/modules/4/date"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = ModuleStore::new(client, Arc::clone(&notifier));
    assert!(store.detail(4).await.is_none());
    assert_eq!(last_notification(&notifier).1, Severity::Error);
}

async fn mount_module_list(server: &MockServer, names: &[&str]) {
    let modules: Vec<_> = names
        .iter()
        .enumerate()
        .map(|(id, name)| json!({"id": id, "name": name}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/modules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"modules": modules})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn module_create_posts_config_and_reloads() {
    let (server, client, notifier) = setup().await;
    let config = json!({"name": "rio doce", "sensors": [1, 2]});
    Mock::given(method("POST"))
        .and(path("/modules/new"))
        .and(body_json(config.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "module added"})))
        .expect(1)
        .mount(&server)
        .await;
    mount_module_list(&server, &["rio doce"]).await;

    let store = ModuleStore::new(client, Arc::clone(&notifier));
    assert!(store.create(&config).await);

    assert_eq!(store.module(0).unwrap().name, "rio doce");
    assert!(!store.state().loading);
    assert_eq!(
        last_notification(&notifier),
        ("Módulo adicionado com sucesso!".into(), Severity::Success)
    );
}

#[tokio::test]
async fn module_update_posts_config_and_reloads() {
    let (server, client, notifier) = setup().await;
    let config = json!({"name": "rio azul"});
    Mock::given(method("POST"))
        .and(path("/modules/0/config"))
        .and(body_json(config.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "module updated"})))
        .expect(1)
        .mount(&server)
        .await;
    mount_module_list(&server, &["rio azul"]).await;

    let store = ModuleStore::new(client, Arc::clone(&notifier));
    assert!(store.update(0, &config).await);

    assert_eq!(store.module(0).unwrap().name, "rio azul");
    assert_eq!(last_notification(&notifier).0, "Módulo atualizado com sucesso!");
}

#[tokio::test]
async fn module_write_failure_sets_error_without_reload() {
    let (server, client, notifier) = setup().await;
    Mock::given(method("POST"))
        .and(path("/modules/new"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/modules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"modules": []})))
        .expect(0)
        .mount(&server)
        .await;

    let store = ModuleStore::new(client, Arc::clone(&notifier));
    assert!(!store.create(&json!({})).await);

    let state = store.state();
    assert_eq!(state.error.as_deref(), Some("Erro ao adicionar módulo."));
    assert!(!state.loading);
    assert_eq!(
        last_notification(&notifier),
        ("Erro ao adicionar módulo.".into(), Severity::Error)
    );
}

#[tokio::test]
async fn overlapping_fetches_keep_the_newest_response() {
    let (server, client, notifier) = setup().await;
    // First request answers slowly with the older list.
    Mock::given(method("GET"))
        .and(path("/modules"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"modules": [{"id": 0, "name": "antigo"}]}))
                .set_delay(Duration::from_millis(300)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_module_list(&server, &["novo"]).await;

    let store = ModuleStore::new(client, notifier);
    let (older, newer) = tokio::join!(store.fetch(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        store.fetch().await
    });

    assert_eq!(older, FetchOutcome::Superseded);
    assert_eq!(newer, FetchOutcome::Applied);
    let state = store.state();
    assert_eq!(state.current.len(), 1);
    assert_eq!(state.current[0].name, "novo");
    assert!(!state.loading);
}
