//! Wi-Fi station command handlers.

use tabled::Tabled;

use hidra_core::{Gateway, NetworkEntry, WifiNetworks, WifiStatus};

use crate::cli::{GlobalOpts, WifiArgs, WifiCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct NetworkRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "SSID")]
    ssid: String,
    #[tabled(rename = "Signal")]
    signal: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Saved ID")]
    saved_id: String,
}

impl From<&NetworkEntry> for NetworkRow {
    fn from(n: &NetworkEntry) -> Self {
        Self {
            id: n.id,
            ssid: n.ssid.clone(),
            signal: util::signal(Some(n.signal)),
            saved: util::yes_no(n.is_saved),
            saved_id: n.saved_id.map_or_else(|| "-".into(), |id| id.to_string()),
        }
    }
}

fn status_detail(s: &WifiStatus) -> String {
    [
        format!("SSID:     {}", s.ssid),
        format!("Signal:   {}", util::signal(s.signal)),
        format!("IP:       {}", s.ip),
        format!("Enabled:  {}", s.enabled),
    ]
    .join("\n")
}

fn networks_detail(n: &WifiNetworks) -> String {
    let table = output::render_table(&n.entries.iter().map(NetworkRow::from).collect::<Vec<_>>());
    match &n.connected {
        Some(c) => format!("Connected: {} ({}, {})\n{table}", c.ssid, c.ip, util::signal(c.signal)),
        None => table,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(gateway: &Gateway, args: WifiArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let notifier = gateway.notifier();

    match args.command {
        WifiCommand::Status => {
            let outcome = gateway.wifi().fetch().await;
            util::settle(notifier, outcome.is_ok(), global)?;
            print_status(gateway, global)
        }

        WifiCommand::Toggle => {
            // The request flips whatever the gateway last reported.
            let outcome = gateway.wifi().fetch().await;
            util::settle(notifier, outcome.is_ok(), global)?;

            let ok = gateway.wifi().toggle().await;
            util::settle(notifier, ok, global)?;
            print_status(gateway, global)
        }

        WifiCommand::Networks => {
            let (status, networks) =
                tokio::join!(gateway.wifi().fetch(), gateway.networks().fetch());
            if status.is_ok() {
                gateway.networks().set_connected(&gateway.wifi().state().current);
            }
            util::settle(notifier, networks.is_ok(), global)?;

            let state = gateway.networks().state().current;
            let out = output::render_single(&global.output, &state, networks_detail, |n| {
                n.entries
                    .iter()
                    .map(|e| e.ssid.clone())
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        WifiCommand::Connect { ssid, mut password } => {
            // Saved networks reconnect with the stored password.
            if password.is_empty() {
                let outcome = gateway.networks().fetch().await;
                util::settle(notifier, outcome.is_ok(), global)?;
                if let Some(stored) = gateway
                    .networks()
                    .network_by_ssid(&ssid)
                    .and_then(|n| n.stored_password)
                {
                    password = stored;
                }
            }
            let ok = gateway.networks().try_connect(&ssid, &password).await;
            util::settle(notifier, ok, global)
        }

        WifiCommand::Forget { id } => {
            if !util::confirm(&format!("Forget saved network {id}?"), "wifi forget", global.yes)? {
                return Ok(());
            }
            let ok = gateway.networks().forget(id).await;
            util::settle(notifier, ok, global)
        }
    }
}

fn print_status(gateway: &Gateway, global: &GlobalOpts) -> Result<(), CliError> {
    let status = gateway.wifi().state().current;
    let out = output::render_single(&global.output, &status, status_detail, |s| s.ssid.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
