//! Access point (server) command handlers.

use hidra_core::{Gateway, ServerPatch, ServerSettings};

use crate::cli::{GlobalOpts, ServerArgs, ServerCommand};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(s: &ServerSettings) -> String {
    [
        format!("SSID:     {}", s.ssid),
        format!("IP:       {}", s.ip),
        format!("Enabled:  {}", s.enabled),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(gateway: &Gateway, args: ServerArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let store = gateway.server();
    let notifier = gateway.notifier();

    let outcome = store.fetch().await;
    util::settle(notifier, outcome.is_ok(), global)?;

    match args.command {
        ServerCommand::Show => {}

        ServerCommand::Set { ssid, password } => {
            if ssid.as_deref().is_some_and(str::is_empty) {
                return Err(CliError::Validation {
                    field: "ssid".into(),
                    reason: "SSID cannot be empty".into(),
                });
            }
            let ok = store.save(&ServerPatch { ssid, pass: password }).await;
            util::settle(notifier, ok, global)?;
        }

        ServerCommand::Toggle => {
            let ok = store.toggle().await;
            util::settle(notifier, ok, global)?;
        }
    }

    let settings = store.state().current;
    let out = output::render_single(&global.output, &settings, detail, |s| s.ssid.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
