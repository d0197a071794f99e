//! Gateway clock command handlers.

use hidra_core::clock;
use hidra_core::{Gateway, GatewaySettings, SettingsPatch};

use crate::cli::{ClockArgs, ClockCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(s: &GatewaySettings) -> String {
    [
        format!("Date:     {}", or_dash(&s.date())),
        format!("Time:     {}", or_dash(&s.time())),
        format!("Address:  {}", or_dash(&s.address)),
    ]
    .join("\n")
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn validate(date: Option<&str>, time: Option<&str>) -> Result<(), CliError> {
    if let Some(raw) = date {
        if clock::parse_date(raw).is_none() {
            return Err(CliError::Validation {
                field: "date".into(),
                reason: format!("'{raw}' is not DD/MM/YYYY or YYYY-MM-DD"),
            });
        }
    }
    if let Some(raw) = time {
        if clock::parse_time(raw).is_none() {
            return Err(CliError::Validation {
                field: "time".into(),
                reason: format!("'{raw}' is not HH:MM or HH:MM:SS"),
            });
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(gateway: &Gateway, args: ClockArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let store = gateway.settings();

    match args.command {
        ClockCommand::Show => {
            let outcome = store.fetch().await;
            util::settle(gateway.notifier(), outcome.is_ok(), global)?;
        }

        ClockCommand::Set {
            date,
            time,
            address,
        } => {
            validate(date.as_deref(), time.as_deref())?;

            // The patch is applied on top of the gateway's current clock.
            let outcome = store.fetch().await;
            util::settle(gateway.notifier(), outcome.is_ok(), global)?;

            let patch = SettingsPatch {
                date,
                time,
                address,
            };
            let ok = store.save(&patch).await;
            util::settle(gateway.notifier(), ok, global)?;
        }
    }

    let settings = store.state().current;
    let out = output::render_single(&global.output, &settings, detail, |s| {
        format!("{} {}", s.date(), s.time())
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
