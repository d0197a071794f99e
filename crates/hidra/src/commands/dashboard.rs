//! Water-quality dashboard handler.
//!
//! One-shot mode polls once and prints. `--watch` drives the poller from a
//! [`Scheduler`] and redraws after every poll until Ctrl-C.

use std::time::Duration;

use tabled::Tabled;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use hidra_core::{DashboardView, Gateway, Scheduler};

use crate::cli::{DashboardArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "Parameter")]
    label: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Unit")]
    unit: &'static str,
    #[tabled(rename = "Status")]
    status: String,
}

fn detail(view: &DashboardView, color: bool) -> String {
    let rows: Vec<CardRow> = view
        .cards
        .iter()
        .map(|card| CardRow {
            label: card.parameter.label().into(),
            value: output::paint_alert(&card.display, card.alert, color),
            unit: card.parameter.unit(),
            status: card.alert.to_string(),
        })
        .collect();

    let mut lines = vec![output::render_table(&rows)];
    if let Some(iqa) = &view.iqa {
        lines.push(format!("IQA:         {:.1} ({})", iqa.value, iqa.classification));
    }
    if let Some(risk) = &view.flood_risk {
        lines.push(format!("Flood risk:  {}", risk.level));
    }
    lines.push(format!(
        "Source:      {}{}",
        view.data_source.as_deref().unwrap_or("-"),
        if view.firebase_connected { " (firebase)" } else { "" }
    ));
    lines.push(format!(
        "Updated:     {}",
        view.last_update
            .map_or_else(|| "-".into(), |t| t.format("%d/%m/%Y %H:%M:%S UTC").to_string())
    ));
    if let Some(error) = &view.last_error {
        lines.push(format!("Last error:  {error}"));
    }
    lines.join("\n")
}

fn render(view: &DashboardView, global: &GlobalOpts) -> Result<String, CliError> {
    let color = output::should_color(&global.color);
    output::render_single(&global.output, view, |v| detail(v, color), |v| {
        v.cards
            .iter()
            .map(|c| format!("{}={}", c.parameter, c.display))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    gateway: &Gateway,
    args: DashboardArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let poller = gateway.dashboard();

    if !args.watch {
        if !poller.poll_once().await {
            let view = poller.view();
            return Err(CliError::OperationFailed {
                message: "Could not load the dashboard".into(),
                detail: view.last_error.unwrap_or_default(),
            });
        }
        let out = render(&poller.view(), global)?;
        output::print_output(&out, global.quiet);
        return Ok(());
    }

    let secs = args
        .interval
        .unwrap_or(gateway.config().dashboard_interval_secs);
    if secs == 0 {
        return Err(CliError::Validation {
            field: "interval".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    let cancel = CancellationToken::new();
    let scheduler = Scheduler::new(Duration::from_secs(secs), cancel.clone());
    let mut ticks = scheduler.subscribe();
    let timer = scheduler.spawn();

    // First frame right away; later ones on every tick.
    poller.poll_once().await;
    output::print_output(&render(&poller.view(), global)?, global.quiet);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            biased;
            _ = &mut ctrl_c => break,
            tick = ticks.recv() => match tick {
                Ok(tick) => {
                    tracing::debug!(seq = tick.seq, "dashboard tick");
                    poller.poll_once().await;
                    output::print_output(&render(&poller.view(), global)?, global.quiet);
                }
                Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }

    cancel.cancel();
    let _ = timer.await;
    Ok(())
}
