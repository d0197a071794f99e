//! Sensor module command handlers.

use tabled::Tabled;

use hidra_core::{Gateway, ModuleDetail, ModuleSummary, SensorReading, SensorValue};

use crate::cli::{GlobalOpts, ModulesArgs, ModulesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ModuleRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Last Seen")]
    last_seen: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Battery")]
    battery: String,
}

impl From<&ModuleSummary> for ModuleRow {
    fn from(m: &ModuleSummary) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            last_seen: last_seen(m),
            address: m.address.clone().unwrap_or_else(|| "-".into()),
            battery: battery(m),
        }
    }
}

#[derive(Tabled)]
struct SensorRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl From<&SensorReading> for SensorRow {
    fn from(s: &SensorReading) -> Self {
        Self {
            id: s.id,
            kind: s.kind.to_string(),
            value: sensor_value(&s.value),
        }
    }
}

fn last_seen(m: &ModuleSummary) -> String {
    m.received_at
        .map_or_else(|| "-".into(), |t| t.format("%d/%m/%Y %H:%M:%S").to_string())
}

fn battery(m: &ModuleSummary) -> String {
    m.battery_percent
        .map_or_else(|| "-".into(), |b| format!("{b}%"))
}

fn sensor_value(value: &SensorValue) -> String {
    match value {
        SensorValue::Scalar(v) => format!("{v}"),
        SensorValue::Channels(channels) => channels
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" / "),
        SensorValue::Missing => "-".into(),
    }
}

fn detail(d: &ModuleDetail) -> String {
    let m = &d.summary;
    let header = [
        format!("ID:          {}", m.id),
        format!("Name:        {}", m.name),
        format!("Last Seen:   {}", last_seen(m)),
        format!(
            "Module Time: {}",
            d.module_clock
                .map_or_else(|| "-".into(), |t| t.format("%d/%m/%Y %H:%M:%S").to_string())
        ),
        format!("Address:     {}", m.address.as_deref().unwrap_or("-")),
        format!("Battery:     {}", battery(m)),
    ]
    .join("\n");

    if d.sensors.is_empty() {
        return header;
    }
    let rows: Vec<SensorRow> = d.sensors.iter().map(SensorRow::from).collect();
    format!("{header}\n\n{}", output::render_table(&rows))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    gateway: &Gateway,
    args: ModulesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let store = gateway.modules();
    let notifier = gateway.notifier();

    match args.command {
        ModulesCommand::List => {
            let outcome = store.fetch().await;
            util::settle(notifier, outcome.is_ok(), global)?;

            let modules = store.state().current;
            let out = output::render_list(&global.output, &modules, |m| ModuleRow::from(m), |m| {
                m.id.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ModulesCommand::Get { id } => {
            let outcome = store.fetch().await;
            util::settle(notifier, outcome.is_ok(), global)?;

            if store.open(id).is_none() {
                return Err(CliError::NotFound {
                    resource_type: "module".into(),
                    identifier: id.to_string(),
                    list_command: "modules list".into(),
                });
            }
            let loaded = store.detail(id).await;
            util::settle(notifier, loaded.is_some(), global)?;

            let Some(module) = loaded else {
                return Ok(());
            };
            let out =
                output::render_single(&global.output, &module, detail, |d| d.summary.name.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ModulesCommand::Create { from_file } => {
            let config = util::read_json_file(&from_file)?;
            let ok = store.create(&config).await;
            util::settle(notifier, ok, global)
        }

        ModulesCommand::Update { id, from_file } => {
            let config = util::read_json_file(&from_file)?;
            let ok = store.update(id, &config).await;
            util::settle(notifier, ok, global)
        }

        ModulesCommand::Delete { id } => {
            if !util::confirm(&format!("Delete module {id}?"), "modules delete", global.yes)? {
                return Ok(());
            }
            let ok = store.delete(id).await;
            util::settle(notifier, ok, global)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_channels_are_joined() {
        assert_eq!(
            sensor_value(&SensorValue::Channels([1.0, 2.5, 3.0, 4.0])),
            "1 / 2.5 / 3 / 4"
        );
        assert_eq!(sensor_value(&SensorValue::Scalar(21.5)), "21.5");
        assert_eq!(sensor_value(&SensorValue::Missing), "-");
    }
}
