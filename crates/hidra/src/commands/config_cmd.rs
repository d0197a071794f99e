//! Config subcommand handlers.

use dialoguer::Input;

use hidra_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn as_toml(cfg: &Config) -> String {
    toml::to_string_pretty(cfg).unwrap_or_else(|e| format!("# failed to render config: {e}"))
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("Hidra CLI configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let mut cfg = config::load_config_or_default();

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default(cfg.active_profile_name().to_owned())
                .interact_text()
                .map_err(prompt_err)?;

            let existing = cfg.profile(&profile_name).unwrap_or_default();

            let gateway: String = Input::new()
                .with_prompt("Gateway URL")
                .default(existing.gateway.clone())
                .validate_with(|url: &String| -> Result<(), String> {
                    url::Url::parse(url)
                        .map(|_| ())
                        .map_err(|e| format!("invalid URL: {e}"))
                })
                .interact_text()
                .map_err(prompt_err)?;

            let timeout: u64 = Input::new()
                .with_prompt("Request timeout (seconds)")
                .default(existing.timeout.unwrap_or(cfg.defaults.timeout))
                .interact_text()
                .map_err(prompt_err)?;

            let dashboard_interval: u64 = Input::new()
                .with_prompt("Dashboard refresh (seconds)")
                .default(
                    existing
                        .dashboard_interval
                        .unwrap_or(cfg.defaults.dashboard_interval),
                )
                .interact_text()
                .map_err(prompt_err)?;

            let profile = Profile {
                gateway,
                timeout: Some(timeout),
                dashboard_interval: Some(dashboard_interval),
                ..existing
            };

            // Fail before writing anything unusable.
            hidra_config::profile_to_gateway_config(&profile, &cfg.defaults)?;

            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());

            let written = config::save_config(&cfg)?;

            eprintln!("\nConfiguration written to {}", written.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: hidra clock show");

            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = output::render_single(&global.output, &cfg, as_toml, |c| {
                c.active_profile_name().to_owned()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}
