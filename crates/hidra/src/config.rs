//! CLI-side configuration: `GlobalOpts`-aware wrappers around `hidra-config`.
//!
//! Core never sees profiles -- it receives a pre-built `GatewayConfig`.

use std::time::Duration;

use hidra_config::{Config, Profile};
use hidra_core::GatewayConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use hidra_config::{config_path, load_config_or_default, save_config};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.active_profile_name().to_owned())
}

/// Translate the active profile + global flags into a `GatewayConfig`.
///
/// Precedence: `--gateway`/`--timeout` (or their env vars), then the
/// profile, then `[defaults]`.
pub fn resolve_gateway_config(global: &GlobalOpts, cfg: &Config) -> Result<GatewayConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let mut profile: Profile = match cfg.profile(&profile_name) {
        Ok(profile) => profile,
        // An explicit URL makes the profile optional.
        Err(_) if global.gateway.is_some() => Profile::default(),
        Err(_) => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(cfg),
            });
        }
    };

    if let Some(url) = &global.gateway {
        profile.gateway.clone_from(url);
    }

    let mut gateway = hidra_config::profile_to_gateway_config(&profile, &cfg.defaults)?;
    if let Some(secs) = global.timeout {
        gateway.timeout = Duration::from_secs(secs);
    }
    Ok(gateway)
}

fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        return "(none)".into();
    }
    cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["hidra"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["clock", "show"]);
        Cli::try_parse_from(argv).unwrap().global
    }

    #[test]
    fn flags_override_profile() {
        let cfg = Config::default();
        let resolved =
            resolve_gateway_config(&global(&["-g", "http://10.1.1.1", "--timeout", "3"]), &cfg)
                .unwrap();
        assert_eq!(resolved.url.as_str(), "http://10.1.1.1/");
        assert_eq!(resolved.timeout, Duration::from_secs(3));
    }

    #[test]
    fn default_profile_needs_no_file() {
        let resolved = resolve_gateway_config(&global(&[]), &Config::default()).unwrap();
        assert_eq!(resolved.url.as_str(), "http://192.168.4.1/");
        assert_eq!(resolved.timeout, Duration::from_secs(10));
    }

    #[test]
    fn unknown_profile_lists_alternatives() {
        let mut cfg = Config::default();
        cfg.profiles.insert("campo".into(), Profile::default());
        let err = resolve_gateway_config(&global(&["-p", "lab"]), &cfg).unwrap_err();
        assert!(matches!(
            err,
            CliError::ProfileNotFound { ref available, .. } if available == "campo"
        ));
    }
}
