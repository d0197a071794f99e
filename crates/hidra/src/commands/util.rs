//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use hidra_core::{Notifier, Severity};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Print the notifications a command raised to stderr and turn a failed
/// store operation into an error.
///
/// The first error notification of a failed operation becomes the returned
/// error instead of being printed. Error notifications are shown even with
/// `--quiet`.
pub fn settle(notifier: &Notifier, ok: bool, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let mut failure = None;

    for note in notifier.drain() {
        let is_error = note.severity == Severity::Error;
        if is_error && !ok && failure.is_none() {
            failure = Some(note);
            continue;
        }
        if is_error || !global.quiet {
            eprintln!("{}", output::format_notification(&note, color));
        }
    }

    if ok {
        return Ok(());
    }
    Err(failure.map_or_else(
        || CliError::OperationFailed {
            message: "The operation did not complete".into(),
            detail: "Run again with -v for details.".into(),
        },
        |note| CliError::OperationFailed {
            message: note.text,
            detail: note.detail,
        },
    ))
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<serde_json::Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// `-62 dBm`, or `-` when unknown.
pub fn signal(dbm: Option<f64>) -> String {
    dbm.filter(|v| v.is_finite())
        .map_or_else(|| "-".into(), |v| format!("{v:.0} dBm"))
}

pub fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.into()
}
