//! Command dispatch: bridges CLI args -> store operations -> output formatting.

pub mod clock;
pub mod config_cmd;
pub mod dashboard;
pub mod modules;
pub mod server;
pub mod util;
pub mod wifi;

use hidra_core::Gateway;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a gateway-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, gateway: &Gateway, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Clock(args) => clock::handle(gateway, args, global).await,
        Command::Wifi(args) => wifi::handle(gateway, args, global).await,
        Command::Server(args) => server::handle(gateway, args, global).await,
        Command::Modules(args) => modules::handle(gateway, args, global).await,
        Command::Dashboard(args) => dashboard::handle(gateway, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
