//! Clap derive structures for the `hidra` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// hidra -- manage a Hidra water-quality gateway from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "hidra",
    version,
    about = "Manage Hidra water-quality gateways from the command line",
    long_about = "Configure the gateway clock, Wi-Fi link, access point and sensor\n\
        modules, and read the water-quality dashboard.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Gateway profile to use
    #[arg(long, short = 'p', env = "HIDRA_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Gateway URL (overrides profile)
    #[arg(long, short = 'g', env = "HIDRA_GATEWAY", global = true)]
    pub gateway: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "HIDRA_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "HIDRA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read or set the gateway clock and LoRa address
    Clock(ClockArgs),

    /// Manage the gateway's Wi-Fi station link
    #[command(alias = "w")]
    Wifi(WifiArgs),

    /// Manage the gateway's own access point
    #[command(alias = "ap")]
    Server(ServerArgs),

    /// Manage sensor modules
    #[command(alias = "mod", alias = "m")]
    Modules(ModulesArgs),

    /// Show water-quality readings
    #[command(alias = "dash")]
    Dashboard(DashboardArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ══════════════════════════════════════════════════════════════════════
// Clock
// ══════════════════════════════════════════════════════════════════════

#[derive(Debug, Args)]
pub struct ClockArgs {
    #[command(subcommand)]
    pub command: ClockCommand,
}

#[derive(Debug, Subcommand)]
pub enum ClockCommand {
    /// Show the gateway clock and address
    Show,

    /// Change the date, time or address; omitted fields keep their value
    #[command(arg_required_else_help = true)]
    Set {
        /// New date (DD/MM/YYYY or YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// New time (HH:MM or HH:MM:SS)
        #[arg(long)]
        time: Option<String>,

        /// New LoRa address
        #[arg(long)]
        address: Option<String>,
    },
}

// ══════════════════════════════════════════════════════════════════════
// Wi-Fi
// ══════════════════════════════════════════════════════════════════════

#[derive(Debug, Args)]
pub struct WifiArgs {
    #[command(subcommand)]
    pub command: WifiCommand,
}

#[derive(Debug, Subcommand)]
pub enum WifiCommand {
    /// Show the station link status
    Status,

    /// Enable or disable the station link
    Toggle,

    /// List visible and saved networks
    #[command(alias = "ls")]
    Networks,

    /// Connect to a network
    Connect {
        /// Network SSID
        ssid: String,

        /// Network password (empty for open networks)
        #[arg(long, default_value = "")]
        password: String,
    },

    /// Remove a saved network
    #[command(alias = "rm")]
    Forget {
        /// Saved network ID (see `wifi networks`)
        id: u32,
    },
}

// ══════════════════════════════════════════════════════════════════════
// Server (access point)
// ══════════════════════════════════════════════════════════════════════

#[derive(Debug, Args)]
pub struct ServerArgs {
    #[command(subcommand)]
    pub command: ServerCommand,
}

#[derive(Debug, Subcommand)]
pub enum ServerCommand {
    /// Show access point settings
    Show,

    /// Change the access point SSID or password
    #[command(arg_required_else_help = true)]
    Set {
        /// New SSID
        #[arg(long)]
        ssid: Option<String>,

        /// New password
        #[arg(long)]
        password: Option<String>,
    },

    /// Enable or disable the access point
    Toggle,
}

// ══════════════════════════════════════════════════════════════════════
// Modules
// ══════════════════════════════════════════════════════════════════════

#[derive(Debug, Args)]
pub struct ModulesArgs {
    #[command(subcommand)]
    pub command: ModulesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ModulesCommand {
    /// List registered modules
    #[command(alias = "ls")]
    List,

    /// Show a module with its latest sensor readings
    Get {
        /// Module ID
        id: u32,
    },

    /// Register a module from a JSON file
    Create {
        /// JSON module configuration
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Reconfigure a module from a JSON file
    Update {
        /// Module ID
        id: u32,

        /// JSON module configuration
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Remove a module
    #[command(alias = "rm")]
    Delete {
        /// Module ID
        id: u32,
    },
}

// ══════════════════════════════════════════════════════════════════════
// Dashboard
// ══════════════════════════════════════════════════════════════════════

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Keep polling and redraw on every update
    #[arg(long, short = 'w')]
    pub watch: bool,

    /// Poll period in seconds when watching (overrides profile)
    #[arg(long, requires = "watch")]
    pub interval: Option<u64>,
}

// ══════════════════════════════════════════════════════════════════════
// Config
// ══════════════════════════════════════════════════════════════════════

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Display the resolved configuration
    Show,

    /// Print the configuration file path
    Path,
}

// ══════════════════════════════════════════════════════════════════════
// Completions
// ══════════════════════════════════════════════════════════════════════

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
