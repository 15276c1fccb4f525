//! Clap derive structures for the `pmax` CLI.
//!
//! Defines the command tree, global flags, and shared enums.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// pmax -- monitor and control a Visonic PowerManage alarm panel
#[derive(Debug, Parser)]
#[command(
    name = "pmax",
    version,
    about = "Monitor and control a cloud-connected alarm panel",
    long_about = "Talks to the Visonic PowerManage cloud: arm state, door \
        contacts, event feed, and arm/disarm commands for one panel.",
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
    /// Panel profile to use
    #[arg(long, short = 'p', env = "PMAX_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, env = "PMAX_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Panel serial (overrides profile)
    #[arg(long, env = "PMAX_PANEL", global = true)]
    pub panel: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PMAX_OUTPUT",
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

    /// Request timeout in seconds
    #[arg(long, env = "PMAX_TIMEOUT", default_value = "15", global = true)]
    pub timeout: u64,
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
    /// Show the current panel snapshot
    #[command(alias = "st")]
    Status,

    /// Show the panel event feed
    #[command(alias = "ev")]
    Events(EventsArgs),

    /// List door/window contacts
    #[command(alias = "doors")]
    Sensors,

    /// Show open trouble conditions (low battery, tamper, ...)
    Troubles,

    /// Show active alerts
    Alerts,

    /// Arm the panel
    Arm(ArmArgs),

    /// Disarm the panel
    Disarm,

    /// Validate the configured credentials against the cloud
    Verify,

    /// Poll and print snapshot changes until interrupted
    Watch(WatchArgs),
}

#[derive(Debug, Args)]
pub struct EventsArgs {
    /// Only the most recent N entries
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ArmArgs {
    /// Arm mode
    #[arg(value_enum)]
    pub mode: ArmMode,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ArmMode {
    /// Perimeter only (someone stays home)
    Home,
    /// Full arm
    Away,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Poll interval in seconds
    #[arg(long, default_value = "30")]
    pub interval: u64,
}
