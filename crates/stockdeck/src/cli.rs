//! Clap derive structures for the `stockdeck` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// stockdeck -- inventory management from the command line
#[derive(Debug, Parser)]
#[command(
    name = "stockdeck",
    version,
    about = "Manage inventory stocks and movements from the command line",
    long_about = "A CLI front end for the Stockdeck inventory service.\n\n\
        Sign in once; the session is stored locally and restored on every\n\
        invocation until you log out.",
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
    /// Service base URL (overrides the config file)
    #[arg(long, short = 'c', env = "STOCKDECK_URL", global = true)]
    pub server: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "STOCKDECK_OUTPUT",
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

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "STOCKDECK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "STOCKDECK_TIMEOUT", global = true)]
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
    /// Sign in to the service
    Login(LoginArgs),

    /// Create an account and sign in
    Register(RegisterArgs),

    /// End the session (remote logout is best-effort)
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Manage products
    #[command(alias = "st", alias = "s")]
    Stocks(StocksArgs),

    /// Manage stock movements
    #[command(alias = "mv", alias = "m")]
    Movements(MovementsArgs),

    /// Summary figures over stocks and movements
    #[command(alias = "dash")]
    Dashboard,

    /// Manage your account
    Account(AccountArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Auth ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Email address (prompted when omitted)
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Display name (prompted when omitted)
    #[arg(long)]
    pub name: Option<String>,

    /// Email address (prompted when omitted)
    #[arg(long)]
    pub email: Option<String>,
}

// ── Stocks ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StocksArgs {
    #[command(subcommand)]
    pub command: StocksCommand,
}

#[derive(Debug, Subcommand)]
pub enum StocksCommand {
    /// List all products
    #[command(alias = "ls")]
    List,

    /// Show one product
    Get {
        /// Product id
        id: String,
    },

    /// Create a product
    Add {
        /// Product name
        #[arg(long)]
        name: String,

        /// Units on hand
        #[arg(long)]
        quantity: u64,

        /// Unit price
        #[arg(long)]
        price: f64,
    },

    /// Update a product (unspecified fields keep their current value)
    Edit {
        /// Product id
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        quantity: Option<u64>,

        #[arg(long)]
        price: Option<f64>,
    },

    /// Delete a product
    #[command(alias = "delete")]
    Rm {
        /// Product id
        id: String,
    },
}

// ── Movements ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MovementsArgs {
    #[command(subcommand)]
    pub command: MovementsCommand,
}

#[derive(Debug, Subcommand)]
pub enum MovementsCommand {
    /// List all movements
    #[command(alias = "ls")]
    List,

    /// Record a movement against a product
    Add {
        /// Product id the movement applies to
        #[arg(long)]
        product: String,

        /// Units in
        #[arg(long = "in", default_value_t = 0)]
        inbound: u64,

        /// Units out
        #[arg(long = "out", default_value_t = 0)]
        outbound: u64,
    },

    /// Adjust a movement's amounts (the product reference is fixed)
    Edit {
        /// Movement id
        id: String,

        /// Units in
        #[arg(long = "in")]
        inbound: Option<u64>,

        /// Units out
        #[arg(long = "out")]
        outbound: Option<u64>,
    },

    /// Delete a movement
    #[command(alias = "delete")]
    Rm {
        /// Movement id
        id: String,
    },
}

// ── Account ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub command: AccountCommand,
}

#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Update name and/or email
    Profile {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },

    /// Change the password (both passwords are prompted)
    Password,

    /// Change the role tag
    Role {
        /// New role
        role: String,
    },

    /// Permanently delete the account
    Delete,
}

// ── Config ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Write a config file with the given service URL
    Init {
        /// Service base URL
        #[arg(long)]
        url: String,

        /// Accept self-signed TLS certificates
        #[arg(long)]
        insecure: bool,
    },

    /// Print the config file path
    Path,
}

// ── Completions ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
