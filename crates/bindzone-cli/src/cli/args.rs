//! Command-line argument definitions using clap.

use bindzone_core::SerialPolicy;
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Edit BIND zone files safely from the command line.
///
/// Every change is previewed, backed up, and followed by a serial bump.
/// Run without a subcommand for the interactive menu.
#[derive(Parser, Debug)]
#[command(name = "bindzone")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (default: platform config directory)
    #[arg(long, env = "BINDZONE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// BIND configuration listing the zones
    #[arg(long, global = true)]
    pub named_conf: Option<String>,

    /// Directory relative zone file names are resolved against
    #[arg(long, global = true)]
    pub bind_dir: Option<String>,

    /// Directory receiving zone backups
    #[arg(long, global = true)]
    pub backup_dir: Option<String>,

    /// Serial rule: counter (YYYYMMDDnn) or timestamp (YYYYMMDDHH)
    #[arg(long, global = true, value_parser = parse_policy)]
    pub serial_policy: Option<SerialPolicy>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Apply changes without asking for confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Explain what this command does before running it
    #[arg(long, global = true)]
    pub explain: bool,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

fn parse_policy(s: &str) -> Result<SerialPolicy, String> {
    s.parse().map_err(|e: bindzone_core::ZoneError| e.to_string())
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List zones declared in the BIND configuration
    Zones,

    /// Show the contents of a zone file
    Records(ZoneArg),

    /// Append a record to a zone
    Add(AddArgs),

    /// Delete records from a zone
    Delete(DeleteArgs),

    /// Replace a record line in place
    Update(UpdateArgs),

    /// Bump the zone serial without changing records
    Serial(ZoneArg),

    /// Check zone syntax (or the whole configuration with --conf)
    Check(CheckArgs),

    /// Check a zone, then reload BIND
    Reload(ZoneArg),

    /// List backups of a zone file
    Backups(ZoneArg),

    /// Put a backup back in place
    Restore(RestoreArgs),

    /// Interactive menu (default)
    Menu,

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Shared arguments
// ============================================================================

#[derive(Args, Debug)]
pub struct ZoneArg {
    /// Zone name as declared in the configuration
    pub zone: String,
}

/// Record fields, kept as text so the core reports invalid values.
#[derive(Args, Debug, Clone)]
pub struct RecordArgs {
    /// Record type (A, AAAA, CNAME, MX, TXT, NS, PTR, SRV)
    #[arg(short = 't', long = "type")]
    pub record_type: String,

    /// Owner name (e.g. www, @, _sip._tcp)
    #[arg(short, long)]
    pub name: String,

    /// Record value (address, target host, text)
    #[arg(short = 'r', long)]
    pub value: String,

    /// TTL in seconds (default from configuration)
    #[arg(long)]
    pub ttl: Option<String>,

    /// MX preference or SRV priority
    #[arg(short, long)]
    pub priority: Option<String>,

    /// SRV weight
    #[arg(short, long)]
    pub weight: Option<String>,

    /// SRV port
    #[arg(long)]
    pub port: Option<String>,
}

// ============================================================================
// Edit commands
// ============================================================================

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Zone to edit
    pub zone: String,

    #[command(flatten)]
    pub record: RecordArgs,

    /// Show the line that would be added and stop
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["line", "name"])))]
pub struct DeleteArgs {
    /// Zone to edit
    pub zone: String,

    /// Exact text of the line to delete
    #[arg(long, conflicts_with_all = ["name", "record_type", "value"])]
    pub line: Option<String>,

    /// Owner name of the record to delete
    #[arg(short, long, requires_all = ["record_type", "value"])]
    pub name: Option<String>,

    /// Type of the record to delete
    #[arg(short = 't', long = "type", requires_all = ["name", "value"])]
    pub record_type: Option<String>,

    /// Value of the record to delete
    #[arg(short = 'r', long, requires_all = ["name", "record_type"])]
    pub value: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Zone to edit
    pub zone: String,

    /// Exact text of the line to replace
    #[arg(long)]
    pub line: String,

    #[command(flatten)]
    pub record: RecordArgs,
}

// ============================================================================
// BIND tooling
// ============================================================================

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Zone to check
    #[arg(required_unless_present = "conf")]
    pub zone: Option<String>,

    /// Check the BIND configuration instead
    #[arg(long)]
    pub conf: bool,
}

#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// Zone to restore
    pub zone: String,

    /// Backup file (default: latest)
    pub backup: Option<PathBuf>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Value to set
        value: String,
    },

    /// Show configuration file path
    Path,
}
