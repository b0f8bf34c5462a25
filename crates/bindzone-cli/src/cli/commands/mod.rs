//! Command implementations.

pub mod add;
pub mod backups;
pub mod check;
pub mod config;
pub mod delete;
pub mod menu;
pub mod records;
pub mod serial;
pub mod update;
pub mod zones;

use anyhow::{Context as _, Result};
use bindzone_core::codec::{parse_integer, parse_ttl};
use bindzone_core::named_conf::{DEFAULT_BIND_DIR, DEFAULT_NAMED_CONF};
use bindzone_core::{
    backup::DEFAULT_BACKUP_DIR, command::DEFAULT_COMMAND_TIMEOUT, BackupStore, ChangePreview,
    CommandSpec, RecordType, ResourceRecord, SerialPolicy, SystemRunner, Toolchain, ZoneCatalog,
    ZoneEditor, ZoneSession, DEFAULT_TTL,
};
use console::Term;
use dialoguer::Confirm;
use std::path::PathBuf;
use std::time::Duration;

use super::args::{Cli, RecordArgs};
use crate::config::{expand_path, Config};
use crate::output::{self, OutputFormat};

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Configuration file in use, if given explicitly
    pub config_path: Option<PathBuf>,

    /// BIND configuration listing the zones
    pub named_conf: PathBuf,

    /// Directory relative zone files are resolved against
    pub bind_dir: PathBuf,

    /// Directory receiving backups
    pub backup_dir: PathBuf,

    /// Serial rule
    pub policy: SerialPolicy,

    /// TTL used when a record does not give one
    pub default_ttl: u32,

    /// BIND utilities
    pub toolchain: Toolchain,

    /// Timeout for external commands
    pub timeout: Duration,

    /// Output format
    pub output_format: OutputFormat,

    /// Whether to explain commands before running them
    pub explain: bool,

    /// Verbose output
    pub verbose: bool,

    /// Disable colors
    pub no_color: bool,

    /// Skip confirmation prompts
    pub yes: bool,
}

impl Context {
    /// Merge command-line flags over the configuration file.
    pub fn new(cli: &Cli, config: &Config) -> Result<Self> {
        let path = |flag: &Option<String>, file: &Option<String>, default: &str| {
            expand_path(flag.as_deref().or(file.as_deref()).unwrap_or(default))
        };

        let mut toolchain = Toolchain::default();
        if let Some(cmd) = &config.checkzone {
            toolchain.checkzone = CommandSpec::parse(cmd).context("checkzone")?;
        }
        if let Some(cmd) = &config.checkconf {
            toolchain.checkconf = CommandSpec::parse(cmd).context("checkconf")?;
        }
        if let Some(cmd) = &config.reload {
            toolchain.reload = CommandSpec::parse(cmd).context("reload")?;
        }

        Ok(Self {
            config_path: cli.config.clone(),
            named_conf: path(&cli.named_conf, &config.named_conf, DEFAULT_NAMED_CONF)?,
            bind_dir: path(&cli.bind_dir, &config.bind_dir, DEFAULT_BIND_DIR)?,
            backup_dir: path(&cli.backup_dir, &config.backup_dir, DEFAULT_BACKUP_DIR)?,
            policy: cli
                .serial_policy
                .or(config.serial_policy)
                .unwrap_or_default(),
            default_ttl: config.default_ttl.unwrap_or(DEFAULT_TTL),
            toolchain,
            timeout: config
                .command_timeout_secs
                .map_or(DEFAULT_COMMAND_TIMEOUT, Duration::from_secs),
            output_format: cli.output.or(config.output_format).unwrap_or_default(),
            explain: cli.explain,
            verbose: cli.verbose,
            no_color: cli.no_color,
            yes: cli.yes,
        })
    }

    /// Zones declared in the BIND configuration.
    pub fn catalog(&self) -> Result<ZoneCatalog> {
        Ok(bindzone_core::load_zones(&self.named_conf, &self.bind_dir)?)
    }

    /// Select a zone by name.
    pub fn session(&self, zone: &str) -> Result<ZoneSession> {
        let catalog = self.catalog()?;
        Ok(ZoneSession::select(catalog.require(zone)?)?)
    }

    /// Editor configured from this context.
    pub fn editor(&self) -> ZoneEditor {
        ZoneEditor::new(BackupStore::new(&self.backup_dir), self.policy)
            .with_toolchain(self.toolchain.clone())
            .with_runner(SystemRunner::new(self.timeout))
    }

    /// Show a preview and decide whether to apply it.
    ///
    /// `--yes` approves without asking; without a terminal to ask on, the
    /// change is declined.
    pub fn approve(&self, preview: &ChangePreview) -> bool {
        output::print_preview(preview);
        if self.yes {
            return true;
        }
        if !Term::stdout().is_term() {
            eprintln!("Not a terminal; pass --yes to apply changes.");
            return false;
        }
        Confirm::new()
            .with_prompt("Apply this change?")
            .default(false)
            .interact()
            .unwrap_or(false)
    }

    /// Build a record from command-line text fields.
    pub fn build_record(&self, args: &RecordArgs) -> Result<ResourceRecord> {
        build_record(args, self.default_ttl)
    }
}

/// Build a record from text fields, letting the core report bad values.
pub fn build_record(args: &RecordArgs, default_ttl: u32) -> Result<ResourceRecord> {
    let record_type: RecordType = args.record_type.parse()?;
    let ttl = args
        .ttl
        .as_deref()
        .map_or(Ok(default_ttl), parse_ttl)?;

    let mut record = ResourceRecord::new(record_type, args.name.trim(), args.value.trim(), ttl);
    if let Some(priority) = &args.priority {
        record = record.with_priority(parse_integer("priority", priority)?);
    }
    if let (Some(weight), Some(port)) = (&args.weight, &args.port) {
        record = record
            .with_weight_and_port(parse_integer("weight", weight)?, parse_integer("port", port)?);
    } else if let Some(weight) = &args.weight {
        record.weight = Some(parse_integer("weight", weight)?);
    } else if let Some(port) = &args.port {
        record.port = Some(parse_integer("port", port)?);
    }
    Ok(record)
}
