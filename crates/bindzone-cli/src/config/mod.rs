//! Configuration management.

use anyhow::{Context as _, Result};
use bindzone_core::SerialPolicy;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::output::OutputFormat;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// BIND configuration holding the zone declarations.
    pub named_conf: Option<String>,

    /// Directory relative zone file names are resolved against.
    pub bind_dir: Option<String>,

    /// Directory receiving zone file backups.
    pub backup_dir: Option<String>,

    /// Serial rule: counter or timestamp.
    pub serial_policy: Option<SerialPolicy>,

    /// TTL used when none is given.
    pub default_ttl: Option<u32>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Seconds allowed for named-checkzone / rndc.
    pub command_timeout_secs: Option<u64>,

    /// Zone checker command (zone name and file are appended).
    pub checkzone: Option<String>,

    /// Configuration checker command.
    pub checkconf: Option<String>,

    /// Reload command.
    pub reload: Option<String>,
}

// Keys accepted by `config set`, with their help text.
const KEYS: &[(&str, &str)] = &[
    ("named_conf", "BIND zone configuration file"),
    ("bind_dir", "Directory for relative zone files"),
    ("backup_dir", "Directory for zone backups"),
    ("serial_policy", "Serial rule (counter/timestamp)"),
    ("default_ttl", "TTL used when none is given"),
    ("output_format", "Default output format (pretty/json/csv/yaml)"),
    ("command_timeout_secs", "Timeout for external commands"),
    ("checkzone", "Zone check command"),
    ("checkconf", "Configuration check command"),
    ("reload", "Reload command"),
];

impl Config {
    /// Get the default config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("org", "bindzone", "bindzone")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Config file in use: the explicit one, else the default location.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        explicit.map_or_else(Self::path, |p| Ok(p.to_path_buf()))
    }

    /// Load configuration from file; a missing file gives the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_path(explicit)?;

        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;

        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self, explicit: Option<&Path>) -> Result<()> {
        let path = Self::resolve_path(explicit)?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Set one key from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let text = || Some(value.to_string());
        match key {
            "named_conf" => self.named_conf = text(),
            "bind_dir" => self.bind_dir = text(),
            "backup_dir" => self.backup_dir = text(),
            "serial_policy" | "serial" => self.serial_policy = Some(value.parse()?),
            "default_ttl" | "ttl" => {
                self.default_ttl = Some(bindzone_core::codec::parse_ttl(value)?);
            }
            "output_format" | "output" => self.output_format = Some(value.parse()?),
            "command_timeout_secs" | "timeout" => {
                self.command_timeout_secs = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid timeout: {value}"))?,
                );
            }
            "checkzone" => self.checkzone = text(),
            "checkconf" => self.checkconf = text(),
            "reload" => self.reload = text(),
            _ => {
                let keys: Vec<String> = KEYS
                    .iter()
                    .map(|(k, help)| format!("  {k:<22}- {help}"))
                    .collect();
                anyhow::bail!(
                    "Unknown config key: {}\n\nAvailable keys:\n{}",
                    key,
                    keys.join("\n")
                );
            }
        }
        Ok(())
    }
}

/// Expand `~` and environment variables in a configured path.
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw).with_context(|| format!("expanding path {raw}"))?;
    Ok(PathBuf::from(expanded.into_owned()))
}
