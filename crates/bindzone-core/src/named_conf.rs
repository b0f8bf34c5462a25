//! Zone discovery from the BIND master configuration.
//!
//! The scan is line oriented and tolerant: it does not parse the
//! `named.conf` grammar. A `file` statement always attaches to the zone
//! declared most recently, whatever block it sits in.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

use crate::error::{Result, ZoneError};

/// Default BIND configuration directory, used to resolve relative zone files.
pub const DEFAULT_BIND_DIR: &str = "/etc/bind";

/// Default configuration file holding the local zone declarations.
pub const DEFAULT_NAMED_CONF: &str = "/etc/bind/named.conf.local";

fn zone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"zone\s+"([^"]+)""#).expect("valid zone pattern"))
}

fn file_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"file\s+"([^"]+)""#).expect("valid file pattern"))
}

/// A zone declared in the configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneEntry {
    /// Zone name as quoted in the `zone` statement
    pub name: String,

    /// Resolved zone file path, if the zone declared one
    pub file: Option<PathBuf>,
}

impl ZoneEntry {
    /// Zone file path, or an error if the zone cannot be edited
    pub fn require_file(&self) -> Result<&Path> {
        self.file
            .as_deref()
            .ok_or_else(|| ZoneError::ZoneFileMissing {
                zone: self.name.clone(),
                path: None,
            })
    }
}

/// Zones in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneCatalog(pub Vec<ZoneEntry>);

impl ZoneCatalog {
    /// Find a zone by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ZoneEntry> {
        let name = name.trim_end_matches('.');
        self.0
            .iter()
            .find(|z| z.name.trim_end_matches('.').eq_ignore_ascii_case(name))
    }

    /// Find a zone by its 1-based position in the listing
    #[must_use]
    pub fn by_number(&self, number: usize) -> Option<&ZoneEntry> {
        number.checked_sub(1).and_then(|i| self.0.get(i))
    }

    /// Find a zone by name, failing with [`ZoneError::UnknownZone`]
    pub fn require(&self, name: &str) -> Result<&ZoneEntry> {
        self.get(name)
            .ok_or_else(|| ZoneError::UnknownZone(name.to_string()))
    }

    /// Number of zones
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no zone was found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over zones in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &ZoneEntry> {
        self.0.iter()
    }
}

impl IntoIterator for ZoneCatalog {
    type Item = ZoneEntry;
    type IntoIter = std::vec::IntoIter<ZoneEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Scan configuration text for zone declarations.
///
/// Relative `file` paths are joined onto `bind_dir`. A zone declared twice
/// keeps its first position and takes the file from its latest declaration.
pub fn parse_zones(config: &str, bind_dir: &Path) -> ZoneCatalog {
    let mut zones: Vec<ZoneEntry> = Vec::new();
    let mut current: Option<usize> = None;

    for line in config.lines() {
        if line.contains("zone") && line.contains('{') {
            if let Some(caps) = zone_pattern().captures(line) {
                let name = caps[1].to_string();
                let index = if let Some(i) = zones.iter().position(|z| z.name == name) {
                    debug!(zone = %name, "zone declared again, resetting its file");
                    zones[i].file = None;
                    i
                } else {
                    zones.push(ZoneEntry { name, file: None });
                    zones.len() - 1
                };
                current = Some(index);
            }
        } else if line.contains("file") {
            let Some(index) = current else { continue };
            if let Some(caps) = file_pattern().captures(line) {
                let path = resolve_path(&caps[1], bind_dir);
                debug!(zone = %zones[index].name, file = %path.display(), "zone file");
                zones[index].file = Some(path);
            }
        }
    }

    ZoneCatalog(zones)
}

fn resolve_path(file: &str, bind_dir: &Path) -> PathBuf {
    let path = Path::new(file);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        bind_dir.join(path)
    }
}

/// Read a configuration file and scan it for zones.
pub fn load_zones(config_path: &Path, bind_dir: &Path) -> Result<ZoneCatalog> {
    let text = std::fs::read_to_string(config_path)
        .map_err(|e| ZoneError::io(config_path, e))?;
    Ok(parse_zones(&text, bind_dir))
}
