//! Output formatting for different formats.

use anyhow::Result;
use bindzone_core::{ChangePreview, ChangeReport, ZoneCatalog, ZoneDocument};
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed tables with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// YAML output
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "table" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: pretty, json, csv, yaml",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

#[derive(Tabled)]
struct ZoneRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Zone")]
    zone: String,
    #[tabled(rename = "File")]
    file: String,
}

#[derive(Serialize)]
struct ZoneCsvRow<'a> {
    number: usize,
    zone: &'a str,
    file: Option<&'a std::path::Path>,
}

/// One decoded record with its line number (1-based).
#[derive(Debug, Serialize)]
pub struct RecordRow {
    /// Line number in the zone file
    pub line: usize,
    /// Owner name
    pub name: String,
    /// TTL in seconds
    pub ttl: u32,
    /// Record type
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record value
    pub value: String,
    /// MX/SRV priority
    pub priority: Option<u16>,
    /// SRV weight
    pub weight: Option<u16>,
    /// SRV port
    pub port: Option<u16>,
}

/// Decoded records of a document, in file order
pub fn record_rows(document: &ZoneDocument) -> Vec<RecordRow> {
    document
        .records()
        .map(|(i, r)| RecordRow {
            line: i + 1,
            name: r.name,
            ttl: r.ttl,
            record_type: r.record_type.to_string(),
            value: r.value,
            priority: r.priority,
            weight: r.weight,
            port: r.port,
        })
        .collect()
}

fn print_csv<T: Serialize>(rows: impl IntoIterator<Item = T>) -> Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Print the zone catalog.
pub fn print_zones(catalog: &ZoneCatalog, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(catalog)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(catalog)?),
        OutputFormat::Csv => print_csv(catalog.iter().enumerate().map(|(i, z)| ZoneCsvRow {
            number: i + 1,
            zone: &z.name,
            file: z.file.as_deref(),
        }))?,
        OutputFormat::Pretty => {
            if catalog.is_empty() {
                println!("No zones found.");
                return Ok(());
            }
            println!("{}", "Available zones:".bold());
            let rows = catalog.iter().enumerate().map(|(i, z)| ZoneRow {
                number: i + 1,
                zone: z.name.clone(),
                file: z
                    .file
                    .as_ref()
                    .map_or_else(|| "(no file)".to_string(), |f| f.display().to_string()),
            });
            println!("{}", Table::new(rows).with(Style::rounded()));
        }
    }
    Ok(())
}

/// Print a zone file: every line in pretty mode, decoded records otherwise.
pub fn print_records(zone: &str, document: &ZoneDocument, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record_rows(document))?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&record_rows(document))?),
        OutputFormat::Csv => print_csv(record_rows(document))?,
        OutputFormat::Pretty => {
            println!("{} {}", "Zone file contents:".bold(), zone.cyan());
            for (i, line) in document.lines().iter().enumerate() {
                println!("{:>5}  {}", (i + 1).to_string().dimmed(), line.trim());
            }
        }
    }
    Ok(())
}

/// Show what an edit will do before it is applied.
pub fn print_preview(preview: &ChangePreview) {
    println!("{} {}", "Zone:".bold(), preview.zone.cyan());
    for line in &preview.remove {
        println!("  {} {}", "-".red().bold(), line.trim().red());
    }
    if let Some(line) = &preview.insert {
        println!("  {} {}", "+".green().bold(), line.green());
    }
}

/// Print the result of an applied edit.
pub fn print_report(report: &ChangeReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(report)?),
        OutputFormat::Csv | OutputFormat::Pretty => {
            println!("{} {}", "Backup created:".dimmed(), report.backup.display());
            let verb = match report.kind {
                bindzone_core::ChangeKind::Add => "Record added",
                bindzone_core::ChangeKind::Delete => "Records deleted",
                bindzone_core::ChangeKind::Update => "Record updated",
            };
            match &report.line {
                Some(line) => println!("{} {}: {}", "Success:".green().bold(), verb, line),
                None => println!(
                    "{} {}: {} line(s)",
                    "Success:".green().bold(),
                    verb,
                    report.lines_changed
                ),
            }
            match &report.serial {
                Some(s) => println!(
                    "{} {} -> {}",
                    "Serial updated:".bold(),
                    s.previous,
                    s.next.to_string().cyan()
                ),
                None => println!("{}", "No serial line found; serial left unchanged.".yellow()),
            }
        }
    }
    Ok(())
}

/// A backup file and when it was written.
#[derive(Debug, Serialize, Tabled)]
pub struct BackupRow {
    /// Backup path
    #[tabled(rename = "Backup", display_with = "display_path")]
    pub path: PathBuf,
    /// Modification time, local
    #[tabled(rename = "Modified")]
    pub modified: String,
}

fn display_path(path: &PathBuf) -> String {
    path.display().to_string()
}

/// Print a list of backups.
pub fn print_backups(rows: &[BackupRow], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rows)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(rows)?),
        OutputFormat::Csv => print_csv(rows)?,
        OutputFormat::Pretty => {
            if rows.is_empty() {
                println!("No backups found.");
            } else {
                println!("{}", Table::new(rows).with(Style::rounded()));
            }
        }
    }
    Ok(())
}
