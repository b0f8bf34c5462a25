//! Interactive menu: pick a zone, then add, delete or update its records.
//!
//! Errors from one action are printed and the menu comes back; only
//! choosing "Exit" (or a failed terminal) ends the loop.

use anyhow::Result;
use bindzone_core::{
    codec, EditOutcome, RecordType, ResourceRecord, ZoneDocument, ZoneSession,
};
use colored::Colorize;
use dialoguer::{FuzzySelect, Input, Select};

use crate::cli::commands::Context;
use crate::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    ListZones,
    SelectZone,
    ShowRecords,
    AddRecord,
    DeleteRecord,
    UpdateRecord,
    BumpSerial,
    CheckZone,
    Reload,
    Exit,
}

impl Action {
    const ALL: [Self; 10] = [
        Self::ListZones,
        Self::SelectZone,
        Self::ShowRecords,
        Self::AddRecord,
        Self::DeleteRecord,
        Self::UpdateRecord,
        Self::BumpSerial,
        Self::CheckZone,
        Self::Reload,
        Self::Exit,
    ];

    const fn label(self) -> &'static str {
        match self {
            Self::ListZones => "List zones",
            Self::SelectZone => "Select zone",
            Self::ShowRecords => "Show records",
            Self::AddRecord => "Add record",
            Self::DeleteRecord => "Delete record",
            Self::UpdateRecord => "Update record",
            Self::BumpSerial => "Bump serial",
            Self::CheckZone => "Check zone syntax",
            Self::Reload => "Reload BIND",
            Self::Exit => "Exit",
        }
    }
}

/// Menu state: the context and the zone picked so far.
pub struct Menu {
    ctx: Context,
    session: Option<ZoneSession>,
}

impl Menu {
    pub fn new(ctx: Context) -> Self {
        Self { ctx, session: None }
    }

    /// Run until the operator exits.
    pub async fn run(mut self) -> Result<()> {
        println!("{}", "BIND zone editor".bold().cyan());
        println!("Config: {}", self.ctx.named_conf.display().to_string().dimmed());

        loop {
            println!();
            let prompt = match &self.session {
                Some(s) => format!("Zone {}", s.zone),
                None => "No zone selected".to_string(),
            };
            let labels: Vec<&str> = Action::ALL.iter().map(|a| a.label()).collect();
            let choice = Select::new()
                .with_prompt(prompt)
                .items(&labels)
                .default(0)
                .interact()?;

            let action = Action::ALL[choice];
            if action == Action::Exit {
                println!("Goodbye.");
                return Ok(());
            }

            if let Err(e) = self.dispatch(action).await {
                println!("{} {:#}", "Error:".red().bold(), e);
            }
        }
    }

    async fn dispatch(&mut self, action: Action) -> Result<()> {
        match action {
            Action::ListZones => output::print_zones(&self.ctx.catalog()?, self.ctx.output_format),
            Action::SelectZone => self.select_zone(),
            Action::ShowRecords => {
                let session = self.session()?;
                let document = self.ctx.editor().load(session)?;
                output::print_records(&session.zone, &document, self.ctx.output_format)
            }
            Action::AddRecord => self.add_record(),
            Action::DeleteRecord => self.delete_record(),
            Action::UpdateRecord => self.update_record(),
            Action::BumpSerial => {
                match self.ctx.editor().bump_serial(self.session()?)? {
                    Some((_, change)) => println!(
                        "{} {} -> {}",
                        "Serial updated:".bold(),
                        change.previous,
                        change.next.to_string().cyan()
                    ),
                    None => println!("{}", "No serial line found; nothing changed.".yellow()),
                }
                Ok(())
            }
            Action::CheckZone => {
                self.ctx.editor().check_syntax(self.session()?).await?;
                println!("{} zone syntax is valid", "OK:".green().bold());
                Ok(())
            }
            Action::Reload => {
                self.ctx.editor().reload_service(self.session()?).await?;
                println!("{} BIND reloaded", "Success:".green().bold());
                Ok(())
            }
            Action::Exit => Ok(()),
        }
    }

    fn session(&self) -> Result<&ZoneSession> {
        Ok(ZoneSession::require(self.session.as_ref())?)
    }

    fn select_zone(&mut self) -> Result<()> {
        let catalog = self.ctx.catalog()?;
        if catalog.is_empty() {
            anyhow::bail!("no zones declared in {}", self.ctx.named_conf.display());
        }

        let labels: Vec<String> = catalog
            .iter()
            .map(|z| match &z.file {
                Some(file) => format!("{} ({})", z.name, file.display()),
                None => format!("{} (no file)", z.name),
            })
            .collect();
        let choice = FuzzySelect::new()
            .with_prompt("Zone")
            .items(&labels)
            .default(0)
            .interact()?;

        let entry = catalog
            .by_number(choice + 1)
            .ok_or_else(|| anyhow::anyhow!("invalid selection"))?;
        let session = ZoneSession::select(entry)?;
        println!("{} {}", "Selected zone:".bold(), session.zone.cyan());
        self.session = Some(session);
        Ok(())
    }

    fn add_record(&self) -> Result<()> {
        let session = self.session()?;
        let record = prompt_record(self.ctx.default_ttl, None)?;
        let outcome = self
            .ctx
            .editor()
            .add_record(session, &record, |p| self.ctx.approve(p))?;
        self.finish(outcome)
    }

    fn delete_record(&self) -> Result<()> {
        let session = self.session()?;
        let editor = self.ctx.editor();
        let document = editor.load(session)?;
        let line = pick_line(&document, "Line to delete")?;

        let outcome = editor.delete_record(session, &line, |p| self.ctx.approve(p))?;
        self.finish(outcome)
    }

    fn update_record(&self) -> Result<()> {
        let session = self.session()?;
        let editor = self.ctx.editor();
        let document = editor.load(session)?;
        let line = pick_line(&document, "Line to replace")?;

        let current = codec::decode(&line).ok();
        let record = prompt_record(self.ctx.default_ttl, current.as_ref())?;
        let outcome = editor.update_record(session, &line, &record, |p| self.ctx.approve(p))?;
        self.finish(outcome)
    }

    fn finish(&self, outcome: EditOutcome) -> Result<()> {
        match outcome {
            EditOutcome::Applied(report) => output::print_report(&report, self.ctx.output_format),
            EditOutcome::Declined(_) => {
                println!("{}", "Cancelled.".yellow());
                Ok(())
            }
        }
    }
}

/// Pick a non-blank line of the document; returns its text as stored.
fn pick_line(document: &ZoneDocument, prompt: &str) -> Result<String> {
    let lines: Vec<&String> = document
        .lines()
        .iter()
        .filter(|l| !l.trim().is_empty())
        .collect();
    if lines.is_empty() {
        anyhow::bail!("zone file is empty");
    }

    let labels: Vec<&str> = lines.iter().map(|l| l.trim()).collect();
    let choice = FuzzySelect::new()
        .with_prompt(prompt)
        .items(&labels)
        .interact()?;
    Ok(lines[choice].clone())
}

/// Ask for record fields; `current` pre-fills the answers.
fn prompt_record(default_ttl: u32, current: Option<&ResourceRecord>) -> Result<ResourceRecord> {
    let types: Vec<&str> = RecordType::ALL.iter().map(|t| t.as_str()).collect();
    let type_index = current
        .and_then(|r| RecordType::ALL.iter().position(|t| *t == r.record_type))
        .unwrap_or(0);
    let record_type = RecordType::ALL[Select::new()
        .with_prompt("Type")
        .items(&types)
        .default(type_index)
        .interact()?];

    let name: String = text("Name", current.map(|r| r.name.clone()))?;
    let ttl = codec::parse_ttl(&text(
        "TTL",
        Some(current.map_or(default_ttl, |r| r.ttl).to_string()),
    )?)?;
    let value: String = text("Value", current.map(|r| r.value.clone()))?;

    let mut record = ResourceRecord::new(record_type, name, value, ttl);
    if record_type.needs_priority() {
        let priority = text("Priority", current.and_then(|r| r.priority).map(|p| p.to_string()))?;
        record = record.with_priority(codec::parse_integer("priority", &priority)?);
    }
    if record_type.needs_weight_and_port() {
        let weight = text("Weight", current.and_then(|r| r.weight).map(|w| w.to_string()))?;
        let port = text("Port", current.and_then(|r| r.port).map(|p| p.to_string()))?;
        record = record.with_weight_and_port(
            codec::parse_integer("weight", &weight)?,
            codec::parse_integer("port", &port)?,
        );
    }

    codec::validate(&record)?;
    Ok(record)
}

fn text(prompt: &str, initial: Option<String>) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(initial) = initial {
        input = input.default(initial);
    }
    Ok(input.interact_text()?.trim().to_string())
}
