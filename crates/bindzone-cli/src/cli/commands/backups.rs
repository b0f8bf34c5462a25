//! `bindzone backups` / `bindzone restore` - Zone file backups.

use anyhow::{Context as _, Result};
use chrono::{DateTime, Local};
use colored::Colorize;
use std::path::{Path, PathBuf};

use super::Context;
use crate::cli::args::{RestoreArgs, ZoneArg};
use crate::output::{self, BackupRow};

fn modified(path: &Path) -> String {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| "-".to_string())
}

pub async fn execute(ctx: Context, args: ZoneArg) -> Result<()> {
    let session = ctx.session(&args.zone)?;
    let rows: Vec<BackupRow> = ctx
        .editor()
        .list_backups(&session)?
        .into_iter()
        .map(|path| BackupRow {
            modified: modified(&path),
            path,
        })
        .collect();

    output::print_backups(&rows, ctx.output_format)
}

pub async fn restore(ctx: Context, args: RestoreArgs) -> Result<()> {
    let session = ctx.session(&args.zone)?;
    let editor = ctx.editor();

    let backup: PathBuf = match args.backup {
        Some(path) => path,
        None => editor
            .backups()
            .latest(&session.file)?
            .with_context(|| format!("no backups of {} found", session.zone))?,
    };

    println!(
        "{} {} {} {}",
        "Restore".bold(),
        backup.display(),
        "over".bold(),
        session.file.display()
    );
    if !ctx.yes && !confirm()? {
        println!("{}", "Cancelled.".yellow());
        return Ok(());
    }

    let safety = editor.restore_backup(&session, &backup)?;
    println!("{} {}", "Previous contents saved to:".dimmed(), safety.display());
    println!("{} zone {} restored", "Success:".green().bold(), session.zone.cyan());
    Ok(())
}

fn confirm() -> Result<bool> {
    if !console::Term::stdout().is_term() {
        anyhow::bail!("Not a terminal; pass --yes to restore");
    }
    Ok(dialoguer::Confirm::new()
        .with_prompt("Restore this backup?")
        .default(false)
        .interact()?)
}
