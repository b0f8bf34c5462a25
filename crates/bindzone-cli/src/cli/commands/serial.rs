//! `bindzone serial` - Bump a zone serial.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::ZoneArg;
use crate::education::Explain;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: ZoneArg) -> Result<()> {
    if ctx.explain {
        Explain::serial(&ctx.policy.to_string()).print();
    }

    let session = ctx.session(&args.zone)?;
    let bumped = ctx.editor().bump_serial(&session)?;

    match ctx.output_format {
        OutputFormat::Json => {
            let value = bumped.as_ref().map(|(backup, change)| {
                serde_json::json!({ "backup": backup, "serial": change })
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Yaml => {
            let value = bumped.as_ref().map(|(_, change)| change);
            print!("{}", serde_yaml::to_string(&value)?);
        }
        OutputFormat::Csv => {
            println!("previous,next");
            if let Some((_, change)) = &bumped {
                println!("{},{}", change.previous, change.next);
            }
        }
        OutputFormat::Pretty => match &bumped {
            Some((backup, change)) => {
                println!("{} {}", "Backup created:".dimmed(), backup.display());
                println!(
                    "{} {} -> {}",
                    "Serial updated:".bold(),
                    change.previous,
                    change.next.to_string().cyan()
                );
            }
            None => println!("{}", "No serial line found; nothing changed.".yellow()),
        },
    }

    Ok(())
}
