//! `bindzone check` / `bindzone reload` - BIND tooling.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{CheckArgs, ZoneArg};
use crate::education::Explain;

pub async fn execute(ctx: Context, args: CheckArgs) -> Result<()> {
    let editor = ctx.editor();

    if args.conf {
        editor.check_config().await?;
        println!("{} configuration is valid", "OK:".green().bold());
    }

    if let Some(zone) = &args.zone {
        let session = ctx.session(zone)?;
        editor.check_syntax(&session).await?;
        println!("{} zone {} is valid", "OK:".green().bold(), session.zone.cyan());
    }

    Ok(())
}

pub async fn reload(ctx: Context, args: ZoneArg) -> Result<()> {
    let session = ctx.session(&args.zone)?;

    if ctx.explain {
        let checkzone = ctx.toolchain.checkzone_for(&session.zone, &session.file);
        Explain::reload(&checkzone.to_string(), &ctx.toolchain.reload.to_string()).print();
    }

    ctx.editor().reload_service(&session).await?;
    println!("{} BIND reloaded after zone {} passed its check", "Success:".green().bold(), session.zone.cyan());
    Ok(())
}
