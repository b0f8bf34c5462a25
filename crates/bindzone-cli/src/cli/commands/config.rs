//! `bindzone config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx),
        ConfigCommands::Set { key, value } => set_config(&ctx, &key, &value),
        ConfigCommands::Path => show_path(&ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = Config::load(ctx.config_path.as_deref())?;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(&config)?);
        }
        _ => {
            println!("{}", "Current Configuration:".bold());
            println!();

            // Values in effect, with flags and defaults applied
            let effective = [
                ("named_conf", ctx.named_conf.display().to_string()),
                ("bind_dir", ctx.bind_dir.display().to_string()),
                ("backup_dir", ctx.backup_dir.display().to_string()),
                ("serial_policy", ctx.policy.to_string()),
                ("default_ttl", ctx.default_ttl.to_string()),
                ("output_format", ctx.output_format.to_string()),
                ("command_timeout_secs", ctx.timeout.as_secs().to_string()),
                ("checkzone", ctx.toolchain.checkzone.to_string()),
                ("checkconf", ctx.toolchain.checkconf.to_string()),
                ("reload", ctx.toolchain.reload.to_string()),
            ];
            for (key, value) in effective {
                println!("  {} {}", format!("{key}:").bold(), value);
            }
        }
    }

    Ok(())
}

fn set_config(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load(ctx.config_path.as_deref())?;
    config.set(key, value)?;
    config.save(ctx.config_path.as_deref())?;

    println!("{} {} set to {}.", "Success:".green().bold(), key, value.cyan());
    Ok(())
}

fn show_path(ctx: &Context) -> Result<()> {
    let path = Config::resolve_path(ctx.config_path.as_deref())?;
    println!("{}", path.display());
    Ok(())
}
