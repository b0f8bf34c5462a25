//! `bindzone delete` - Remove records from a zone.

use anyhow::Result;
use bindzone_core::{EditOutcome, RecordType};
use colored::Colorize;

use super::Context;
use crate::cli::args::DeleteArgs;
use crate::education::Explain;
use crate::output;

pub async fn execute(ctx: Context, args: DeleteArgs) -> Result<()> {
    if ctx.explain {
        Explain::delete().print();
    }

    let session = ctx.session(&args.zone)?;
    let editor = ctx.editor();

    let outcome = match (&args.line, &args.name, &args.record_type, &args.value) {
        (Some(line), ..) => editor.delete_record(&session, line, |p| ctx.approve(p))?,
        (None, Some(name), Some(record_type), Some(value)) => {
            let record_type: RecordType = record_type.parse()?;
            editor.delete_matching(&session, name.trim(), record_type, value.trim(), |p| {
                ctx.approve(p)
            })?
        }
        _ => anyhow::bail!("give --line, or --name with --type and --value"),
    };

    match outcome {
        EditOutcome::Applied(report) => output::print_report(&report, ctx.output_format),
        EditOutcome::Declined(_) => {
            println!("{}", "Cancelled.".yellow());
            Ok(())
        }
    }
}
