//! `bindzone add` - Append a record to a zone.

use anyhow::Result;
use bindzone_core::{codec, EditOutcome};
use colored::Colorize;

use super::Context;
use crate::cli::args::AddArgs;
use crate::education::Explain;
use crate::output;

pub async fn execute(ctx: Context, args: AddArgs) -> Result<()> {
    let record = ctx.build_record(&args.record)?;
    let session = ctx.session(&args.zone)?;

    if ctx.explain {
        Explain::add(&codec::encode(&record)?).print();
    }

    let outcome = ctx.editor().add_record(&session, &record, |preview| {
        if args.dry_run {
            output::print_preview(preview);
            return false;
        }
        ctx.approve(preview)
    })?;

    match outcome {
        EditOutcome::Applied(report) => output::print_report(&report, ctx.output_format),
        EditOutcome::Declined(_) if args.dry_run => {
            println!("{}", "Dry run: zone file not modified.".dimmed());
            Ok(())
        }
        EditOutcome::Declined(_) => {
            println!("{}", "Cancelled.".yellow());
            Ok(())
        }
    }
}
