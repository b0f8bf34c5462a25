//! `bindzone update` - Replace a record line in place.

use anyhow::Result;
use bindzone_core::{codec, EditOutcome};
use colored::Colorize;

use super::Context;
use crate::cli::args::UpdateArgs;
use crate::education::Explain;
use crate::output;

pub async fn execute(ctx: Context, args: UpdateArgs) -> Result<()> {
    let record = ctx.build_record(&args.record)?;
    let session = ctx.session(&args.zone)?;

    if ctx.explain {
        Explain::update(&codec::encode(&record)?).print();
    }

    let outcome = ctx
        .editor()
        .update_record(&session, &args.line, &record, |p| ctx.approve(p))?;

    match outcome {
        EditOutcome::Applied(report) => output::print_report(&report, ctx.output_format),
        EditOutcome::Declined(_) => {
            println!("{}", "Cancelled.".yellow());
            Ok(())
        }
    }
}
