//! `bindzone records` - Show a zone file.

use anyhow::Result;

use super::Context;
use crate::cli::args::ZoneArg;
use crate::output;

pub async fn execute(ctx: Context, args: ZoneArg) -> Result<()> {
    let session = ctx.session(&args.zone)?;
    let document = ctx.editor().load(&session)?;
    output::print_records(&session.zone, &document, ctx.output_format)
}
