//! `bindzone zones` - List zones from the BIND configuration.

use anyhow::Result;

use super::Context;
use crate::education::Explain;
use crate::output;

pub async fn execute(ctx: Context) -> Result<()> {
    if ctx.explain {
        Explain::zones(&ctx.named_conf.display().to_string()).print();
    }

    let catalog = ctx.catalog()?;
    output::print_zones(&catalog, ctx.output_format)
}
