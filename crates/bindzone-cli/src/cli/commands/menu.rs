//! `bindzone menu` - Interactive menu mode.

use anyhow::Result;

use super::Context;
use crate::interactive::Menu;

pub async fn execute(ctx: Context) -> Result<()> {
    if !console::Term::stdout().is_term() {
        anyhow::bail!("The interactive menu needs a terminal; see `bindzone --help` for commands.");
    }
    Menu::new(ctx).run().await
}
