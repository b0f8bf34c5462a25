//! bindzone - BIND zone file editor
//!
//! Lists zones, edits records, keeps serials current and reloads BIND.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    bindzone_cli::run().await
}
