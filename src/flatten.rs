use std::path::Path;

use anyhow::Context as _;

use crate::cli::FlattenArgs;
use crate::listing;
use crate::store;

/// Strict by design: the crawler already degraded gracefully, so malformed
/// input here means a violated assumption and fails loudly.
pub fn run(args: FlattenArgs) -> anyhow::Result<()> {
    let listings = store::load(Path::new(&args.input))?;
    let records = listing::flatten_listings(&listings);

    let json = serde_json::to_string_pretty(&records).context("serialize flat records")?;
    std::fs::write(&args.out, json + "\n")
        .with_context(|| format!("write flat records: {}", args.out))?;

    tracing::info!(
        listings = listings.len(),
        records = records.len(),
        out = %args.out,
        "flattened collection"
    );
    Ok(())
}
