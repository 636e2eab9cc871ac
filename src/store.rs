//! The persisted listing collection: a JSON array that is the source of
//! truth for every downstream export. The crawler reads it tolerantly and
//! replaces it atomically; the exporters read it strictly.

use std::io::Write as _;
use std::path::Path;

use anyhow::Context as _;

use crate::listing::Listing;

pub fn load(path: &Path) -> anyhow::Result<Vec<Listing>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read listing store: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("parse listing store: {}", path.display()))
}

/// Tolerant variant for the crawler: an absent or corrupt store is a
/// recoverable condition, not a reason to drop a run's scraped listings.
pub fn load_or_empty(path: &Path) -> Vec<Listing> {
    match load(path) {
        Ok(listings) => listings,
        Err(err) => {
            tracing::warn!(
                store = %path.display(),
                error = format!("{err:#}"),
                "prior store unreadable; merging into an empty collection"
            );
            Vec::new()
        }
    }
}

/// New records go in front; prior order is preserved.
pub fn merge_prepend(new: Vec<Listing>, prior: Vec<Listing>) -> Vec<Listing> {
    let mut merged = new;
    merged.extend(prior);
    merged
}

/// Replace-on-write via a temp file in the destination directory, so an
/// interrupted run never leaves a truncated store behind.
pub fn write_atomic(path: &Path, listings: &[Listing]) -> anyhow::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("create temp store in: {}", parent.display()))?;
    serde_json::to_writer_pretty(&mut tmp, listings).context("serialize listing store")?;
    tmp.write_all(b"\n").context("write listing store newline")?;
    tmp.flush().context("flush listing store")?;
    tmp.persist(path)
        .with_context(|| format!("replace listing store: {}", path.display()))?;

    Ok(())
}
