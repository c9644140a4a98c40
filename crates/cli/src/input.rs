use anyhow::{Context, Result};
use sensebank_extract::SourceEntry;
use std::path::Path;

/// Read a JSON array of parsed source entries, the shape adapters hand to
/// the core.
pub(crate) fn read_entries(path: &Path) -> Result<Vec<SourceEntry>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read entries from {}", path.display()))?;
    let entries: Vec<SourceEntry> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of entries", path.display()))?;
    Ok(entries)
}
