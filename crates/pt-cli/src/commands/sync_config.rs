//! Sync config command for refreshing the project catalog from ProTimes.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use pt_core::TimeLedger;

use crate::catalog;

pub fn run<W: Write, L: TimeLedger>(writer: &mut W, ledger: &L, catalog_path: &Path) -> Result<()> {
    let current = catalog::load_or_empty(catalog_path);
    let remote = ledger.list_projects().context("failed to list projects")?;

    let refreshed = current
        .refresh(&remote)
        .context("failed to build project patterns")?;
    catalog::save(catalog_path, &refreshed.catalog)?;
    tracing::info!(
        added = refreshed.added.len(),
        renamed = refreshed.renamed.len(),
        "refreshed project catalog"
    );

    writeln!(
        writer,
        "Catalog:  {} projects ({} added, {} renamed)",
        refreshed.catalog.len(),
        refreshed.added.len(),
        refreshed.renamed.len()
    )?;
    writeln!(writer, "Saved to: {}", catalog_path.display())?;

    Ok(())
}
