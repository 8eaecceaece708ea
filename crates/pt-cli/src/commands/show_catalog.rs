//! Catalog command for printing the local project catalog in match order.

use std::io::Write;

use anyhow::Result;
use pt_core::ProjectCatalog;

pub fn run<W: Write>(writer: &mut W, catalog: &ProjectCatalog) -> Result<()> {
    if catalog.is_empty() {
        writeln!(writer, "Project catalog is empty. Run 'pt sync-config' first.")?;
        return Ok(());
    }

    for project in catalog {
        writeln!(
            writer,
            "{:<6}  {:<24}  {}",
            project.id.get(),
            project.name,
            project.pattern.as_str()
        )?;
    }

    Ok(())
}
