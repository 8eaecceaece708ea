//! Local project catalog persistence.
//!
//! The catalog is stored as pretty-printed JSON. Order in the file is match
//! order.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pt_core::ProjectCatalog;

/// Loads the catalog from `path`.
///
/// Returns `None` if the file doesn't exist.
/// Returns an error if the file exists but is unreadable/unparseable,
/// including when a stored pattern fails to compile.
pub fn load(path: &Path) -> Result<Option<ProjectCatalog>> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let catalog = serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            Ok(Some(catalog))
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
    }
}

/// Loads the catalog, falling back to an empty one.
pub fn load_or_empty(path: &Path) -> ProjectCatalog {
    match load(path) {
        Ok(Some(catalog)) => {
            tracing::debug!(path = %path.display(), projects = catalog.len(), "loaded project catalog");
            catalog
        }
        Ok(None) => {
            tracing::info!(path = %path.display(), "no project catalog yet, starting empty");
            ProjectCatalog::default()
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), "using empty project catalog: {err:#}");
            ProjectCatalog::default()
        }
    }
}

/// Writes the catalog to `path`, creating parent directories.
pub fn save(path: &Path, catalog: &ProjectCatalog) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(catalog).context("failed to encode project catalog")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
