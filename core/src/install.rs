use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::catalog::{AGENT_FILE, CatalogItem, is_valid_item_id};
use crate::error::{Error, Result};

/// Copy a catalog item into `target_dir/<id>`, overwriting what is there.
pub fn install_item(item: &CatalogItem, target_dir: &Path) -> Result<PathBuf> {
    if !is_valid_item_id(&item.id) {
        return Err(Error::InvalidItemId(item.id.clone()));
    }

    let dest = target_dir.join(&item.id);
    fs::create_dir_all(&dest)?;
    copy_dir_recursive(&item.source_path, &dest)?;

    tracing::info!(
        id = %item.id,
        dest = %dest.display(),
        "Installed {}",
        item.category.singular()
    );
    Ok(dest)
}

/// Install an agent for editors that read agents as flat files.
///
/// After the copy, the agent's `AGENT.md` is moved up to
/// `target_dir/<id>.md` so the same document is not found under two paths.
pub fn install_agent(item: &CatalogItem, target_dir: &Path) -> Result<PathBuf> {
    let dest = install_item(item, target_dir)?;

    let summary = dest.join(AGENT_FILE);
    if summary.is_file() {
        let flat = flat_agent_path(target_dir, &item.id);
        fs::copy(&summary, &flat)?;
        fs::remove_file(&summary)?;
        tracing::debug!(id = %item.id, path = %flat.display(), "Flattened agent summary");
    } else {
        tracing::debug!(id = %item.id, "Agent has no {}, nothing to flatten", AGENT_FILE);
    }

    Ok(dest)
}

/// Remove `dir/<id>`. Returns `false` when there was nothing to remove.
///
/// A flattened `dir/<id>.md` left by [`install_agent`] goes with it.
/// Failures are logged and reported as `false`; removal never errors.
pub fn remove_item(id: &str, dir: &Path) -> bool {
    if !is_valid_item_id(id) {
        tracing::warn!("Refusing to remove invalid item id: {}", id);
        return false;
    }

    let flat = flat_agent_path(dir, id);
    if flat.is_file()
        && let Err(e) = fs::remove_file(&flat)
    {
        tracing::debug!("Could not remove {}: {}", flat.display(), e);
    }

    let path = dir.join(id);
    if !path.is_dir() {
        return false;
    }

    match fs::remove_dir_all(&path) {
        Ok(()) => {
            tracing::info!(%id, path = %path.display(), "Removed item");
            true
        }
        Err(e) => {
            tracing::warn!("Failed to remove {}: {}", path.display(), e);
            false
        }
    }
}

/// Names of the item directories present under `dir`, sorted.
pub fn installed_items(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut ids: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .filter_map(|entry| entry.file_name().to_str().map(str::to_owned))
        .collect();
    ids.sort();
    ids
}

fn flat_agent_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{id}.md"))
}

fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry.path().strip_prefix(src).map_err(io::Error::other)?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
