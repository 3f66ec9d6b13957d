//! Filesystem infrastructure — implements the `LocalFs` port.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports;

/// Production filesystem implementation of the `LocalFs` port.
pub struct LocalFs;

impl ports::LocalFs for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).with_context(|| format!("reading file {}", path.display()))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("removing directory {}", path.display()))
    }

    fn find_dirs_named(&self, root: &Path, name: &str) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        walk_dirs(root, name, &mut found)?;
        Ok(found)
    }
}

/// Depth-first walk collecting directories named `name`.
///
/// Matching directories are not descended into — their contents are about
/// to be removed anyway. Entries that vanish mid-walk are skipped.
fn walk_dirs(dir: &Path, name: &str, found: &mut Vec<PathBuf>) -> Result<()> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e).with_context(|| format!("reading directory {}", dir.display())),
    };
    for entry in entries {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if !file_type.is_dir() || file_type.is_symlink() {
            continue;
        }
        if entry.file_name() == name {
            found.push(path);
        } else {
            walk_dirs(&path, name, found)?;
        }
    }
    Ok(())
}
