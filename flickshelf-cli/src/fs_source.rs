//! Filesystem collaborators.
//!
//! Everything that touches the disk lives here: folder enumeration,
//! descriptor reads and the rename primitive. The engine consumes these
//! only through its collaborator seams.

use std::fs;
use std::io;
use std::path::Path;

use flickshelf_core::paths;
use flickshelf_nfo::{DescriptorSource, NfoError};

/// Enumerate a folder recursively, returning sorted forward-slash paths
/// relative to the folder.
pub fn list_files(folder: &Path) -> io::Result<Vec<String>> {
    let mut out = Vec::new();
    walk(folder, folder, &mut out)?;
    out.sort();
    Ok(out)
}

fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            walk(root, &path, out)?;
        } else if path.is_file() {
            if let Ok(rel) = path.strip_prefix(root) {
                out.push(paths::normalize_slashes(&rel.to_string_lossy()));
            }
        }
    }
    Ok(())
}

/// Descriptor reads straight from the filesystem.
pub struct FsSource;

impl DescriptorSource for FsSource {
    fn read_text(&self, path: &str) -> Result<String, NfoError> {
        Ok(fs::read_to_string(path)?)
    }
}

/// Rename one file, refusing to clobber an existing target.
pub fn execute_rename(from: &str, to: &str) -> Result<(), String> {
    if from == to {
        return Ok(());
    }
    if Path::new(to).exists() {
        return Err(format!("Target already exists: {to}"));
    }
    fs::rename(from, to).map_err(|e| format!("Failed to rename {from} -> {to}: {e}"))
}
