//! # Walker Module
//!
//! Depth-first traversal of the project tree. Applies the skip rules that
//! do not depend on file kind and yields the files worth classifying.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::trace;
use walkdir::{DirEntry, WalkDir};

/// Directories never descended into.
pub const VCS_DIRS: [&str; 3] = [".git", ".svn", ".."];

/// Files never tagged, whatever their kind.
pub const SKIPPED_FILE_NAMES: [&str; 2] = ["LICENSE", "MAINTAINERS"];

/// A regular, non-empty file that passed the skip rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
  pub path: PathBuf,
  pub file_name: String,
  pub is_executable: bool,
}

/// Whether a directory named `name` is pruned, subtree included.
pub fn is_pruned_dir(name: &str, excludes: &[String]) -> bool {
  VCS_DIRS.contains(&name) || excludes.iter().any(|exclude| exclude == name)
}

/// Walks `root` and yields the files eligible for tagging, sorted by name
/// within each directory.
///
/// Pruned: `.git`, `.svn` and excluded directories below the root.
/// Skipped: symlinks, non-regular files, empty files, `LICENSE` and
/// `MAINTAINERS`. Any traversal error is returned and ends the walk for the
/// caller.
pub fn candidates<'a>(root: &Path, excludes: &'a [String]) -> impl Iterator<Item = Result<Candidate>> + use<'a> {
  WalkDir::new(root)
    .follow_links(false)
    .sort_by_file_name()
    .into_iter()
    .filter_entry(move |entry| !should_prune(entry, excludes))
    .filter_map(|entry| match entry {
      Ok(entry) => to_candidate(&entry).transpose(),
      Err(e) => {
        let path = e.path().map(Path::to_path_buf).unwrap_or_default();
        Some(Err(anyhow::Error::new(e).context(format!("Failed to walk {}", path.display()))))
      }
    })
}

fn should_prune(entry: &DirEntry, excludes: &[String]) -> bool {
  if entry.depth() == 0 || !entry.file_type().is_dir() {
    return false;
  }

  let name = entry.file_name().to_string_lossy();
  let pruned = is_pruned_dir(&name, excludes);
  if pruned {
    trace!("Pruning directory: {}", entry.path().display());
  }
  pruned
}

fn to_candidate(entry: &DirEntry) -> Result<Option<Candidate>> {
  let path = entry.path();

  if entry.path_is_symlink() {
    trace!("Skipping: {} (symlink)", path.display());
    return Ok(None);
  }
  if !entry.file_type().is_file() {
    return Ok(None);
  }

  let file_name = entry.file_name().to_string_lossy().into_owned();
  if SKIPPED_FILE_NAMES.contains(&file_name.as_str()) {
    trace!("Skipping: {} (reserved name)", path.display());
    return Ok(None);
  }

  let metadata = entry
    .metadata()
    .with_context(|| format!("Failed to read metadata: {}", path.display()))?;
  if metadata.len() == 0 {
    trace!("Skipping: {} (empty)", path.display());
    return Ok(None);
  }

  Ok(Some(Candidate {
    path: path.to_path_buf(),
    file_name,
    is_executable: is_executable(&metadata),
  }))
}

#[cfg(unix)]
fn is_executable(metadata: &std::fs::Metadata) -> bool {
  use std::os::unix::fs::PermissionsExt;

  metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &std::fs::Metadata) -> bool {
  false
}
