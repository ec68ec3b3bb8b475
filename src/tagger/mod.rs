//! # Tagger Module
//!
//! Run-scoped driver that walks a project tree and keeps every recognized
//! file's header in the requested state.
//!
//! - [`walker`] - traversal and the kind-independent skip rules
//!
//! [`TagContext`] is the entry point: it owns the options and templates of
//! the run and accumulates the files it changed, or would change in check
//! mode.
//!
//! ```rust,no_run
//! use std::path::{Path, PathBuf};
//!
//! use license_tagger::tagger::{TagContext, TagOptions};
//! use license_tagger::templates::TemplateStore;
//!
//! # fn main() -> anyhow::Result<()> {
//! let options = TagOptions {
//!   dry_run: true,
//!   ..TagOptions::new(PathBuf::from("./template"))
//! };
//! let templates = TemplateStore::load(&options.template_dir);
//!
//! let mut context = TagContext::new(options, templates);
//! context.tag_tree(Path::new("."))?;
//!
//! for path in context.touched_files() {
//!   println!("missing header: {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod walker;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, trace};

use crate::classifier::{FileKind, classify};
use crate::diff::DiffManager;
use crate::file_io::FileIO;
use crate::header::HeaderApplier;
use crate::templates::TemplateStore;
use crate::verbose_log;

/// Folder excluded when nothing else is configured.
pub const DEFAULT_EXCLUDE: &str = "vendor";

/// Template directory used when nothing else is configured.
pub const DEFAULT_TEMPLATE_DIR: &str = "./template";

/// Options for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOptions {
  /// Directory names that are never descended into
  pub excludes: Vec<String>,

  /// Directory the templates were loaded from
  pub template_dir: PathBuf,

  /// Only report files that would change
  pub dry_run: bool,

  /// Strip headers instead of inserting them
  pub remove: bool,
}

impl TagOptions {
  /// Creates options with the default exclude list, inserting headers for
  /// real.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// TagOptions {
  ///     dry_run: true,
  ///     ..TagOptions::new(template_dir)
  /// }
  /// ```
  pub fn new(template_dir: PathBuf) -> Self {
    Self {
      excludes: vec![DEFAULT_EXCLUDE.to_string()],
      template_dir,
      dry_run: false,
      remove: false,
    }
  }
}

impl Default for TagOptions {
  fn default() -> Self {
    Self::new(PathBuf::from(DEFAULT_TEMPLATE_DIR))
  }
}

/// State of one tagging run.
pub struct TagContext {
  options: TagOptions,

  templates: TemplateStore,

  /// Renders would-be changes in dry-run mode
  diff_manager: DiffManager,

  /// Files changed, or that would change in dry-run mode
  touched: Vec<PathBuf>,

  /// Number of files that were classified and inspected
  files_checked: usize,
}

impl TagContext {
  pub fn new(options: TagOptions, templates: TemplateStore) -> Self {
    Self {
      options,
      templates,
      diff_manager: DiffManager::default(),
      touched: Vec::new(),
      files_checked: 0,
    }
  }

  /// Uses `diff_manager` to show the changes a dry run would make.
  #[must_use]
  pub fn with_diff_manager(mut self, diff_manager: DiffManager) -> Self {
    self.diff_manager = diff_manager;
    self
  }

  /// Files changed so far, or that would be changed in dry-run mode.
  pub fn touched_files(&self) -> &[PathBuf] {
    &self.touched
  }

  pub fn into_touched_files(self) -> Vec<PathBuf> {
    self.touched
  }

  pub const fn files_checked(&self) -> usize {
    self.files_checked
  }

  /// Walks `root` depth-first and processes every eligible file.
  ///
  /// # Errors
  ///
  /// The first error, whether from traversal or from a single file, aborts
  /// the walk. Files handled before it keep their changes.
  pub fn tag_tree(&mut self, root: &Path) -> Result<()> {
    debug!("Walking {}", root.display());
    let excludes = self.options.excludes.clone();

    for candidate in walker::candidates(root, &excludes) {
      let candidate = candidate?;

      let Some(kind) = classify(&candidate.file_name, candidate.is_executable, &self.templates) else {
        trace!("Skipping: {} (unrecognized kind)", candidate.path.display());
        continue;
      };

      self
        .tag_file(&candidate.path, kind)
        .with_context(|| format!("Failed to process {}", candidate.path.display()))?;
    }

    debug!(
      "Checked {} files, {} touched",
      self.files_checked,
      self.touched.len()
    );
    Ok(())
  }

  /// Processes a single file of a known kind.
  ///
  /// In remove mode the header is stripped; otherwise it is inserted when
  /// missing. Either way the path is recorded when the file changed, or
  /// would have changed in dry-run mode. In remove mode that includes files
  /// without a header whose blank lines were only normalized. Kinds without
  /// a template are ignored.
  pub fn tag_file(&mut self, path: &Path, kind: FileKind) -> Result<()> {
    let Some(template) = self.templates.get(kind) else {
      trace!("Skipping: {} (no {} template)", path.display(), kind);
      return Ok(());
    };
    let applier = kind.applier();

    verbose_log!("Checking {} header: {}", kind, path.display());

    let changed = if self.options.remove {
      self.strip(path, applier)?
    } else {
      self.insert(path, applier, template)?
    };

    self.files_checked += 1;
    if changed {
      self.touched.push(path.to_path_buf());
    }
    Ok(())
  }

  fn insert(&self, path: &Path, applier: &dyn HeaderApplier, template: &str) -> Result<bool> {
    if applier.check_header(path, template)? {
      trace!("Header present: {}", path.display());
      return Ok(false);
    }

    if self.options.dry_run {
      debug!("Missing header: {}", path.display());
      if self.diff_manager.is_enabled() {
        let content = FileIO::read_bytes(path)?;
        let updated = applier.insert_header(path, &content, template)?;
        self.diff_manager.display_diff(
          path,
          &String::from_utf8_lossy(&content),
          &String::from_utf8_lossy(&updated),
        )?;
      }
    } else {
      applier.apply_header(path, template)?;
      debug!("Added {} header: {}", applier.kind(), path.display());
    }

    Ok(true)
  }

  fn strip(&self, path: &Path, applier: &dyn HeaderApplier) -> Result<bool> {
    if !self.options.dry_run {
      let rewritten = applier.remove_header(path)?;
      if rewritten {
        debug!("Stripped {} file: {}", applier.kind(), path.display());
      }
      return Ok(rewritten);
    }

    let content = FileIO::read_bytes(path)?;
    let (stripped, found) = applier.strip_header(&content);
    if stripped == content {
      return Ok(false);
    }

    debug!("Would strip {} file (header found: {}): {}", applier.kind(), found, path.display());
    if self.diff_manager.is_enabled() {
      self.diff_manager.display_diff(
        path,
        &String::from_utf8_lossy(&content),
        &String::from_utf8_lossy(&stripped),
      )?;
    }
    Ok(true)
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;

  const GO_TEMPLATE: &str = "/*\nCopyright 2024 Acme\n*/\n\n";

  fn go_only() -> TemplateStore {
    TemplateStore::from_texts([(FileKind::Go, GO_TEMPLATE)])
  }

  #[test]
  fn test_default_options() {
    let options = TagOptions::default();
    assert_eq!(options.excludes, vec!["vendor"]);
    assert_eq!(options.template_dir, PathBuf::from("./template"));
    assert!(!options.dry_run);
    assert!(!options.remove);
  }

  #[test]
  fn test_tag_file_records_only_changes() -> Result<()> {
    let dir = tempdir()?;
    let bare = dir.path().join("bare.go");
    let tagged = dir.path().join("tagged.go");
    fs::write(&bare, "package bare\n")?;
    fs::write(&tagged, format!("{GO_TEMPLATE}package tagged\n"))?;

    let mut context = TagContext::new(TagOptions::default(), go_only());
    context.tag_file(&bare, FileKind::Go)?;
    context.tag_file(&tagged, FileKind::Go)?;

    assert_eq!(context.touched_files(), [bare.clone()]);
    assert_eq!(context.files_checked(), 2);
    assert_eq!(fs::read_to_string(&bare)?, format!("{GO_TEMPLATE}package bare\n"));
    Ok(())
  }

  #[test]
  fn test_tag_file_without_template_is_ignored() -> Result<()> {
    let dir = tempdir()?;
    let script = dir.path().join("run.sh");
    fs::write(&script, "echo run\n")?;

    let mut context = TagContext::new(TagOptions::default(), go_only());
    context.tag_file(&script, FileKind::Shell)?;

    assert!(context.touched_files().is_empty());
    assert_eq!(context.files_checked(), 0);
    assert_eq!(fs::read_to_string(&script)?, "echo run\n");
    Ok(())
  }

  #[test]
  fn test_dry_run_remove_reports_without_writing() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("main.go");
    let original = format!("{GO_TEMPLATE}package main\n");
    fs::write(&path, &original)?;

    let options = TagOptions {
      dry_run: true,
      remove: true,
      ..TagOptions::default()
    };
    let mut context = TagContext::new(options, go_only());
    context.tag_file(&path, FileKind::Go)?;

    assert_eq!(context.touched_files(), [path.clone()]);
    assert_eq!(fs::read_to_string(&path)?, original);
    Ok(())
  }

  #[test]
  fn test_remove_handles_files_that_are_not_utf8() -> Result<()> {
    let dir = tempdir()?;
    let latin1 = dir.path().join("a_latin1.go");
    let plain = dir.path().join("b_plain.go");
    let mut content = GO_TEMPLATE.as_bytes().to_vec();
    content.extend_from_slice(b"package a // caf\xe9\n");
    fs::write(&latin1, &content)?;
    fs::write(&plain, format!("{GO_TEMPLATE}package b\n"))?;

    let options = TagOptions {
      remove: true,
      ..TagOptions::default()
    };
    let mut context = TagContext::new(options, go_only());
    context.tag_tree(dir.path())?;

    assert_eq!(context.touched_files(), [latin1.clone(), plain.clone()]);
    assert_eq!(fs::read(&latin1)?, b"package a // caf\xe9\n");
    assert_eq!(fs::read_to_string(&plain)?, "package b\n");
    Ok(())
  }

  #[test]
  fn test_remove_records_normalized_files() -> Result<()> {
    let dir = tempdir()?;
    let loose = dir.path().join("loose.go");
    let tidy = dir.path().join("tidy.go");
    fs::write(&loose, "\npackage loose\n\n")?;
    fs::write(&tidy, "package tidy\n")?;

    let options = TagOptions {
      remove: true,
      ..TagOptions::default()
    };
    let mut context = TagContext::new(options, go_only());
    context.tag_file(&loose, FileKind::Go)?;
    context.tag_file(&tidy, FileKind::Go)?;

    assert_eq!(context.touched_files(), [loose.clone()]);
    assert_eq!(context.files_checked(), 2);
    assert_eq!(fs::read_to_string(&loose)?, "package loose\n");
    Ok(())
  }
}
