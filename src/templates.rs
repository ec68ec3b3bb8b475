//! # Templates Module
//!
//! Loads the header templates, one per [`FileKind`], from a template
//! directory. Each template is the literal header text to insert; there is
//! no substitution syntax.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use license_tagger::classifier::FileKind;
//! use license_tagger::templates::TemplateStore;
//!
//! let templates = TemplateStore::load(Path::new("./template"));
//! if let Some(header) = templates.get(FileKind::Go) {
//!   println!("Go header:\n{header}");
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::classifier::FileKind;
use crate::logging::print_warning;

/// In-memory header templates for the current run.
///
/// Templates are read once and handed out as `&str`, so every file of a
/// kind is compared against exactly the same text.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
  templates: HashMap<FileKind, String>,
}

impl TemplateStore {
  /// Creates an empty store. No file kind will be processed.
  pub fn new() -> Self {
    Self::default()
  }

  /// Loads every known template from `dir`.
  ///
  /// A template that cannot be read is not an error: a warning is printed
  /// and files of that kind are skipped for the rest of the run.
  pub fn load(dir: &Path) -> Self {
    let mut store = Self::new();

    for kind in FileKind::ALL {
      match store.load_template(dir, kind) {
        Ok(()) => debug!("Loaded {} template from {}", kind, dir.display()),
        Err(e) => {
          debug!("Template for {} unavailable: {:#}", kind, e);
          print_warning(&format!(
            "No template file for {}, skipping all {}",
            kind.description(),
            kind.description()
          ));
        }
      }
    }

    store
  }

  /// Builds a store from in-memory texts.
  pub fn from_texts<I, S>(texts: I) -> Self
  where
    I: IntoIterator<Item = (FileKind, S)>,
    S: Into<String>,
  {
    Self {
      templates: texts.into_iter().map(|(kind, text)| (kind, text.into())).collect(),
    }
  }

  /// Reads the template for `kind` from `dir`, replacing any previous one.
  ///
  /// # Errors
  ///
  /// Returns an error if the file does not exist, cannot be read, or is not
  /// valid UTF-8.
  pub fn load_template(&mut self, dir: &Path, kind: FileKind) -> Result<()> {
    let path = dir.join(kind.template_file_name());
    let text = std::fs::read_to_string(&path)
      .with_context(|| format!("Failed to read template file: {}", path.display()))?;

    self.templates.insert(kind, text);
    Ok(())
  }

  /// The template for `kind`, if one was loaded.
  pub fn get(&self, kind: FileKind) -> Option<&str> {
    self.templates.get(&kind).map(String::as_str)
  }

  /// Whether no template at all is available.
  pub fn is_empty(&self) -> bool {
    self.templates.is_empty()
  }

  /// Kinds with a loaded template, in [`FileKind::ALL`] order.
  pub fn kinds(&self) -> Vec<FileKind> {
    FileKind::ALL
      .into_iter()
      .filter(|kind| self.templates.contains_key(kind))
      .collect()
  }
}
