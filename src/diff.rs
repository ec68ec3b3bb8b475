//! # Diff Module
//!
//! Renders the change a header insertion or removal would make. Used in
//! check mode so a reviewer can see exactly what a real run would write.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

/// Manages diff rendering for header changes.
///
/// Diffs are printed to stderr when `show_diff` is set and appended to
/// `save_diff_path` when one is given, producing a single consolidated diff
/// file for the whole run.
#[derive(Debug, Default)]
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,

  /// File collecting the diffs of every touched file
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Whether any diff output was requested.
  pub const fn is_enabled(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Truncates the diff file so a run never appends to a previous one.
  pub fn init(&self) -> Result<()> {
    if let Some(ref path) = self.save_diff_path {
      std::fs::write(path, "").with_context(|| format!("Failed to create diff file: {}", path.display()))?;
    }
    Ok(())
  }

  /// Displays and/or saves the diff between `original` and `new` for `path`.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    let rendered = render_diff(path, original, new);

    if self.show_diff {
      for line in rendered.lines() {
        let colored = match line.chars().next() {
          Some('+') => line.if_supports_color(Stream::Stderr, |l| l.green()).to_string(),
          Some('-') => line.if_supports_color(Stream::Stderr, |l| l.red()).to_string(),
          _ => line.to_string(),
        };
        eprintln!("{colored}");
      }
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;
      file
        .write_all(rendered.as_bytes())
        .with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}

/// Renders a line diff with a `Diff for <path>:` heading.
pub fn render_diff(path: &Path, original: &str, new: &str) -> String {
  let mut out = format!("Diff for {}:\n", path.display());

  for change in TextDiff::from_lines(original, new).iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    out.push_str(sign);
    out.push_str(change.value());
    if change.missing_newline() {
      out.push('\n');
    }
  }

  out.push('\n');
  out
}
