//! # Output Module
//!
//! All user-facing output of a run: the modified-file count, the list of
//! files a check found, and the hints that go with them.
//!
//! - **Scannable**: symbols and colors mark the outcome at a glance
//! - **Progressive**: more detail with `-v`, silence with `-q`
//! - **Scriptable**: in quiet mode only bare paths reach stdout

use std::path::{Path, PathBuf};

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};

/// Symbols used in output
pub mod symbols {
  /// Success/has header
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Missing header/failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

/// Print the result of a run that wrote files.
///
/// Always prints `Files modified: N`; the paths follow in verbose mode.
pub fn print_modified_files(files: &[PathBuf], project_root: Option<&Path>) {
  if is_quiet() {
    return;
  }

  println!("Files modified: {}", files.len());

  if is_verbose() {
    for file in files {
      println!("{}", make_relative_path(file, project_root));
    }
  }
}

/// Print the files a check run would change.
///
/// Shows up to `DEFAULT_FILE_LIST_LIMIT` files; verbose mode shows all.
/// In quiet mode only the bare paths are printed, for scripting.
pub fn print_pending_files(files: &[PathBuf], project_root: Option<&Path>) {
  if files.is_empty() {
    return;
  }

  let mut sorted_files: Vec<&PathBuf> = files.iter().collect();
  sorted_files.sort();

  if is_quiet() {
    for file in &sorted_files {
      println!("{}", make_relative_path(file, project_root));
    }
    return;
  }

  let count = sorted_files.len();
  let files_word = if count == 1 { "file" } else { "files" };
  println!(
    "{} {} {} missing license headers:",
    symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
    count,
    files_word
  );

  let show_all = is_verbose();
  let effective_limit = if show_all { count } else { DEFAULT_FILE_LIST_LIMIT };

  for file in sorted_files.iter().take(effective_limit) {
    println!("  {}", make_relative_path(file, project_root));
  }

  if !show_all && count > effective_limit {
    println!(
      "  {} more (use -v to see all)",
      format!("... and {}", count - effective_limit).if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
  }
}

/// Print the success message of a check run that found nothing to change.
pub fn print_all_files_ok(files_checked: usize) {
  if is_quiet() {
    return;
  }

  println!(
    "{} All {} checked files have license headers.",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    files_checked
  );
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

/// Make a path relative to the project root for display.
fn make_relative_path(path: &Path, project_root: Option<&Path>) -> String {
  if let Some(root) = project_root {
    path
      .strip_prefix(root)
      .map(|p| p.to_string_lossy().to_string())
      .unwrap_or_else(|_| path.to_string_lossy().to_string())
  } else {
    path.to_string_lossy().to_string()
  }
}
