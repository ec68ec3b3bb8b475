//! # Hash-Comment Applier
//!
//! Shell scripts, Makefiles and Dockerfiles all use `#` line comments, so
//! they share one applier configured with the file kind. The kinds differ
//! only in which first lines must stay first:
//! - shell scripts keep their `#!` interpreter line
//! - Dockerfiles keep a `# syntax=` / `# escape=` parser directive
//! - Makefiles have nothing of the sort

use std::sync::LazyLock;

use regex::Regex;

use super::region::{HeaderRegion, find_bash_copyright};
use super::{HeaderApplier, LeadingLine};
use crate::classifier::FileKind;

static COPYRIGHT_NOTICE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"#\s*Copyright ").expect("copyright regex must compile"));

static DOCKERFILE_DIRECTIVE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)^#\s*(?:syntax|escape)\s*=").expect("directive regex must compile"));

/// Header applier for `#`-commented file kinds.
#[derive(Debug, Clone, Copy)]
pub struct HashApplier {
  kind: FileKind,
}

impl HashApplier {
  /// Creates an applier for `kind`, which should be one of the `#`-commented
  /// kinds.
  pub const fn new(kind: FileKind) -> Self {
    Self { kind }
  }

  fn is_directive(&self, first_line: &str) -> bool {
    match self.kind {
      FileKind::Shell => first_line.starts_with("#!"),
      FileKind::Dockerfile => DOCKERFILE_DIRECTIVE.is_match(first_line),
      FileKind::Makefile | FileKind::Go => false,
    }
  }
}

impl HeaderApplier for HashApplier {
  fn kind(&self) -> FileKind {
    self.kind
  }

  fn classify_leading_line(&self, first_line: &str) -> LeadingLine {
    if self.is_directive(first_line) {
      LeadingLine::Directive(first_line.to_string())
    } else if first_line.starts_with('#') && first_line.contains("DO NOT EDIT") {
      LeadingLine::Generated
    } else {
      LeadingLine::Normal
    }
  }

  fn has_copyright_notice(&self, text: &str) -> bool {
    COPYRIGHT_NOTICE.is_match(text)
  }

  fn find_region(&self, lines: &[&str]) -> Option<HeaderRegion> {
    find_bash_copyright(lines)
  }
}
