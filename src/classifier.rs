//! # Classifier Module
//!
//! Decides which kind of header, if any, a file should carry, based on its
//! name and executable bit.
//!
//! Classification is first-match-wins over a fixed precedence list, and a
//! kind is only selected when its template was loaded. A candidate whose
//! template is missing does not stop the search, so `Dockerfile.go` is
//! still tagged as a Dockerfile when no Go template exists.

use std::fmt;

use crate::header::{GoApplier, HashApplier, HeaderApplier};
use crate::templates::TemplateStore;

/// The file kinds that can carry a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
  Go,
  Shell,
  Makefile,
  Dockerfile,
}

impl FileKind {
  /// Every kind, in template loading order.
  pub const ALL: [FileKind; 4] = [FileKind::Go, FileKind::Shell, FileKind::Makefile, FileKind::Dockerfile];

  /// Name of the template file for this kind inside the template directory.
  pub const fn template_file_name(self) -> &'static str {
    match self {
      FileKind::Go => "go.txt",
      FileKind::Shell => "bash.txt",
      FileKind::Makefile => "makefile.txt",
      FileKind::Dockerfile => "dockerfile.txt",
    }
  }

  /// Human readable plural used in messages ("Go files", "shell scripts").
  pub const fn description(self) -> &'static str {
    match self {
      FileKind::Go => "Go files",
      FileKind::Shell => "shell scripts",
      FileKind::Makefile => "Makefiles",
      FileKind::Dockerfile => "Dockerfiles",
    }
  }

  /// The header applier handling this kind.
  pub fn applier(self) -> &'static dyn HeaderApplier {
    static GO: GoApplier = GoApplier;
    static SHELL: HashApplier = HashApplier::new(FileKind::Shell);
    static MAKEFILE: HashApplier = HashApplier::new(FileKind::Makefile);
    static DOCKERFILE: HashApplier = HashApplier::new(FileKind::Dockerfile);

    match self {
      FileKind::Go => &GO,
      FileKind::Shell => &SHELL,
      FileKind::Makefile => &MAKEFILE,
      FileKind::Dockerfile => &DOCKERFILE,
    }
  }
}

impl fmt::Display for FileKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      FileKind::Go => "go",
      FileKind::Shell => "shell",
      FileKind::Makefile => "makefile",
      FileKind::Dockerfile => "dockerfile",
    };
    f.write_str(name)
  }
}

/// Classifies a file by name.
///
/// The name is split on `.`: the first segment is the base name and, when
/// there are at least two segments, the last one is the extension.
///
/// Precedence without an extension: exact `Makefile`, `Dockerfile` (any
/// case), then any executable file as a shell script. With an extension:
/// `.sh`, `.go`, then a `Dockerfile` or `Makefile` base name (any case).
pub fn classify(file_name: &str, is_executable: bool, templates: &TemplateStore) -> Option<FileKind> {
  let segments: Vec<&str> = file_name.split('.').collect();
  let base = segments[0];

  let candidates: [(bool, FileKind); 4] = if segments.len() == 1 {
    [
      (base == "Makefile", FileKind::Makefile),
      (base.eq_ignore_ascii_case("Dockerfile"), FileKind::Dockerfile),
      (is_executable, FileKind::Shell),
      (false, FileKind::Go),
    ]
  } else {
    let extension = segments[segments.len() - 1];
    [
      (extension == "sh", FileKind::Shell),
      (extension == "go", FileKind::Go),
      (base.eq_ignore_ascii_case("Dockerfile"), FileKind::Dockerfile),
      (base.eq_ignore_ascii_case("Makefile"), FileKind::Makefile),
    ]
  };

  candidates
    .into_iter()
    .find(|&(matches, kind)| matches && templates.get(kind).is_some())
    .map(|(_, kind)| kind)
}
