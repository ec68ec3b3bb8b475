//! # Header Module
//!
//! Detection, insertion and removal of license headers.
//!
//! Every file kind is handled by an implementation of [`HeaderApplier`]. The
//! kind-specific parts are small: how the first line is interpreted, what a
//! pre-existing copyright notice looks like, and how the header block is
//! found when stripping it. The three operations built on top of them
//! ([`check_header`], [`apply_header`], [`remove_header`]) are shared.
//!
//! - [`golang`] - Go sources: `/* */` headers, build directives
//! - [`hash`] - shell scripts, Makefiles and Dockerfiles: `#` headers
//! - [`region`] - locating an existing header block by lines
//!
//! [`check_header`]: HeaderApplier::check_header
//! [`apply_header`]: HeaderApplier::apply_header
//! [`remove_header`]: HeaderApplier::remove_header

pub mod golang;
pub mod hash;
pub mod region;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::Result;
pub use golang::GoApplier;
pub use hash::HashApplier;
pub use region::{HeaderRegion, find_bash_copyright, find_go_copyright, trim_blanks};
use tracing::trace;

use crate::classifier::FileKind;
use crate::file_io::FileIO;

/// How the first line of a file affects header placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadingLine {
  /// A line that must stay first (build constraint, shebang, parser
  /// directive). The header goes after it and a blank line.
  Directive(String),
  /// The file is generated and must never be touched.
  Generated,
  /// Nothing special; the header goes at the very top.
  Normal,
}

impl LeadingLine {
  /// The exact text a correctly headered file starts with.
  pub fn expected_header<'a>(&self, template: &'a str) -> Cow<'a, str> {
    match self {
      LeadingLine::Directive(line) => Cow::Owned(format!("{line}\n\n{template}")),
      LeadingLine::Generated | LeadingLine::Normal => Cow::Borrowed(template),
    }
  }
}

/// Typed failures of the header operations.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
  /// Insertion was attempted on a generated file. Detection reports
  /// generated files as already headered, so reaching this is a bug.
  #[error("refusing to insert a header into generated file '{}'", path.display())]
  GeneratedFile { path: PathBuf },
}

/// Header operations for one file kind.
pub trait HeaderApplier: Send + Sync {
  /// The kind this applier handles.
  fn kind(&self) -> FileKind;

  /// Interprets the first line of a file (without its line ending).
  fn classify_leading_line(&self, first_line: &str) -> LeadingLine;

  /// Whether `text` contains a comment opening followed by `Copyright `.
  fn has_copyright_notice(&self, text: &str) -> bool;

  /// Locates the header block to strip.
  fn find_region(&self, lines: &[&str]) -> Option<HeaderRegion>;

  /// Interprets a raw first line. Lines that are not UTF-8 are never
  /// directives or generated markers.
  fn leading_line(&self, first_line: &[u8]) -> LeadingLine {
    match std::str::from_utf8(first_line) {
      Ok(line) => self.classify_leading_line(line),
      Err(_) => LeadingLine::Normal,
    }
  }

  /// Reports whether the file at `path` already carries a header.
  ///
  /// Generated files always count as headered. Otherwise exactly as many
  /// bytes as the expected header are read: an exact match, or any
  /// copyright notice inside those bytes, means the header is present. A
  /// file shorter than the expected header never has it.
  fn check_header(&self, path: &Path, template: &str) -> Result<bool> {
    let leading = self.leading_line(&FileIO::read_first_line(path)?);
    if leading == LeadingLine::Generated {
      trace!("{} is generated, treating as headered", path.display());
      return Ok(true);
    }

    let expected = leading.expected_header(template);
    let prefix = FileIO::read_prefix(path, expected.len())?;
    Ok(self.prefix_has_header(&prefix, &expected))
  }

  /// Compares the start of a file with the expected header.
  fn prefix_has_header(&self, prefix: &[u8], expected: &str) -> bool {
    if prefix.len() < expected.len() {
      return false;
    }
    if prefix == expected.as_bytes() {
      return true;
    }
    self.has_copyright_notice(&String::from_utf8_lossy(prefix))
  }

  /// Inserts the header into the file at `path` unless it already has one.
  ///
  /// The file is replaced atomically; on failure the original is untouched.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or replaced, or
  /// [`HeaderError::GeneratedFile`] if the file turns out to be generated.
  fn apply_header(&self, path: &Path, template: &str) -> Result<()> {
    if self.check_header(path, template)? {
      return Ok(());
    }

    let content = FileIO::read_bytes(path)?;
    let updated = self.insert_header(path, &content, template)?;
    FileIO::replace_atomically(path, &updated)
  }

  /// Renders `content` with the header inserted.
  ///
  /// A directive line is kept first, followed by one blank line, the
  /// template, and everything after the directive line as it was.
  fn insert_header(&self, path: &Path, content: &[u8], template: &str) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(content.len() + template.len() + 2);

    match self.leading_line(first_line(content)) {
      LeadingLine::Generated => {
        return Err(HeaderError::GeneratedFile {
          path: path.to_path_buf(),
        }
        .into());
      }
      LeadingLine::Directive(line) => {
        out.extend_from_slice(line.as_bytes());
        out.extend_from_slice(b"\n\n");
        out.extend_from_slice(template.as_bytes());
        out.extend_from_slice(after_first_line(content));
      }
      LeadingLine::Normal => {
        out.extend_from_slice(template.as_bytes());
        out.extend_from_slice(content);
      }
    }

    Ok(out)
  }

  /// Strips the header from the file at `path`.
  ///
  /// Surrounding blank lines are trimmed and the file ends with a single
  /// newline afterwards, whether or not a header was found. The file is
  /// only rewritten when that changes its content. Files that are not
  /// valid UTF-8 are handled byte for byte.
  ///
  /// Returns whether the file was rewritten.
  fn remove_header(&self, path: &Path) -> Result<bool> {
    let content = FileIO::read_bytes(path)?;
    let (stripped, found) = self.strip_header(&content);

    if stripped == content {
      return Ok(false);
    }
    if !found {
      trace!("No header in {}, normalizing blank lines", path.display());
    }
    FileIO::replace_atomically(path, &stripped)?;
    Ok(true)
  }

  /// Renders `content` without its header block, reporting whether one was
  /// found.
  ///
  /// When the block already sits after a blank line (or at the top), the
  /// blank separator line following it goes too. When it sits right after a
  /// directive and the blank line [`insert_header`](Self::insert_header)
  /// puts there, that blank line goes as well. Inserting and stripping a
  /// header therefore never accumulates empty lines.
  fn strip_header(&self, content: &[u8]) -> (Vec<u8>, bool) {
    let mut lines: Vec<&[u8]> = content.split(|&b| b == b'\n').collect();
    let views: Vec<Cow<'_, str>> = lines.iter().map(|&line| String::from_utf8_lossy(line)).collect();
    let views: Vec<&str> = views.iter().map(AsRef::as_ref).collect();

    let Some(region) = self.find_region(&views) else {
      return (trim_blanks(&lines), false);
    };

    let is_blank = |idx: usize| views.get(idx).is_some_and(|line| line.trim().is_empty());
    let after_directive = region.start == 2
      && is_blank(1)
      && matches!(self.leading_line(first_line(content)), LeadingLine::Directive(_));
    let preceded_by_blank = region.start == 0 || is_blank(region.start - 1);

    let start = if after_directive { 1 } else { region.start };
    let end = if preceded_by_blank && is_blank(region.end + 1) {
      region.end + 1
    } else {
      region.end
    };

    trace!("Removing header lines {}..={} (block {}..={})", start, end, region.start, region.end);
    lines.drain(start..=end);
    (trim_blanks(&lines), true)
  }
}

/// The first line of `content`, without its line ending.
fn first_line(content: &[u8]) -> &[u8] {
  let line = match content.iter().position(|&b| b == b'\n') {
    Some(end) => &content[..end],
    None => content,
  };
  line.strip_suffix(b"\r").unwrap_or(line)
}

/// Everything after the first line ending, or nothing for a single line.
fn after_first_line(content: &[u8]) -> &[u8] {
  match content.iter().position(|&b| b == b'\n') {
    Some(end) => &content[end + 1..],
    None => &[],
  }
}
