//! # File I/O Module
//!
//! Reading and writing helpers shared by the header appliers. Replacing a
//! file always goes through a sibling temporary file that is renamed over
//! the original, so a failed run never leaves a half-written source file.

use std::fs::File;
use std::io::{BufRead as _, BufReader, Read as _, Write as _};
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// File I/O operations for the appliers.
pub struct FileIO;

impl FileIO {
  /// Reads the first line of a file without its line terminator.
  ///
  /// A trailing `\r` is dropped along with the `\n`. An empty file yields an
  /// empty line.
  pub fn read_first_line(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let mut line = Vec::new();
    reader
      .read_until(b'\n', &mut line)
      .with_context(|| format!("Failed to read file: {}", path.display()))?;

    Ok(strip_line_ending(line))
  }

  /// Reads at most `limit` bytes from the start of a file.
  ///
  /// The returned buffer is shorter than `limit` only when the file itself is.
  pub fn read_prefix(path: &Path, limit: usize) -> Result<Vec<u8>> {
    let file = File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;

    let mut buf = Vec::with_capacity(limit);
    file
      .take(limit as u64)
      .read_to_end(&mut buf)
      .with_context(|| format!("Failed to read file: {}", path.display()))?;

    Ok(buf)
  }

  /// Reads the whole file as raw bytes.
  pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
  }

  /// Atomically replaces `path` with `content`.
  ///
  /// The content is written to a temporary file in the same directory, the
  /// original permissions are copied onto it, and it is renamed over the
  /// target. If any step fails the temporary file is removed when it goes
  /// out of scope and the original is left untouched.
  pub fn replace_atomically(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };

    let permissions = std::fs::metadata(path)
      .with_context(|| format!("Failed to read metadata: {}", path.display()))?
      .permissions();

    let mut temp = NamedTempFile::new_in(dir)
      .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;

    temp
      .write_all(content)
      .with_context(|| format!("Failed to write temporary file for {}", path.display()))?;
    temp
      .flush()
      .with_context(|| format!("Failed to flush temporary file for {}", path.display()))?;

    std::fs::set_permissions(temp.path(), permissions)
      .with_context(|| format!("Failed to copy permissions for {}", path.display()))?;

    temp
      .persist(path)
      .map_err(|e| e.error)
      .with_context(|| format!("Failed to replace file: {}", path.display()))?;

    Ok(())
  }
}

fn strip_line_ending(mut line: Vec<u8>) -> Vec<u8> {
  if line.last() == Some(&b'\n') {
    line.pop();
    if line.last() == Some(&b'\r') {
      line.pop();
    }
  }
  line
}
