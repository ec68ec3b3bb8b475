//! # Header Region Module
//!
//! Locates an existing copyright comment block inside a file's lines so it
//! can be stripped, and normalizes what remains.

/// Inclusive line range `[start, end]` of a copyright comment block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderRegion {
  /// Index of the first line of the block
  pub start: usize,
  /// Index of the last line of the block (inclusive)
  pub end: usize,
}

impl HeaderRegion {
  pub const fn new(start: usize, end: usize) -> Self {
    Self { start, end }
  }
}

/// Finds a `/* ... */` block whose first content line starts with
/// `Copyright `.
///
/// The opening and closing fences must each sit alone on their line
/// (surrounding whitespace is ignored). Blocks that are not copyright
/// notices are skipped and scanning continues after them.
pub fn find_go_copyright<S: AsRef<str>>(lines: &[S]) -> Option<HeaderRegion> {
  let mut start: Option<usize> = None;
  let mut copyright = false;

  for (idx, line) in lines.iter().enumerate() {
    let line = line.as_ref().trim();

    match start {
      None => {
        if line == "/*" {
          start = Some(idx);
        }
      }
      Some(open) => {
        if line == "*/" {
          if copyright {
            return Some(HeaderRegion::new(open, idx));
          }
          start = None;
          copyright = false;
        } else if idx == open + 1 && line.starts_with("Copyright ") {
          copyright = true;
        }
      }
    }
  }

  None
}

/// Finds a run of `#` comment lines starting at the first `# Copyright `
/// line.
///
/// The block ends at the last contiguous line starting with `#`, or at the
/// end of the file.
pub fn find_bash_copyright<S: AsRef<str>>(lines: &[S]) -> Option<HeaderRegion> {
  let start = lines
    .iter()
    .position(|line| line.as_ref().trim().starts_with("# Copyright "))?;

  let end = lines[start + 1..]
    .iter()
    .position(|line| !line.as_ref().trim().starts_with('#'))
    .map_or(lines.len() - 1, |offset| start + offset);

  Some(HeaderRegion::new(start, end))
}

/// Joins lines back together, drops surrounding blank space and terminates
/// the text with exactly one newline.
///
/// Works on raw bytes so content that is not UTF-8 survives unchanged.
pub fn trim_blanks<S: AsRef<[u8]>>(lines: &[S]) -> Vec<u8> {
  let joined = lines.iter().map(AsRef::as_ref).collect::<Vec<&[u8]>>().join(&b'\n');
  let mut trimmed = joined.trim_ascii().to_vec();
  trimmed.push(b'\n');
  trimmed
}
