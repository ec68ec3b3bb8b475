//! # Go Applier
//!
//! Go headers are `/* ... */` blocks. A leading build-constraint comment
//! (`//go:build linux`, `// +build darwin`) has to stay on the first line,
//! so the header is placed after it. Files whose first line is a
//! `// ... DO NOT EDIT` marker are generated and left alone.

use std::sync::LazyLock;

use regex::Regex;

use super::region::{HeaderRegion, find_go_copyright};
use super::{HeaderApplier, LeadingLine};
use crate::classifier::FileKind;

/// Words that mark a `//` first line as a build constraint.
const BUILD_KEYWORDS: [&str; 6] = ["build", "unix", "linux", "windows", "darwin", "freebsd"];

static COPYRIGHT_NOTICE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?://|/\*)\s*Copyright ").expect("copyright regex must compile"));

/// Header applier for Go sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoApplier;

impl HeaderApplier for GoApplier {
  fn kind(&self) -> FileKind {
    FileKind::Go
  }

  fn classify_leading_line(&self, first_line: &str) -> LeadingLine {
    if !first_line.starts_with("//") {
      return LeadingLine::Normal;
    }

    // Package doc comments mention "Package" and may well contain "linux".
    if BUILD_KEYWORDS.iter().any(|k| first_line.contains(k)) && !first_line.contains("Package") {
      return LeadingLine::Directive(first_line.to_string());
    }

    if first_line.contains("DO NOT EDIT") {
      return LeadingLine::Generated;
    }

    LeadingLine::Normal
  }

  fn has_copyright_notice(&self, text: &str) -> bool {
    COPYRIGHT_NOTICE.is_match(text)
  }

  fn find_region(&self, lines: &[&str]) -> Option<HeaderRegion> {
    find_go_copyright(lines)
  }
}

#[cfg(test)]
mod tests {
  use std::fs;
  use std::path::Path;

  use anyhow::Result;
  use tempfile::tempdir;

  use super::*;
  use crate::header::HeaderError;

  const TEMPLATE: &str = "/*\nCopyright 2024 Acme Corp.\n\nLicensed under the Apache License, Version 2.0.\n*/\n\n";

  #[test]
  fn test_classify_build_directives() {
    let go = GoApplier;
    assert_eq!(
      go.classify_leading_line("//go:build linux"),
      LeadingLine::Directive("//go:build linux".to_string())
    );
    assert_eq!(
      go.classify_leading_line("// +build !windows"),
      LeadingLine::Directive("// +build !windows".to_string())
    );
    assert_eq!(go.classify_leading_line("// Package unix wraps syscalls."), LeadingLine::Normal);
    assert_eq!(go.classify_leading_line("package main"), LeadingLine::Normal);
  }

  #[test]
  fn test_classify_generated_marker() {
    let go = GoApplier;
    assert_eq!(
      go.classify_leading_line("// Code generated by protoc-gen-go. DO NOT EDIT."),
      LeadingLine::Generated
    );
    // Without a comment prefix the marker is just text.
    assert_eq!(go.classify_leading_line("var s = \"DO NOT EDIT\""), LeadingLine::Normal);
  }

  #[test]
  fn test_copyright_notice_pattern() {
    let go = GoApplier;
    assert!(go.has_copyright_notice("// Copyright 2019 The Go Authors."));
    assert!(go.has_copyright_notice("/*\n   Copyright 2019 Someone\n*/"));
    assert!(!go.has_copyright_notice("package main // no notice"));
  }

  fn write(dir: &Path, name: &str, content: &str) -> Result<std::path::PathBuf> {
    let path = dir.join(name);
    fs::write(&path, content)?;
    Ok(path)
  }

  #[test]
  fn test_apply_then_check() -> Result<()> {
    let dir = tempdir()?;
    let path = write(dir.path(), "main.go", "package main\n\nfunc main() {}\n")?;
    let go = GoApplier;

    assert!(!go.check_header(&path, TEMPLATE)?);
    go.apply_header(&path, TEMPLATE)?;
    assert!(go.check_header(&path, TEMPLATE)?);

    let content = fs::read_to_string(&path)?;
    assert_eq!(content, format!("{TEMPLATE}package main\n\nfunc main() {{}}\n"));

    // A second application is a no-op.
    go.apply_header(&path, TEMPLATE)?;
    assert_eq!(fs::read_to_string(&path)?, content);
    Ok(())
  }

  #[test]
  fn test_apply_after_build_directive() -> Result<()> {
    let dir = tempdir()?;
    let path = write(dir.path(), "sys_linux.go", "//go:build linux\n\npackage sys\n")?;
    let go = GoApplier;

    go.apply_header(&path, TEMPLATE)?;

    let content = fs::read_to_string(&path)?;
    // The blank line after the directive stays below the header.
    assert_eq!(content, format!("//go:build linux\n\n{TEMPLATE}\npackage sys\n"));
    assert!(go.check_header(&path, TEMPLATE)?);
    Ok(())
  }

  #[test]
  fn test_apply_after_directive_without_blank_line() -> Result<()> {
    let dir = tempdir()?;
    let path = write(dir.path(), "sys_bsd.go", "// +build freebsd\npackage sys\n")?;

    GoApplier.apply_header(&path, TEMPLATE)?;

    let content = fs::read_to_string(&path)?;
    assert_eq!(content, format!("// +build freebsd\n\n{TEMPLATE}package sys\n"));
    Ok(())
  }

  #[test]
  fn test_generated_file_is_reported_headered() -> Result<()> {
    let dir = tempdir()?;
    let original = "// Code generated by mockgen. DO NOT EDIT.\n\npackage mocks\n";
    let path = write(dir.path(), "mock.go", original)?;
    let go = GoApplier;

    assert!(go.check_header(&path, TEMPLATE)?);
    go.apply_header(&path, TEMPLATE)?;
    assert_eq!(fs::read_to_string(&path)?, original);
    Ok(())
  }

  #[test]
  fn test_insert_into_generated_content_is_an_error() {
    let err = GoApplier
      .insert_header(Path::new("mock.go"), b"// DO NOT EDIT\npackage mocks\n", TEMPLATE)
      .expect_err("generated content must be refused");
    assert!(matches!(
      err.downcast_ref::<HeaderError>(),
      Some(HeaderError::GeneratedFile { .. })
    ));
  }

  #[test]
  fn test_existing_foreign_copyright_is_kept() -> Result<()> {
    let dir = tempdir()?;
    let original = format!(
      "// Copyright 2009 The Go Authors. All rights reserved.\n// Use of this source code is governed by a BSD-style\n// license that can be found in the LICENSE file.\n\npackage strings\n{}",
      "\n".repeat(TEMPLATE.len())
    );
    let path = write(dir.path(), "strings.go", &original)?;
    let go = GoApplier;

    assert!(go.check_header(&path, TEMPLATE)?);
    go.apply_header(&path, TEMPLATE)?;
    assert_eq!(fs::read_to_string(&path)?, original);
    Ok(())
  }

  #[test]
  fn test_file_shorter_than_template_lacks_header() -> Result<()> {
    let dir = tempdir()?;
    let path = write(dir.path(), "a.go", "// Copyright 2020\npackage a\n")?;
    assert!(!GoApplier.check_header(&path, TEMPLATE)?);
    Ok(())
  }

  #[test]
  fn test_remove_apply_remove_is_stable() -> Result<()> {
    let dir = tempdir()?;
    let path = write(
      dir.path(),
      "server.go",
      &format!("//go:build linux\n\n{TEMPLATE}package server\n\nfunc Run() {{}}\n"),
    )?;
    let go = GoApplier;

    assert!(go.remove_header(&path)?);
    let first = fs::read(&path)?;

    go.apply_header(&path, TEMPLATE)?;
    assert!(go.remove_header(&path)?);
    assert_eq!(fs::read(&path)?, first);
    Ok(())
  }

  #[test]
  fn test_remove_restores_directive_without_blank_line() -> Result<()> {
    let dir = tempdir()?;
    let original = "// +build linux\npackage a\n";
    let path = write(dir.path(), "a_linux.go", original)?;
    let go = GoApplier;

    go.apply_header(&path, TEMPLATE)?;
    assert!(go.remove_header(&path)?);
    assert_eq!(fs::read_to_string(&path)?, original);

    go.apply_header(&path, TEMPLATE)?;
    assert!(go.remove_header(&path)?);
    assert_eq!(fs::read_to_string(&path)?, original);
    Ok(())
  }

  #[test]
  fn test_remove_restores_directive_with_blank_line() -> Result<()> {
    let dir = tempdir()?;
    let original = "//go:build linux\n\npackage sys\n";
    let path = write(dir.path(), "sys_linux.go", original)?;
    let go = GoApplier;

    go.apply_header(&path, TEMPLATE)?;
    assert!(go.remove_header(&path)?);
    assert_eq!(fs::read_to_string(&path)?, original);
    Ok(())
  }

  #[test]
  fn test_remove_without_header_only_normalizes() -> Result<()> {
    let dir = tempdir()?;
    let path = write(dir.path(), "b.go", "\n\npackage b\n\n\n")?;

    assert!(GoApplier.remove_header(&path)?);
    assert_eq!(fs::read_to_string(&path)?, "package b\n");

    // Already normalized: nothing left to rewrite.
    assert!(!GoApplier.remove_header(&path)?);
    Ok(())
  }
}
