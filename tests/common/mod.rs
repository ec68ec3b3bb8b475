#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const GO_TEMPLATE: &str = "/*\nCopyright 2024 Acme Corp.\n\nLicensed under the Apache License, Version 2.0.\n*/\n\n";

pub const HASH_TEMPLATE: &str = "# Copyright 2024 Acme Corp.\n#\n# Licensed under the Apache License, Version 2.0.\n\n";

/// Writes all four templates into `<root>/template`, the default template
/// directory relative to `root`.
pub fn write_templates(root: &Path) -> Result<PathBuf> {
  let dir = root.join("template");
  fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
  fs::write(dir.join("go.txt"), GO_TEMPLATE)?;
  fs::write(dir.join("bash.txt"), HASH_TEMPLATE)?;
  fs::write(dir.join("makefile.txt"), HASH_TEMPLATE)?;
  fs::write(dir.join("dockerfile.txt"), HASH_TEMPLATE)?;
  Ok(dir)
}

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<PathBuf> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(path)
}

/// Sets the executable bits on `path`.
#[cfg(unix)]
pub fn make_executable(path: &Path) -> Result<()> {
  use std::os::unix::fs::PermissionsExt;

  fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
  Ok(())
}

/// Lays out a small project with one file per kind plus a vendored file.
///
/// Returns the paths of the files that should be tagged, in walk order.
pub fn create_project(root: &Path) -> Result<Vec<PathBuf>> {
  let files = vec![
    write_file(root, "Dockerfile", "FROM alpine:3.19\n")?,
    write_file(root, "Makefile", "all:\n\tgo build ./...\n")?,
    write_file(root, "cmd/main.go", "package main\n\nfunc main() {}\n")?,
    write_file(root, "hack/build.sh", "#!/usr/bin/env bash\nset -e\n")?,
  ];
  write_file(root, "vendor/dep/dep.go", "package dep\n")?;
  write_file(root, "README.md", "# Project\n")?;
  Ok(files)
}
