//! # license-tagger
//!
//! Keeps a canonical license header on the Go sources, shell scripts,
//! Makefiles and Dockerfiles of a project.

mod cli;

use anyhow::Result;

use crate::cli::{Cli, run_tag};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run_tag(cli.tag_args)
}
