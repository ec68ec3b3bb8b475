//! # license-tagger
//!
//! Walks a project tree and keeps a canonical license header on every Go
//! source, shell script, Makefile and Dockerfile in it.
//!
//! Headers come from one template per file kind (`go.txt`, `bash.txt`,
//! `makefile.txt`, `dockerfile.txt`) and are inserted verbatim at the top of
//! each file, after any line that has to stay first: a Go build constraint,
//! a shebang, or a Dockerfile parser directive. Generated files are left
//! alone.
//!
//! ## Features
//!
//! * Insert missing headers, idempotently
//! * Check mode that lists files missing a header, for CI
//! * Strip headers again, with remove/insert/remove byte-stable
//! * Atomic file replacement that keeps permissions
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::{Path, PathBuf};
//!
//! use license_tagger::tagger::{TagContext, TagOptions};
//! use license_tagger::templates::TemplateStore;
//!
//! fn main() -> anyhow::Result<()> {
//!   let options = TagOptions::new(PathBuf::from("./template"));
//!   let templates = TemplateStore::load(&options.template_dir);
//!
//!   let mut context = TagContext::new(options, templates);
//!   context.tag_tree(Path::new("."))?;
//!
//!   println!("Files modified: {}", context.touched_files().len());
//!   Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`tagger`] - tree walking and the per-run context
//! * [`header`] - header detection, insertion and removal per file kind
//! * [`classifier`] - mapping file names to kinds
//! * [`templates`] - template loading
//! * [`logging`] - logging utilities for verbose output

pub mod classifier;
pub mod config;
pub mod diff;
pub mod file_io;
pub mod header;
pub mod logging;
pub mod output;
pub mod tagger;
pub mod templates;
