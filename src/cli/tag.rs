//! # Tag Command
//!
//! Inserts, checks or removes license headers across a project tree.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Args;
use tracing::debug;

use license_tagger::config::{Config, load_config};
use license_tagger::diff::DiffManager;
use license_tagger::info_log;
use license_tagger::logging::{ColorMode, init_tracing, print_warning, set_quiet, set_verbose};
use license_tagger::output::{print_all_files_ok, print_hint, print_modified_files, print_pending_files};
use license_tagger::tagger::{DEFAULT_EXCLUDE, DEFAULT_TEMPLATE_DIR, TagContext, TagOptions};
use license_tagger::templates::TemplateStore;

/// Arguments for the tag command
#[derive(Args, Debug, Default)]
pub struct TagArgs {
  /// Project root to walk
  #[arg(long, value_name = "DIR", default_value = ".")]
  pub path: PathBuf,

  /// Space-separated folder names that are never descended into
  /// [default: vendor]
  #[arg(long, value_name = "NAMES")]
  pub excludes: Option<String>,

  /// Directory holding go.txt, bash.txt, makefile.txt and dockerfile.txt
  /// [default: ./template]
  #[arg(long, short = 't', value_name = "DIR")]
  pub template_dir: Option<PathBuf>,

  /// Only report files missing a header, without modifying them. Exits with
  /// status 1 when any are found.
  #[arg(long)]
  pub check: bool,

  /// Remove headers instead of inserting them
  #[arg(long, conflicts_with = "check")]
  pub remove: bool,

  /// Show diff of the changes in check mode
  #[arg(long, requires = "check")]
  pub show_diff: bool,

  /// Save the diff of the changes in check mode to a file
  #[arg(long, value_name = "FILE", requires = "check")]
  pub save_diff: Option<PathBuf>,

  /// Path to config file (default: .license-tagger.toml in the project root)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// List touched files and show debug logs (-vv for trace logs)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl TagArgs {
  /// Merges command line values over the config file over the defaults.
  fn resolve_options(&self, config: Option<Config>) -> TagOptions {
    let config = config.unwrap_or_default();

    let excludes = match (&self.excludes, config.excludes) {
      (Some(cli), _) => cli.split_whitespace().map(str::to_string).collect(),
      (None, Some(from_config)) => from_config,
      (None, None) => vec![DEFAULT_EXCLUDE.to_string()],
    };

    let template_dir = self
      .template_dir
      .clone()
      .or(config.template_dir)
      .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR));

    TagOptions {
      excludes,
      template_dir,
      dry_run: self.check,
      remove: self.remove,
    }
  }
}

/// Run the tag command with the given arguments
pub fn run_tag(args: TagArgs) -> Result<()> {
  // Initialize tracing subscriber for structured logging
  init_tracing(args.quiet, args.verbose);

  // Set verbose mode for output formatting and info_log! macro
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let config = load_config(args.config.as_deref(), &args.path, args.no_config)?;
  if config.is_some() {
    debug!("Using configuration file");
  }

  let options = args.resolve_options(config);
  debug!("Excluding folders: {:?}", options.excludes);

  let templates = TemplateStore::load(&options.template_dir);
  debug!("Loaded templates for: {:?}", templates.kinds());
  if templates.is_empty() {
    print_warning(&format!(
      "No templates found in {}, nothing to do",
      options.template_dir.display()
    ));
  }

  let diff_manager = DiffManager::new(args.show_diff, args.save_diff.clone());
  diff_manager.init()?;

  let check_only = options.dry_run;

  let mut context = TagContext::new(options, templates).with_diff_manager(diff_manager);
  context.tag_tree(&args.path)?;

  let files_checked = context.files_checked();
  let touched = context.into_touched_files();

  if !check_only {
    print_modified_files(&touched, Some(&args.path));
    return Ok(());
  }

  if touched.is_empty() {
    print_all_files_ok(files_checked);
    return Ok(());
  }

  print_pending_files(&touched, Some(&args.path));
  if let Some(ref diff_path) = args.save_diff {
    info_log!("Saved diff to {}", diff_path.display());
  }
  print_hint("Run without --check to add missing headers.");

  process::exit(1);
}

#[cfg(test)]
mod tests {
  use super::*;

  fn args(excludes: Option<&str>, template_dir: Option<&str>) -> TagArgs {
    TagArgs {
      excludes: excludes.map(str::to_string),
      template_dir: template_dir.map(PathBuf::from),
      ..TagArgs::default()
    }
  }

  #[test]
  fn test_defaults_without_config() {
    let options = args(None, None).resolve_options(None);
    assert_eq!(options.excludes, vec!["vendor"]);
    assert_eq!(options.template_dir, PathBuf::from("./template"));
  }

  #[test]
  fn test_config_overrides_defaults() {
    let config = Config {
      excludes: Some(vec!["third_party".to_string()]),
      template_dir: Some(PathBuf::from("hack")),
    };
    let options = args(None, None).resolve_options(Some(config));
    assert_eq!(options.excludes, vec!["third_party"]);
    assert_eq!(options.template_dir, PathBuf::from("hack"));
  }

  #[test]
  fn test_cli_overrides_config() {
    let config = Config {
      excludes: Some(vec!["third_party".to_string()]),
      template_dir: Some(PathBuf::from("hack")),
    };
    let options = args(Some("vendor  build"), Some("tpl")).resolve_options(Some(config));
    assert_eq!(options.excludes, vec!["vendor", "build"]);
    assert_eq!(options.template_dir, PathBuf::from("tpl"));
  }
}
