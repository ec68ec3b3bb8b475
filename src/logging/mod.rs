//! # Logging Module
//!
//! Logging utilities for license-tagger:
//! - Verbose logging that can be enabled/disabled
//! - Standard info logging with color support
//! - Structured diagnostics through `tracing`
//!
//! Verbose logs go to stderr and info logs go to stdout, so the list of
//! touched files can be piped into other tools.
//!
//! ## Example
//!
//! ```rust
//! use license_tagger::logging::{ColorMode, set_verbose};
//! use license_tagger::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Auto.apply();
//!
//! // Goes to stderr
//! verbose_log!("Checking header: {}", "main.go");
//!
//! // Goes to stdout
//! info_log!("Header added to: {}", "main.go");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// Uses the same format string syntax as [`eprintln!`].
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
///
/// Uses the same format string syntax as [`println!`].
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an info message, yellow when colors are enabled.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}

/// Prints a warning to stderr. Warnings are shown even in quiet mode.
pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    "warning:".if_supports_color(Stream::Stderr, |m| m.yellow()),
    message
  );
}
