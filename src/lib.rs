//! Jamendo Track Search Library
//!
//! This library provides a search-and-playback client for the Jamendo music
//! catalog. Its core is the tracks cache: a normalized store of track entities
//! and paginated search results, a sync controller that decides when the remote
//! catalog has to be asked again, and a snapshot codec that keeps the most
//! recent search available across restarts.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `context` - Wiring of store, client, connectivity and persistence
//! - `debounce` - Timer-based debouncing of settled input
//! - `format` - Display helpers for times, durations and dates
//! - `jamendo` - Jamendo catalog API client and error taxonomy
//! - `playback` - Audio playback capability over a playback engine
//! - `tracks` - Normalized store, selectors, sync controller and snapshots
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use jamsearch::{config, context::AppContext};
//!
//! #[tokio::main]
//! async fn main() -> jamsearch::Res<()> {
//!     config::load_env().await?;
//!     let ctx = AppContext::bootstrap(false).await?;
//!     ctx.controller.fetch_page("piano", 0, 20, false).await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod debounce;
pub mod format;
pub mod jamendo;
pub mod playback;
pub mod tracks;
pub mod types;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the outer edges of the application (bootstrap, CLI commands)
/// where the concrete error type does not matter to the caller. The tracks
/// core never returns this type; it records failures in the request ledger.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Searching for {}...", query);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Loaded {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the binary uses this macro. Library code reports failures through
/// return values or the request ledger and never terminates the process.
///
/// # Example
///
/// ```
/// error!("Cannot load environment. Err: {}", e);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, such as a snapshot that could not be
/// written or a stale cache that was discarded.
///
/// # Example
///
/// ```
/// warning!("Failed to persist snapshot: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
