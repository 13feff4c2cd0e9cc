//! Song Quiz Web Server Library
//!
//! This library implements a small self-hosted web game on top of the Spotify
//! Web API: whatever is currently playing on the connected account is turned
//! into a riddle, and track, artist and release year stay hidden until the
//! player asks for the solution. It also exposes the usual transport controls
//! (play/pause, seek, next, previous) so the browser tab can double as a
//! remote control.
//!
//! # Modules
//!
//! - `api` - HTTP route handlers for the web frontend
//! - `config` - Configuration management and environment variables
//! - `management` - Token refresh and cookie session handling
//! - `pages` - Server-rendered HTML pages
//! - `server` - HTTP server setup and routing
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and the title-cleaning heuristic
//!
//! # Example
//!
//! ```
//! use songquiz::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> songquiz::Res<()> {
//!     config::load_env().await?;
//!     server::start_api_server(&config::server_addr()).await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod management;
pub mod pages;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use songquiz::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// info!("Session token refreshed");
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
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations.
///
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
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
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors
/// that require immediate program termination; in a long-running web server
/// that means startup failures only.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
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
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// potential issues or important notices that don't require program
/// termination. Request handlers use this for failures that are answered
/// with an error page or a redirect instead of a crash.
///
/// # Example
///
/// ```
/// warning!("Token exchange failed: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
