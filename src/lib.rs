//! # nsig-probe - yt-dlp nsig debugging helper
//!
//! Runs yt-dlp's private n-signature helpers against a single remote player
//! script and prints what they produce, so a decoding regression can be
//! pinned to a player build.
//!
//! ## Example
//!
//! ```rust,no_run
//! use nsig_probe::cli::{Args, OutputFormatter};
//! use nsig_probe::core::execute;
//! use nsig_probe::platform::YtDlpBackend;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let args = Args {
//!         n_value: "kR0nmx5fQUhS4Q".to_string(),
//!         player_url: "https://www.youtube.com/s/player/6e1dd460/player_ias.vflset/en_US/base.js"
//!             .to_string(),
//!         ..Default::default()
//!     };
//!
//!     let mut out = OutputFormatter::new(std::io::stdout());
//!     let outcome = execute(&args, YtDlpBackend::new, &mut out).await?;
//!     std::process::exit(outcome.exit_code().into());
//! }
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod platform;
pub mod utils;

// Re-export main types
pub use self::core::{execute, Outcome, Probe, ProbeOptions};
pub use error::ProbeError;
pub use platform::{BackendConfig, NsigBackend, YtDlpBackend};
pub use utils::PlayerUrl;

/// Result type alias for nsig-probe operations
pub type Result<T> = std::result::Result<T, ProbeError>;
