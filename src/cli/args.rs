//! Command line argument parsing

use crate::platform::backend::{BackendConfig, DEFAULT_PYTHON};
use clap::Parser;
use std::path::PathBuf;

/// YouTube nsig decoder (requires remote player URL)
#[derive(Parser, Debug)]
#[command(name = "nsig-probe", author, version, about, long_about = None)]
pub struct Args {
    /// The raw nsig value to decode
    #[arg(long = "n", value_name = "N", allow_hyphen_values = true)]
    pub n_value: String,

    /// Player JS URL (must be https://www.youtube.com/s/player/.../base.js)
    #[arg(long = "player", value_name = "URL")]
    pub player_url: String,

    /// Cache directory passed to yt-dlp (default: caching disabled)
    #[arg(long = "cachedir", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Let decode failures propagate with full detail instead of a summary line
    #[arg(long)]
    pub verbose: bool,

    /// Enable yt-dlp nsig trace logs (sets YT_DLP_NSIG_TRACE=1, turns on yt-dlp verbose)
    #[arg(long)]
    pub trace: bool,

    /// Python interpreter that hosts yt-dlp
    #[arg(long, value_name = "PATH", env = "NSIG_PROBE_PYTHON", default_value = DEFAULT_PYTHON)]
    pub python: PathBuf,

    /// yt-dlp checkout imported ahead of any installed copy
    #[arg(long, value_name = "DIR", env = "NSIG_PROBE_YTDLP_DIR")]
    pub ytdlp_dir: Option<PathBuf>,
}

impl Args {
    /// Client options for the decoder backend
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig::new(self.cache_dir.clone())
            .with_trace(self.trace)
            .with_python(self.python.clone())
            .with_ytdlp_dir(self.ytdlp_dir.clone())
    }

    /// Whether decode errors escape instead of being summarized
    pub fn propagate_errors(&self) -> bool {
        self.verbose
    }

    /// Default log filter when RUST_LOG is not set
    pub fn log_level(&self) -> &'static str {
        if self.verbose || self.trace {
            "debug"
        } else {
            "warn"
        }
    }
}

// Implement Default for Args to make tests work
impl Default for Args {
    fn default() -> Self {
        Self {
            n_value: String::new(),
            player_url: String::new(),
            cache_dir: None,
            verbose: false,
            trace: false,
            python: PathBuf::from(DEFAULT_PYTHON),
            ytdlp_dir: None,
        }
    }
}
