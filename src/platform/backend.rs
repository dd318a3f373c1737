//! Decoder capability boundary
//!
//! The wrapper never decodes anything itself. Everything that touches the
//! player script goes through [`NsigBackend`], so the yt-dlp bridge can be
//! swapped for a substitute in tests.

use crate::error::ProbeError;
use crate::utils::url::PlayerUrl;
use async_trait::async_trait;
use std::path::PathBuf;

/// Environment variable that turns on the library's step-by-step nsig trace
pub const NSIG_TRACE_ENV: &str = "YT_DLP_NSIG_TRACE";

/// Interpreter used when none is configured
pub const DEFAULT_PYTHON: &str = "python3";

/// Client options handed to the external library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Library quiet mode
    pub quiet: bool,
    /// Cache directory; `None` disables the library cache
    pub cache_dir: Option<PathBuf>,
    /// Download rate limit in bytes per second; `None` disables limiting
    pub rate_limit: Option<u64>,
    /// Library verbose logging
    pub verbose: bool,
    /// Step-by-step nsig trace inside the library
    pub trace: bool,
    /// Interpreter hosting the library
    pub python: PathBuf,
    /// Library checkout to import before any installed copy
    pub ytdlp_dir: Option<PathBuf>,
}

impl BackendConfig {
    /// Options for a probe run: never quiet, no rate limit
    pub fn new(cache_dir: Option<PathBuf>) -> Self {
        Self {
            quiet: false,
            cache_dir,
            rate_limit: None,
            verbose: false,
            trace: false,
            python: PathBuf::from(DEFAULT_PYTHON),
            ytdlp_dir: None,
        }
    }

    /// Enable library trace; trace output is only useful with verbose logging
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        if trace {
            self.verbose = true;
        }
        self
    }

    pub fn with_python(mut self, python: impl Into<PathBuf>) -> Self {
        self.python = python.into();
        self
    }

    pub fn with_ytdlp_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.ytdlp_dir = dir;
        self
    }

    /// Environment the library must see for this configuration
    pub fn library_env(&self) -> Vec<(&'static str, String)> {
        let mut env = Vec::new();
        if self.trace {
            env.push((NSIG_TRACE_ENV, "1".to_string()));
        }
        env
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

/// The two private library routines the probe exercises, plus version lookup
#[async_trait]
pub trait NsigBackend: Send + Sync {
    /// Library version string
    async fn library_version(&self) -> Result<String, ProbeError>;

    /// Name of the n decoding function the library finds in the player script
    async fn n_function_name(&self, player: &PlayerUrl) -> Result<String, ProbeError>;

    /// Decode a raw `n` value with the given player script
    async fn decrypt_nsig(
        &self,
        n_value: &str,
        video_id: &str,
        player: &PlayerUrl,
    ) -> Result<String, ProbeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BackendConfig::default();
        assert!(!config.quiet);
        assert_eq!(config.cache_dir, None);
        assert_eq!(config.rate_limit, None);
        assert!(!config.verbose);
        assert!(!config.trace);
        assert_eq!(config.python, PathBuf::from("python3"));
        assert!(config.library_env().is_empty());
    }

    #[test]
    fn test_trace_forces_verbose() {
        let config = BackendConfig::new(Some(PathBuf::from("/tmp/cache"))).with_trace(true);
        assert!(config.trace);
        assert!(config.verbose);
        assert_eq!(config.cache_dir, Some(PathBuf::from("/tmp/cache")));
        assert_eq!(
            config.library_env(),
            vec![("YT_DLP_NSIG_TRACE", "1".to_string())]
        );
    }

    #[test]
    fn test_trace_off_keeps_verbose() {
        let config = BackendConfig::default().with_trace(false);
        assert!(!config.trace);
        assert!(!config.verbose);
    }
}
