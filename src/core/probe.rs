//! Probe run: validate, introspect, decode, classify

use crate::cli::args::Args;
use crate::cli::output::OutputFormatter;
use crate::error::ProbeError;
use crate::platform::backend::{BackendConfig, NsigBackend};
use crate::utils::url::PlayerUrl;
use std::io::Write;
use tracing::{debug, info, warn};

/// Version shown when the library cannot report one
pub const UNKNOWN_VERSION: &str = "unknown";

/// How a completed probe run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Decoded nsig value
    Decoded(String),
    /// The library refused the input
    ExtractorFailure(String),
    /// Anything else went wrong during delegation
    UnexpectedFailure(String),
}

impl Outcome {
    /// Process exit status for this outcome
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Decoded(_) => 0,
            Outcome::ExtractorFailure(_) => 2,
            Outcome::UnexpectedFailure(_) => 3,
        }
    }
}

/// Per-run switches that are not backend options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Show the lookup failure reason instead of a placeholder
    pub trace: bool,
    /// Return decode errors instead of summarizing them
    pub propagate_errors: bool,
}

impl From<&Args> for ProbeOptions {
    fn from(args: &Args) -> Self {
        Self {
            trace: args.trace,
            propagate_errors: args.propagate_errors(),
        }
    }
}

/// Runs one probe against a decoder backend
pub struct Probe<B> {
    backend: B,
    options: ProbeOptions,
}

impl<B: NsigBackend> Probe<B> {
    pub fn new(backend: B, options: ProbeOptions) -> Self {
        Self { backend, options }
    }

    /// Print the report for `n_value` and classify the decode result.
    ///
    /// The function name lookup never fails the run. Decode failures are
    /// summarized as an [`Outcome`] unless `propagate_errors` is set, in which
    /// case the summary line is still printed and the error is returned.
    pub async fn run<W: Write>(
        &self,
        n_value: &str,
        original_url: &str,
        player: &PlayerUrl,
        out: &mut OutputFormatter<W>,
    ) -> Result<Outcome, ProbeError> {
        let version = match self.backend.library_version().await {
            Ok(version) => version,
            Err(e) => {
                warn!("Could not read yt-dlp version: {}", e);
                UNKNOWN_VERSION.to_string()
            }
        };

        out.print_version(&version)?;
        out.print_urls(original_url, player.as_str())?;

        match self.backend.n_function_name(player).await {
            Ok(name) => out.print_n_function(&name)?,
            Err(e) => {
                debug!("n function lookup failed: {}", e);
                out.print_n_function_failure(&e.to_string(), self.options.trace)?;
            }
        }

        match self.backend.decrypt_nsig(n_value, "", player).await {
            Ok(decoded) => {
                info!("Decoded nsig for player {}", player.player_id());
                out.print_decoded(&decoded)?;
                Ok(Outcome::Decoded(decoded))
            }
            Err(e) if e.is_extractor_error() => {
                out.print_extractor_error(&e.to_string())?;
                if self.options.propagate_errors {
                    return Err(e);
                }
                Ok(Outcome::ExtractorFailure(e.to_string()))
            }
            Err(e) => {
                out.print_unexpected_error(&e.to_string())?;
                if self.options.propagate_errors {
                    return Err(e);
                }
                Ok(Outcome::UnexpectedFailure(e.to_string()))
            }
        }
    }
}

/// Validate the arguments, build a backend and run the probe.
///
/// URL validation happens before `build_backend` is called, so a rejected
/// URL never reaches the library.
pub async fn execute<B, F, W>(
    args: &Args,
    build_backend: F,
    out: &mut OutputFormatter<W>,
) -> Result<Outcome, ProbeError>
where
    B: NsigBackend,
    F: FnOnce(BackendConfig) -> B,
    W: Write,
{
    let player = PlayerUrl::parse(&args.player_url)?;
    debug!("Validated player URL, player id {}", player.player_id());

    let config = args.backend_config();
    debug!("Backend config: {:?}", config);

    let probe = Probe::new(build_backend(config), ProbeOptions::from(args));
    probe
        .run(&args.n_value, &args.player_url, &player, out)
        .await
}
