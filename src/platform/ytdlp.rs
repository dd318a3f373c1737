//! yt-dlp backed decoder
//!
//! The backend keeps one bridge session per run: the embedded bridge program
//! is started under the configured interpreter on first use, takes one JSON
//! request per stdin line and answers each with a single marked JSON line on
//! stdout. The library instance, and with it the loaded player code, lives for
//! the whole session. Anything else the library prints on stdout is relayed
//! to stderr.

use crate::error::ProbeError;
use crate::platform::backend::{BackendConfig, NsigBackend};
use crate::utils::url::PlayerUrl;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;
use tracing::{debug, warn};

const BRIDGE_SCRIPT: &str = include_str!("ytdlp_bridge.py");
const REPLY_MARKER: &str = "__NSIG_PROBE_REPLY__";

/// Operations understood by the bridge program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BridgeOp {
    Version,
    NFunction,
    Decode,
}

impl BridgeOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BridgeOp::Version => "version",
            BridgeOp::NFunction => "n-function",
            BridgeOp::Decode => "decode",
        }
    }
}

impl fmt::Display for BridgeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client options, passed once as the bridge's only argument
#[derive(Debug, Serialize)]
struct BridgeConfig<'a> {
    quiet: bool,
    cachedir: Option<&'a Path>,
    ratelimit: Option<u64>,
    verbose: bool,
    ytdlp_dir: Option<&'a Path>,
}

/// One request line on the bridge's stdin
#[derive(Debug, Serialize)]
struct BridgeRequest<'a> {
    op: BridgeOp,
    player_url: Option<&'a str>,
    n: Option<&'a str>,
    video_id: Option<&'a str>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
enum FailureKind {
    Extractor,
    Unexpected,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
enum BridgeReply {
    Ok {
        value: String,
    },
    Error {
        kind: FailureKind,
        #[serde(default)]
        exception: String,
        message: String,
        #[serde(default)]
        traceback: Option<String>,
    },
}

impl BridgeReply {
    fn into_result(self) -> Result<String, ProbeError> {
        match self {
            BridgeReply::Ok { value } => Ok(value),
            BridgeReply::Error {
                kind: FailureKind::Extractor,
                message,
                traceback,
                ..
            } => Err(ProbeError::Extractor { message, traceback }),
            BridgeReply::Error {
                kind: FailureKind::Unexpected,
                exception,
                message,
                traceback,
            } => Err(ProbeError::Library {
                exception,
                message,
                traceback,
            }),
        }
    }
}

/// A running bridge process
struct BridgeSession {
    child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
}

impl BridgeSession {
    /// Send one request and wait for its reply line
    async fn exchange(&mut self, op: BridgeOp, request: &str) -> Result<Option<String>, ProbeError> {
        if let Err(e) = self.write_line(request).await {
            debug!("Bridge op {} could not be sent: {}", op, e);
            return Ok(None);
        }

        while let Some(line) = self.stdout.next_line().await? {
            match line.strip_prefix(REPLY_MARKER) {
                Some(payload) => return Ok(Some(payload.trim().to_string())),
                None => eprintln!("{}", line),
            }
        }

        Ok(None)
    }

    async fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        self.stdin.write_all(line.as_bytes()).await?;
        self.stdin.write_all(b"\n").await?;
        self.stdin.flush().await
    }
}

/// Decoder that delegates to a yt-dlp installation through a child interpreter
pub struct YtDlpBackend {
    config: BackendConfig,
    session: Mutex<Option<BridgeSession>>,
}

impl YtDlpBackend {
    /// Create a backend with the given client options; nothing is started yet
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            session: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Build the child command that hosts the bridge session
    pub fn command(&self) -> Result<Command, ProbeError> {
        let config = BridgeConfig {
            quiet: self.config.quiet,
            cachedir: self.config.cache_dir.as_deref(),
            ratelimit: self.config.rate_limit,
            verbose: self.config.verbose,
            ytdlp_dir: self.config.ytdlp_dir.as_deref(),
        };
        let payload = serde_json::to_string(&config)?;

        let mut command = Command::new(&self.config.python);
        command
            .arg("-c")
            .arg(BRIDGE_SCRIPT)
            .arg(payload)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        for (key, value) in self.config.library_env() {
            command.env(key, value);
        }

        Ok(command)
    }

    fn spawn(&self) -> Result<BridgeSession, ProbeError> {
        debug!("Starting bridge with {}", self.config.python.display());

        let mut child = self.command()?.spawn().map_err(|e| {
            ProbeError::Bridge(format!(
                "failed to start {}: {}",
                self.config.python.display(),
                e
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ProbeError::Bridge("bridge stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ProbeError::Bridge("bridge stdout unavailable".to_string()))?;

        Ok(BridgeSession {
            child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
        })
    }

    async fn call(
        &self,
        op: BridgeOp,
        player: Option<&PlayerUrl>,
        n_value: Option<&str>,
        video_id: Option<&str>,
    ) -> Result<String, ProbeError> {
        let request = serde_json::to_string(&BridgeRequest {
            op,
            player_url: player.map(PlayerUrl::as_str),
            n: n_value,
            video_id,
        })?;

        let mut guard = self.session.lock().await;
        if guard.is_none() {
            *guard = Some(self.spawn()?);
        }
        let Some(session) = guard.as_mut() else {
            return Err(ProbeError::Bridge("bridge session unavailable".to_string()));
        };

        debug!("Running bridge op {}", op);
        match session.exchange(op, &request).await? {
            Some(line) => {
                let reply: BridgeReply = serde_json::from_str(&line)?;
                debug!("Bridge op {} replied: {:?}", op, reply);
                reply.into_result()
            }
            None => {
                // The session is gone; a later call starts a fresh one
                let status = match guard.take() {
                    Some(BridgeSession {
                        mut child, stdin, ..
                    }) => {
                        drop(stdin);
                        child.wait().await?.to_string()
                    }
                    None => "no process".to_string(),
                };
                warn!("Bridge op {} exited with {} and no reply", op, status);
                Err(ProbeError::Bridge(format!(
                    "{} produced no reply ({})",
                    op, status
                )))
            }
        }
    }
}

#[async_trait]
impl NsigBackend for YtDlpBackend {
    async fn library_version(&self) -> Result<String, ProbeError> {
        self.call(BridgeOp::Version, None, None, None).await
    }

    async fn n_function_name(&self, player: &PlayerUrl) -> Result<String, ProbeError> {
        self.call(BridgeOp::NFunction, Some(player), None, None).await
    }

    async fn decrypt_nsig(
        &self,
        n_value: &str,
        video_id: &str,
        player: &PlayerUrl,
    ) -> Result<String, ProbeError> {
        self.call(BridgeOp::Decode, Some(player), Some(n_value), Some(video_id))
            .await
    }
}
